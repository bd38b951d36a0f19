mod cli;
mod commands;
mod render;

use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Initialize logging; chat output stays clean unless the user asks.
    let log_directive = args.log_level.as_deref().unwrap_or("portal=warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "portal=warn".parse().unwrap()),
            ),
        )
        .init();

    tracing::debug!("portal v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match args.command {
        cli::Command::Ask(cmd) => commands::ask::run(cmd).await,
        cli::Command::Chat(cmd) => commands::chat::run(cmd).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
