//! One-shot query command.

use anyhow::Context;
use colored::Colorize;
use portal_core::Space;

use crate::cli::AskArgs;
use crate::render;

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let client = super::connect_with_feedback(&args.space).await?;

    let response = match client.predict(&args.message, &args.api).await {
        Ok(response) => response,
        Err(e) => {
            if e.retryable() {
                eprintln!("{}", "Network problem during the call; try again.".yellow());
            }
            return Err(e.into());
        }
    };

    match args.output {
        Some(path) => {
            render::save_to_file(&path, &response)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{}",
                format!("Response saved to {}", path.display()).green()
            );
        }
        None if args.raw => render::print_raw(&response),
        None => render::print_styled("Response", &response),
    }

    Ok(())
}
