use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Portal, a terminal client for Gradio-hosted inference spaces.
#[derive(Parser, Debug)]
#[command(name = "portal", version, about)]
pub struct Cli {
    /// Log level override (e.g. debug, portal=debug).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single message and print the response.
    Ask(AskArgs),
    /// Start an interactive chat session.
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The message to send to the space.
    pub message: String,

    /// URL or `owner/name` id of the space.
    #[arg(short, long, default_value_t = portal_core::default_space())]
    pub space: String,

    /// Remote procedure name exposed by the space.
    #[arg(long, hide = true, default_value_t = portal_core::default_api_name())]
    pub api: String,

    /// Print the raw response without styling.
    #[arg(long)]
    pub raw: bool,

    /// Save the response to a file instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// URL or `owner/name` id of the space.
    #[arg(short, long, default_value_t = portal_core::default_space())]
    pub space: String,

    /// Remote procedure name exposed by the space.
    #[arg(long, hide = true, default_value_t = portal_core::default_api_name())]
    pub api: String,
}

pub fn parse() -> Cli {
    Cli::parse()
}
