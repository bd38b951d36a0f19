//! CLI command implementations.

pub mod ask;
pub mod chat;

use colored::Colorize;
use portal_core::SpaceClient;

/// Connect with user feedback, translating setup failures into hints.
pub(crate) async fn connect_with_feedback(space: &str) -> anyhow::Result<SpaceClient> {
    println!("Connecting to space {}...", space.cyan());
    match SpaceClient::connect(space).await {
        Ok(client) => {
            println!("{}", format!("Connected to {space}").green());
            Ok(client)
        }
        Err(e) => {
            eprintln!("{} {e}", "connection failed:".red().bold());
            eprintln!(
                "{}",
                "Check the URL or space id, and that the space is running and public.".yellow()
            );
            Err(e.into())
        }
    }
}
