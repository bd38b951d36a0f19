//! Query orchestration core for Gradio-hosted inference spaces.
//!
//! Provides:
//! - Connection setup and validation against a space (`SpaceClient`)
//! - Single-query dispatch over the space's call API
//! - Conversation sessions with ordered transcripts (`Session`)
//! - A failure taxonomy callers can act on (`PortalError`)
//!
//! The core hands back plain response strings only; rendering, persistence,
//! and argument handling belong to the embedding front end.

pub mod session;
pub mod space;
pub mod sse;

use async_trait::async_trait;

pub use session::Session;
pub use space::config::{default_api_name, default_space, DEFAULT_API_NAME, DEFAULT_SPACE};
pub use space::{SpaceClient, SpaceConfig};

/// A live, validated link to one remote space.
///
/// `SpaceClient` is the HTTP implementation; a [`Session`] accepts any
/// implementation, so tests and embedders can supply their own transport.
#[async_trait]
pub trait Space: Send + Sync {
    /// The target this handle was connected to.
    fn target(&self) -> &str;

    /// Send one query to the named remote procedure and return the
    /// normalized response text. An absent remote result is an empty
    /// string, never a missing value.
    async fn predict(&self, query: &str, api_name: &str) -> Result<String, PortalError>;
}

/// One recorded query/response pair in a session transcript.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Exchange {
    pub query: String,
    pub response: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Connecting to the target failed: unresolvable target, unreachable
    /// host, or a space that is not serving.
    #[error("connection setup failed for '{target}': {reason}")]
    ConnectionSetup { target: String, reason: String },

    /// The call failed for a network reason. Retryable once the caller
    /// re-establishes the connection.
    #[error("transport error: {0}")]
    Transport(String),

    /// The space executed the call and reported an application-level
    /// failure, or answered with a malformed protocol response.
    #[error("prediction error: {0}")]
    Prediction(String),

    /// A session operation that needs a bound space was called while
    /// unbound.
    #[error("session is not bound to a space")]
    Unbound,
}

impl PortalError {
    /// Whether re-issuing the same call can reasonably succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, PortalError::Transport(_))
    }
}
