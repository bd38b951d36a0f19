//! Space connection configuration and defaults.

use std::time::Duration;

/// Space queried when neither flag nor environment names one.
pub const DEFAULT_SPACE: &str = "tencent/Hunyuan-T1";

/// Remote procedure name exposed by chat-style spaces.
pub const DEFAULT_API_NAME: &str = "/chat";

/// Resolve the default endpoint target (`PORTAL_SPACE` overrides).
pub fn default_space() -> String {
    std::env::var("PORTAL_SPACE").unwrap_or_else(|_| DEFAULT_SPACE.to_string())
}

/// Resolve the default remote procedure name (`PORTAL_API` overrides).
pub fn default_api_name() -> String {
    std::env::var("PORTAL_API").unwrap_or_else(|_| DEFAULT_API_NAME.to_string())
}

/// Transport settings fixed when a connection is established.
///
/// A `request_timeout` of `None` means a call blocks until the space
/// answers or the connection drops.
#[derive(Debug, Clone)]
pub struct SpaceConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl SpaceConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
