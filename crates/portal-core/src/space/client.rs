//! Space connection setup: target resolution and the validation handshake.

use tracing::{debug, info};

use crate::PortalError;

use super::config::SpaceConfig;

/// A validated connection to one Gradio space.
///
/// Holds the resolved base URL and the HTTP client configured at connect
/// time. Exclusively owned by whoever created it; a handle that stops
/// working is replaced by connecting again, never patched in place.
pub struct SpaceClient {
    pub(crate) target: String,
    pub(crate) base_url: String,
    pub(crate) http: reqwest::Client,
}

impl SpaceClient {
    /// Connect to a space with default transport settings.
    pub async fn connect(target: &str) -> Result<Self, PortalError> {
        Self::connect_with(target, &SpaceConfig::default()).await
    }

    /// Connect to a space and validate it end-to-end.
    ///
    /// Resolves `target` (URL or `owner/name` id) to a base URL and fetches
    /// the space's config document. Every failure mode (bad id, unreachable
    /// host, stopped space) folds into [`PortalError::ConnectionSetup`]
    /// with the cause preserved.
    pub async fn connect_with(target: &str, config: &SpaceConfig) -> Result<Self, PortalError> {
        let base_url = resolve_base_url(target)?;

        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().expect("failed to build HTTP client");

        debug!(%target, %base_url, "validating space");

        let response = http
            .get(format!("{base_url}/config"))
            .send()
            .await
            .map_err(|e| setup_error(target, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(setup_error(
                target,
                format!("space returned HTTP {status}"),
            ));
        }

        // A Gradio space serves its app config as JSON; anything else is
        // not a space we can call.
        let config_doc: serde_json::Value =
            response.json().await.map_err(|e| setup_error(target, e))?;

        info!(
            %target,
            version = config_doc["version"].as_str().unwrap_or("unknown"),
            "connected to space"
        );

        Ok(Self {
            target: target.to_string(),
            base_url,
            http,
        })
    }

    /// The target this handle was connected to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The resolved space root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the call endpoint for a remote procedure name.
    pub(crate) fn call_url(&self, api_name: &str) -> String {
        let name = api_name.strip_prefix('/').unwrap_or(api_name);
        format!("{}/gradio_api/call/{}", self.base_url, name)
    }
}

fn setup_error(target: &str, reason: impl ToString) -> PortalError {
    PortalError::ConnectionSetup {
        target: target.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolve a caller-supplied target to the space's root URL.
///
/// Full URLs pass through (trailing slash trimmed). `owner/name` ids map
/// to the `https://{owner}-{name}.hf.space` hosting scheme, lowercased
/// with `/`, `_` and `.` folded to `-`.
pub(crate) fn resolve_base_url(target: &str) -> Result<String, PortalError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(setup_error(target, "target must not be empty"));
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        return Ok(target.trim_end_matches('/').to_string());
    }

    match target.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            let subdomain: String = format!("{owner}-{name}")
                .chars()
                .map(|c| match c {
                    '_' | '.' => '-',
                    c => c.to_ascii_lowercase(),
                })
                .collect();
            Ok(format!("https://{subdomain}.hf.space"))
        }
        _ => Err(setup_error(
            target,
            "target is neither a URL nor an 'owner/name' space id",
        )),
    }
}
