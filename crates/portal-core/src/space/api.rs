//! Space trait implementation for SpaceClient (query dispatch).

use async_trait::async_trait;
use tracing::debug;

use crate::sse::{parse_sse_stream, SseEvent};
use crate::{PortalError, Space};

use super::client::SpaceClient;

#[async_trait]
impl Space for SpaceClient {
    fn target(&self) -> &str {
        &self.target
    }

    /// Send one query over the two-step call protocol: POST the payload to
    /// get an event id, then drain that event's result stream.
    async fn predict(&self, query: &str, api_name: &str) -> Result<String, PortalError> {
        let call_url = self.call_url(api_name);

        debug!(target = %self.target, %call_url, chars = query.len(), "dispatching query");

        let response = self
            .http
            .post(&call_url)
            .json(&serde_json::json!({ "data": [query] }))
            .send()
            .await
            .map_err(|e| PortalError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(PortalError::Prediction(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PortalError::Prediction(e.to_string()))?;

        let event_id = json["event_id"]
            .as_str()
            .ok_or_else(|| PortalError::Prediction("call response is missing event_id".into()))?;

        self.await_result(&call_url, event_id).await
    }
}

impl SpaceClient {
    /// Drain the result stream for one call until a terminal event.
    async fn await_result(&self, call_url: &str, event_id: &str) -> Result<String, PortalError> {
        let response = self
            .http
            .get(format!("{call_url}/{event_id}"))
            .send()
            .await
            .map_err(|e| PortalError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Prediction(format!(
                "result stream returned HTTP {status}"
            )));
        }

        let mut outcome: Option<Result<String, PortalError>> = None;

        parse_sse_stream(response, |event: SseEvent| {
            if outcome.is_some() {
                return;
            }
            match event.event.as_deref().unwrap_or("") {
                "complete" => {
                    outcome = Some(match serde_json::from_str(&event.data) {
                        Ok(data) => Ok(extract_output(&data)),
                        Err(e) => Err(PortalError::Prediction(format!(
                            "undecodable result payload: {e}"
                        ))),
                    });
                }
                "error" => {
                    outcome = Some(Err(PortalError::Prediction(error_detail(&event.data))));
                }
                // heartbeat / generating frames carry progress only
                _ => {}
            }
        })
        .await?;

        outcome.unwrap_or_else(|| {
            Err(PortalError::Transport(
                "result stream ended without a terminal event".into(),
            ))
        })
    }
}

/// First element of the `complete` data array, normalized to a string.
/// Absent or null results become the empty string, never a missing value.
fn extract_output(data: &serde_json::Value) -> String {
    match data.get(0) {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Human-readable detail from an `error` event's data payload.
fn error_detail(data: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(data) {
        Ok(serde_json::Value::String(message)) => message,
        Ok(serde_json::Value::Null) => "space reported an error".to_string(),
        Ok(other) => other.to_string(),
        Err(_) => data.to_string(),
    }
}
