//! Server-sent-events parser for the space call protocol.
//!
//! A space delivers each call result over an SSE-framed response body. The
//! parser is generic over any buffered reader so the framing can be
//! exercised without a live space.

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::PortalError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone)]
pub struct SseEvent {
    /// The event type (e.g. "complete", "error", "heartbeat").
    pub event: Option<String>,
    /// The event data (JSON string; multi-line data is joined with '\n').
    pub data: String,
}

/// Parse the SSE body of a reqwest response, calling `on_event` per event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    on_event: impl FnMut(SseEvent),
) -> Result<(), PortalError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    parse_sse_reader(reader, on_event).await
}

/// Parse SSE events from any buffered reader. I/O failures mid-stream are
/// transport failures.
pub async fn parse_sse_reader(
    reader: impl AsyncBufRead + Unpin,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), PortalError> {
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| PortalError::Transport(e.to_string()))?
    {
        if line.is_empty() {
            // Empty line = end of event
            if !current_data.is_empty() {
                on_event(SseEvent {
                    event: current_event.take(),
                    data: std::mem::take(&mut current_data),
                });
            }
            current_event = None;
            continue;
        }

        if let Some(event_type) = line.strip_prefix("event: ") {
            current_event = Some(event_type.to_string());
        } else if let Some(data) = line.strip_prefix("data: ") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
    }

    // Flush any remaining event
    if !current_data.is_empty() {
        on_event(SseEvent {
            event: current_event,
            data: current_data,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(input: &str) -> Vec<SseEvent> {
        let mut events = Vec::new();
        parse_sse_reader(input.as_bytes(), |event| events.push(event))
            .await
            .unwrap();
        events
    }

    #[tokio::test]
    async fn parses_typed_events() {
        let events = collect("event: heartbeat\ndata: null\n\nevent: complete\ndata: [\"ok\"]\n\n").await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event.as_deref(), Some("heartbeat"));
        assert_eq!(events[0].data, "null");
        assert_eq!(events[1].event.as_deref(), Some("complete"));
        assert_eq!(events[1].data, "[\"ok\"]");
    }

    #[tokio::test]
    async fn joins_multiline_data() {
        let events = collect("data: first\ndata: second\n\n").await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, None);
        assert_eq!(events[0].data, "first\nsecond");
    }

    #[tokio::test]
    async fn flushes_trailing_event_without_blank_line() {
        let events = collect("event: complete\ndata: [\"tail\"]").await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.as_deref(), Some("complete"));
        assert_eq!(events[0].data, "[\"tail\"]");
    }

    #[tokio::test]
    async fn ignores_comments_and_other_fields() {
        let events = collect(": ping\nid: 7\nretry: 1000\ndata: payload\n\n").await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "payload");
    }

    #[tokio::test]
    async fn empty_stream_yields_no_events() {
        let events = collect("").await;
        assert!(events.is_empty());
    }
}
