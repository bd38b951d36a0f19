//! Async session operations: bind and submit.

use tracing::{debug, warn};

use crate::space::SpaceClient;
use crate::{Exchange, PortalError};

use super::manager::Session;

impl Session {
    /// Bind the session to `target`, connecting first.
    ///
    /// All-or-nothing: on connect failure the current binding and
    /// transcript are untouched. A successful bind to a different target
    /// replaces the transcript; binding the current target again keeps it
    /// and installs a fresh handle (how a dead connection is replaced).
    pub async fn bind(&mut self, target: &str) -> Result<(), PortalError> {
        let client = SpaceClient::connect(target).await?;
        self.bind_handle(Box::new(client));
        Ok(())
    }

    /// Submit one query through the bound space.
    ///
    /// On success the exchange is appended to the transcript and the
    /// response returned. On failure nothing is recorded, so retrying is
    /// always safe.
    pub async fn submit(&mut self, query: &str) -> Result<String, PortalError> {
        let binding = self.binding.as_ref().ok_or(PortalError::Unbound)?;

        debug!(session = %self.id, chars = query.len(), "submitting query");
        let response = match binding.predict(query, &self.api_name).await {
            Ok(response) => response,
            Err(e) => {
                warn!(session = %self.id, error = %e, "submit failed, transcript unchanged");
                return Err(e);
            }
        };

        self.exchanges.push(Exchange {
            query: query.to_string(),
            response: response.clone(),
        });
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::{Exchange, PortalError, Session, Space};

    /// A space that answers from a scripted queue of results.
    struct ScriptedSpace {
        target: String,
        replies: Mutex<VecDeque<Result<String, PortalError>>>,
    }

    impl ScriptedSpace {
        fn new(
            target: &str,
            replies: impl IntoIterator<Item = Result<String, PortalError>>,
        ) -> Box<Self> {
            Box::new(Self {
                target: target.to_string(),
                replies: Mutex::new(replies.into_iter().collect()),
            })
        }
    }

    #[async_trait::async_trait]
    impl Space for ScriptedSpace {
        fn target(&self) -> &str {
            &self.target
        }

        async fn predict(&self, _query: &str, _api_name: &str) -> Result<String, PortalError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn exchange(query: &str, response: &str) -> Exchange {
        Exchange {
            query: query.into(),
            response: response.into(),
        }
    }

    #[tokio::test]
    async fn submit_records_exchanges_in_call_order() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new(
            "demo/model-a",
            [Ok("hi there".to_string()), Ok("still here".to_string())],
        ));

        assert_eq!(session.submit("hello").await.unwrap(), "hi there");
        assert_eq!(session.exchanges(), &[exchange("hello", "hi there")]);

        assert_eq!(session.submit("you ok?").await.unwrap(), "still here");
        assert_eq!(
            session.exchanges(),
            &[
                exchange("hello", "hi there"),
                exchange("you ok?", "still here"),
            ]
        );
    }

    #[tokio::test]
    async fn failed_submit_leaves_the_transcript_unchanged() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new(
            "demo/model-a",
            [
                Ok("hi there".to_string()),
                Err(PortalError::Transport("connection reset".into())),
                Ok("back again".to_string()),
            ],
        ));

        session.submit("hello").await.unwrap();
        let before = session.exchanges().to_vec();

        let err = session.submit("anyone?").await.unwrap_err();
        assert!(err.retryable());
        assert_eq!(session.exchanges(), before.as_slice());

        // The next successful turn appends exactly one exchange.
        session.submit("anyone?").await.unwrap();
        assert_eq!(session.exchange_count(), 2);
        assert_eq!(session.exchanges()[1], exchange("anyone?", "back again"));
    }

    #[tokio::test]
    async fn submit_on_an_unbound_session_is_an_error() {
        let mut session = Session::new();
        assert!(matches!(
            session.submit("hello").await,
            Err(PortalError::Unbound)
        ));
        assert_eq!(session.exchange_count(), 0);
    }

    #[tokio::test]
    async fn empty_queries_are_forwarded_not_rejected() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new("demo/model-a", [Ok("ack".to_string())]));

        assert_eq!(session.submit("").await.unwrap(), "ack");
        assert_eq!(session.exchanges(), &[exchange("", "ack")]);
    }

    #[tokio::test]
    async fn rebinding_a_different_target_clears_the_transcript() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new("demo/model-a", [Ok("one".to_string())]));
        session.submit("first").await.unwrap();

        session.bind_handle(ScriptedSpace::new("demo/model-b", []));
        assert_eq!(session.target(), Some("demo/model-b"));
        assert_eq!(session.exchange_count(), 0);
    }

    #[tokio::test]
    async fn rebinding_the_same_target_keeps_the_transcript() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new("demo/model-a", [Ok("one".to_string())]));
        session.submit("first").await.unwrap();

        session.bind_handle(ScriptedSpace::new("demo/model-a", []));
        assert_eq!(session.target(), Some("demo/model-a"));
        assert_eq!(session.exchanges(), &[exchange("first", "one")]);
    }

    #[tokio::test]
    async fn failed_bind_leaves_the_session_as_it_was() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new("demo/model-a", [Ok("one".to_string())]));
        session.submit("first").await.unwrap();

        // Resolution rejects this target before any network I/O.
        let err = session.bind("not-a-space-id").await.unwrap_err();
        assert!(matches!(err, PortalError::ConnectionSetup { .. }));

        assert_eq!(session.target(), Some("demo/model-a"));
        assert_eq!(session.exchanges(), &[exchange("first", "one")]);
    }

    #[tokio::test]
    async fn clear_empties_the_transcript_but_keeps_the_binding() {
        let mut session = Session::new();
        session.bind_handle(ScriptedSpace::new(
            "demo/model-a",
            [
                Ok("one".to_string()),
                Ok("two".to_string()),
                Ok("three".to_string()),
            ],
        ));
        for query in ["a", "b", "c"] {
            session.submit(query).await.unwrap();
        }
        assert_eq!(session.exchange_count(), 3);

        session.clear();
        assert_eq!(session.exchange_count(), 0);
        assert!(session.is_bound());
        assert_eq!(session.target(), Some("demo/model-a"));
    }
}
