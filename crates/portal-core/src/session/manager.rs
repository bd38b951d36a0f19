//! Session struct and transcript state.

use tracing::debug;
use uuid::Uuid;

use crate::space::config::default_api_name;
use crate::{Exchange, Space};

/// A conversation bound to at most one space at a time.
///
/// The transcript is append-only and lives exactly as long as its binding:
/// rebinding to a different target replaces both together. Mutating
/// operations take `&mut self`; the session carries no internal locking,
/// so callers serialize turns themselves.
pub struct Session {
    /// Live handle to the bound space, if any.
    pub(super) binding: Option<Box<dyn Space>>,
    /// Ordered exchanges made through the current binding.
    pub(super) exchanges: Vec<Exchange>,
    /// Remote procedure name used for every submit.
    pub(super) api_name: String,
    /// Correlates tracing lines for this session.
    pub(super) id: Uuid,
}

impl Session {
    /// A new, unbound session.
    pub fn new() -> Self {
        Self {
            binding: None,
            exchanges: Vec::new(),
            api_name: default_api_name(),
            id: Uuid::new_v4(),
        }
    }

    pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
        self.api_name = api_name.into();
        self
    }

    /// Install an already-connected handle.
    ///
    /// A handle for a different target replaces the transcript with it; a
    /// handle for the current target keeps the transcript and only swaps
    /// the connection.
    pub fn bind_handle(&mut self, handle: Box<dyn Space>) {
        let same_target = self
            .binding
            .as_ref()
            .is_some_and(|bound| bound.target() == handle.target());
        if same_target {
            debug!(session = %self.id, target = handle.target(), "refreshing handle");
        } else {
            debug!(session = %self.id, target = handle.target(), "binding new target");
            self.exchanges.clear();
        }
        self.binding = Some(handle);
    }

    /// Target currently bound, if any.
    pub fn target(&self) -> Option<&str> {
        self.binding.as_deref().map(|bound| bound.target())
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The full transcript, in submission order.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.len()
    }

    /// The remote procedure name used for submits.
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    /// Empty the transcript; the binding is untouched.
    pub fn clear(&mut self) {
        debug!(session = %self.id, "clearing transcript");
        self.exchanges.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
