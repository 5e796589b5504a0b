use serde::{Deserialize, Serialize};

/// Identifies one issued async request. Captured at dispatch, compared at
/// resolution, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

/// Monotonic counter guarding shared result state against out-of-order
/// async completions. One instance per session/controller, injected rather
/// than global so tests can drive interleavings directly.
///
/// A response carrying a non-current token is dropped entirely: no partial
/// update and no user-visible error, as if the request never happened.
#[derive(Debug, Default)]
pub struct RequestSequence {
    counter: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// Issue the token for a request about to be dispatched. The caller must
    /// capture it before starting the async operation.
    pub fn issue(&mut self) -> RequestToken {
        self.counter += 1;
        RequestToken(self.counter)
    }

    /// True iff `token` belongs to the most recently issued request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.counter
    }
}
