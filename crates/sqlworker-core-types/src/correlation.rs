//! Correlation types for message tracking
//!
//! The wire protocol carries no correlation identifiers, so the worker
//! assigns one to every inbound message for log correlation only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single inbound message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried with each message through the dispatcher
///
/// `seq` is the zero-based position of the message on its channel. Since
/// responses are emitted strictly in arrival order, the response to message
/// `seq` is always the `seq`-th response the host receives.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub seq: u64,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new(seq: u64) -> Self {
        Self {
            request_id: RequestId::new(),
            seq,
        }
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId, seq: u64) -> Self {
        Self { request_id, seq }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(0)
    }
}
