//! Transport abstraction for the assistant service
//!
//! This module defines the [`Transport`] trait the conversation controller
//! talks through, together with the JSON payloads exchanged with the
//! service. Concrete implementations live in submodules:
//!
//! - [`http::HttpTransport`] -- JSON over HTTP using `reqwest`.
//! - [`fake::FakeTransport`] -- in-process fake used in tests (cfg(test)
//!   only).
//!
//! Each operation is a single request/response exchange identified only by
//! the session id and an operation-specific payload. Implementations report
//! any unsuccessful exchange as
//! [`AttrangiError::RequestFailed`](crate::error::AttrangiError::RequestFailed)
//! and never retry.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::SessionId;

pub mod http;

#[cfg(test)]
pub mod fake;

pub use http::HttpTransport;

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Session the message belongs to
    pub session_id: SessionId,
    /// Text the user typed
    pub message: String,
}

/// Body of `POST /summary` and `POST /reset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Session to act on
    pub session_id: SessionId,
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant reply text
    pub reply: String,
    /// Raw mood tag; may be absent or unknown
    #[serde(default)]
    pub expression: Option<String>,
}

/// Response of `POST /summary`
///
/// The service answers with only a `status` when there is nothing to
/// summarize, so `summary` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReply {
    /// Service-defined status string
    #[serde(default)]
    pub status: String,
    /// Summary text, when one was produced
    #[serde(default)]
    pub summary: Option<String>,
}

/// Opaque acknowledgment of `POST /reset`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResetAck(pub serde_json::Value);

/// Abstraction over the assistant service.
///
/// Used polymorphically by the conversation controller so tests can swap in
/// a fake without any network I/O.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Forward a user message and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AttrangiError::RequestFailed`] if the
    /// exchange does not succeed.
    async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<ChatReply>;

    /// Ask the service to summarize the conversation so far.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AttrangiError::RequestFailed`] if the
    /// exchange does not succeed.
    async fn summarize(&self, session_id: &SessionId) -> Result<SummaryReply>;

    /// Ask the service to forget the conversation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AttrangiError::RequestFailed`] if the
    /// exchange does not succeed.
    async fn reset(&self, session_id: &SessionId) -> Result<ResetAck>;
}
