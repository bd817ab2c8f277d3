//! In-process fake transport for controller tests
//!
//! [`FakeTransport::new`] returns a `(FakeTransport, FakeTransportHandle)`
//! pair. Wire the transport into the code under test; from the test side use
//! the handle to:
//!
//! - Observe each call the client made: `handle.calls_rx.recv().await`
//! - Decide how each call resolves: `handle.replies_tx.send(FakeReply::..)`
//!
//! Replies may be queued before the call is made. A call whose reply has not
//! been queued stays pending, which lets tests hold a request in flight.
//!
//! ```text
//! client call() -----> calls_tx   -----> calls_rx   (handle reads)
//! handle replies_tx -> replies_rx -----> call() resolves
//! ```

use tokio::sync::{mpsc, Mutex};

use crate::error::{AttrangiError, Result};
use crate::session::SessionId;
use crate::transport::{ChatReply, ResetAck, SummaryReply, Transport};

/// A call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    /// `send_message` was invoked
    SendMessage {
        /// Session the call was made for
        session_id: SessionId,
        /// Message text
        message: String,
    },
    /// `summarize` was invoked
    Summarize {
        /// Session the call was made for
        session_id: SessionId,
    },
    /// `reset` was invoked
    Reset {
        /// Session the call was made for
        session_id: SessionId,
    },
}

/// How the next pending call resolves
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Resolve `send_message` successfully
    Chat(ChatReply),
    /// Resolve `summarize` successfully
    Summary(SummaryReply),
    /// Resolve `reset` successfully
    Reset(ResetAck),
    /// Fail whichever call is pending
    Fail,
}

impl FakeReply {
    /// Successful chat reply with an optional mood tag
    pub fn chat(reply: &str, expression: Option<&str>) -> Self {
        Self::Chat(ChatReply {
            reply: reply.to_string(),
            expression: expression.map(str::to_string),
        })
    }

    /// Successful summary reply
    pub fn summary(text: &str) -> Self {
        Self::Summary(SummaryReply {
            status: "success".to_string(),
            summary: Some(text.to_string()),
        })
    }

    /// Successful reset acknowledgment
    pub fn reset() -> Self {
        Self::Reset(ResetAck(serde_json::json!({"status": "cleared"})))
    }
}

/// Channel-backed [`Transport`] for tests
#[derive(Debug)]
pub struct FakeTransport {
    calls_tx: mpsc::UnboundedSender<FakeCall>,
    replies_rx: Mutex<mpsc::UnboundedReceiver<FakeReply>>,
}

/// Test-side handle for a [`FakeTransport`]
#[derive(Debug)]
pub struct FakeTransportHandle {
    /// Receives every call the client made, in order
    pub calls_rx: mpsc::UnboundedReceiver<FakeCall>,
    /// Queues the resolution of the next pending call
    pub replies_tx: mpsc::UnboundedSender<FakeReply>,
}

impl FakeTransport {
    /// Create a new `(FakeTransport, FakeTransportHandle)` pair.
    pub fn new() -> (Self, FakeTransportHandle) {
        let (calls_tx, calls_rx) = mpsc::unbounded_channel();
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        let transport = Self {
            calls_tx,
            replies_rx: Mutex::new(replies_rx),
        };
        let handle = FakeTransportHandle {
            calls_rx,
            replies_tx,
        };

        (transport, handle)
    }

    async fn exchange(&self, call: FakeCall) -> Result<FakeReply> {
        // A dropped handle only means nobody is watching.
        let _ = self.calls_tx.send(call);

        let mut replies = self.replies_rx.lock().await;
        match replies.recv().await {
            Some(FakeReply::Fail) | None => {
                Err(AttrangiError::RequestFailed("fake transport failure".to_string()).into())
            }
            Some(reply) => Ok(reply),
        }
    }
}

fn unexpected(reply: FakeReply) -> anyhow::Error {
    AttrangiError::RequestFailed(format!("unexpected fake reply: {:?}", reply)).into()
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<ChatReply> {
        let call = FakeCall::SendMessage {
            session_id: session_id.clone(),
            message: message.to_string(),
        };
        match self.exchange(call).await? {
            FakeReply::Chat(reply) => Ok(reply),
            other => Err(unexpected(other)),
        }
    }

    async fn summarize(&self, session_id: &SessionId) -> Result<SummaryReply> {
        let call = FakeCall::Summarize {
            session_id: session_id.clone(),
        };
        match self.exchange(call).await? {
            FakeReply::Summary(reply) => Ok(reply),
            other => Err(unexpected(other)),
        }
    }

    async fn reset(&self, session_id: &SessionId) -> Result<ResetAck> {
        let call = FakeCall::Reset {
            session_id: session_id.clone(),
        };
        match self.exchange(call).await? {
            FakeReply::Reset(ack) => Ok(ack),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_reply_resolves_call() {
        let (transport, mut handle) = FakeTransport::new();
        handle
            .replies_tx
            .send(FakeReply::chat("hello", Some("NEUTRAL")))
            .unwrap();

        let sid = SessionId::from("s");
        let reply = transport.send_message(&sid, "hi").await.unwrap();
        assert_eq!(reply.reply, "hello");

        let call = handle.calls_rx.recv().await.unwrap();
        assert_eq!(
            call,
            FakeCall::SendMessage {
                session_id: sid,
                message: "hi".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fail_reply_is_request_failed() {
        let (transport, handle) = FakeTransport::new();
        handle.replies_tx.send(FakeReply::Fail).unwrap();

        let err = transport.reset(&SessionId::from("s")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AttrangiError>(),
            Some(AttrangiError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_mismatched_reply_is_an_error() {
        let (transport, handle) = FakeTransport::new();
        handle.replies_tx.send(FakeReply::reset()).unwrap();
        assert!(transport.summarize(&SessionId::from("s")).await.is_err());
    }
}
