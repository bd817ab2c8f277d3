//! Conversation controller
//!
//! Owns the conversation state (message thread, current mood, optional
//! summary) and orchestrates the three remote operations.
//!
//! The controller is either idle or busy. Busy is a single-permit guard:
//! every operation tries to take the permit and is skipped, not queued, if
//! another request is already in flight. The permit is released when the
//! operation returns, whether the request succeeded or failed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::message::Message;
use crate::mood::Mood;
use crate::session::{SessionContext, SessionId};
use crate::transport::Transport;

/// Greeting shown after a successful reset
pub const DEFAULT_RESET_GREETING: &str = "Session cleared. I'm ready to start fresh.";

/// Tunables for a [`ChatController`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Text of the synthetic assistant message that replaces the thread on
    /// reset
    pub reset_greeting: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            reset_greeting: DEFAULT_RESET_GREETING.to_string(),
        }
    }
}

/// Why an operation was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The input was empty or whitespace-only
    EmptyInput,
    /// Another request is in flight
    Busy,
}

/// Result of a controller operation
///
/// Failures are already logged by the controller; callers are not expected
/// to surface them.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The request completed and state was updated
    Completed(T),
    /// The request failed; the message is for diagnostics only
    Failed(String),
    /// The operation was dropped without touching state
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    /// True if the request completed
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// True if the request was attempted and failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// True if the operation was dropped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// The completed value, if any
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Point-in-time copy of the controller state
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSnapshot {
    /// Conversation thread, oldest first
    pub messages: Vec<Message>,
    /// Mood of the most recent reply, or the default
    pub mood: Mood,
    /// Summary currently on display
    pub summary: Option<String>,
    /// Whether a request is in flight
    pub busy: bool,
}

#[derive(Debug, Default)]
struct ConversationState {
    messages: Vec<Message>,
    mood: Mood,
    summary: Option<String>,
}

/// Session/conversation controller
///
/// All methods take `&self`, so a controller can be shared (for example in
/// an `Arc`) between an input loop and whatever renders its state.
///
/// # Examples
///
/// ```no_run
/// use attrangi::config::ApiConfig;
/// use attrangi::controller::{ChatController, ControllerOptions};
/// use attrangi::session::{MemorySessionStore, SessionContext, DEFAULT_STORAGE_KEY};
/// use attrangi::transport::HttpTransport;
///
/// # async fn example() -> attrangi::error::Result<()> {
/// let store = MemorySessionStore::new();
/// let session = SessionContext::initialize(&store, DEFAULT_STORAGE_KEY)?;
/// let transport = HttpTransport::new(&ApiConfig::default())?;
/// let controller =
///     ChatController::new(Box::new(transport), session, ControllerOptions::default());
///
/// controller.send("I feel tired").await;
/// println!("{}", controller.mood());
/// # Ok(())
/// # }
/// ```
pub struct ChatController {
    transport: Box<dyn Transport>,
    session: SessionContext,
    options: ControllerOptions,
    state: Mutex<ConversationState>,
    busy: Semaphore,
}

impl std::fmt::Debug for ChatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("transport", &self.transport)
            .field("session", &self.session)
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl ChatController {
    /// Create an idle controller with an empty thread and the default mood
    pub fn new(
        transport: Box<dyn Transport>,
        session: SessionContext,
        options: ControllerOptions,
    ) -> Self {
        tracing::debug!(session_id = %session.id(), "Created conversation controller");
        Self {
            transport,
            session,
            options,
            state: Mutex::new(ConversationState::default()),
            busy: Semaphore::new(1),
        }
    }

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_begin(&self, operation: &'static str) -> Option<SemaphorePermit<'_>> {
        match self.busy.try_acquire() {
            Ok(permit) => Some(permit),
            Err(_) => {
                tracing::debug!(operation, "Request already in flight, dropping");
                None
            }
        }
    }

    /// Send a user message
    ///
    /// Skipped if `text` is empty/whitespace-only or a request is in flight.
    /// Otherwise the user message is appended before the request is made.
    /// On success the assistant reply is appended and becomes the current
    /// mood (`NEUTRAL` when the reply carries none). On failure the user
    /// message stays in the thread and nothing else changes.
    pub async fn send(&self, text: &str) -> Outcome<Message> {
        if text.trim().is_empty() {
            return Outcome::Skipped(SkipReason::EmptyInput);
        }
        let Some(_permit) = self.try_begin("send") else {
            return Outcome::Skipped(SkipReason::Busy);
        };

        {
            let mut state = self.state();
            state.messages.push(Message::user(text));
        }

        match self.transport.send_message(self.session.id(), text).await {
            Ok(reply) => {
                let mood = reply.expression.as_deref().map(Mood::from_tag);
                let message = Message::assistant(reply.reply, mood);
                {
                    let mut state = self.state();
                    state.messages.push(message.clone());
                    state.mood = mood.unwrap_or_default();
                }
                tracing::debug!(mood = %mood.unwrap_or_default(), "Received reply");
                Outcome::Completed(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Send failed");
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Request a summary of the conversation
    ///
    /// Skipped if a request is in flight. On success the returned text
    /// replaces the stored summary; a reply without text clears it.
    pub async fn summarize(&self) -> Outcome<Option<String>> {
        let Some(_permit) = self.try_begin("summarize") else {
            return Outcome::Skipped(SkipReason::Busy);
        };

        match self.transport.summarize(self.session.id()).await {
            Ok(reply) => {
                tracing::info!(status = %reply.status, "Summary received");
                self.state().summary = reply.summary.clone();
                Outcome::Completed(reply.summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "Summary failed");
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Reset the conversation
    ///
    /// Skipped if a request is in flight. On success the thread is replaced
    /// by a single greeting from the assistant, the summary is cleared and
    /// the mood returns to `NEUTRAL`. On failure nothing changes.
    pub async fn reset(&self) -> Outcome<Message> {
        let Some(_permit) = self.try_begin("reset") else {
            return Outcome::Skipped(SkipReason::Busy);
        };

        match self.transport.reset(self.session.id()).await {
            Ok(ack) => {
                tracing::info!(ack = %ack.0, "Session reset");
                let greeting =
                    Message::assistant(self.options.reset_greeting.clone(), Some(Mood::Neutral));
                let mut state = self.state();
                state.messages = vec![greeting.clone()];
                state.summary = None;
                state.mood = Mood::Neutral;
                Outcome::Completed(greeting)
            }
            Err(e) => {
                tracing::error!(error = %e, "Reset failed");
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Dismiss the summary, returning it if one was shown
    pub fn dismiss_summary(&self) -> Option<String> {
        self.state().summary.take()
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.available_permits() == 0
    }

    /// Copy of the conversation thread
    pub fn messages(&self) -> Vec<Message> {
        self.state().messages.clone()
    }

    /// Current mood
    pub fn mood(&self) -> Mood {
        self.state().mood
    }

    /// Summary currently on display
    pub fn summary(&self) -> Option<String> {
        self.state().summary.clone()
    }

    /// Session this controller talks for
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Shorthand for `self.session().id()`
    pub fn session_id(&self) -> &SessionId {
        self.session.id()
    }

    /// Consistent copy of all state
    pub fn snapshot(&self) -> ConversationSnapshot {
        let busy = self.is_busy();
        let state = self.state();
        ConversationSnapshot {
            messages: state.messages.clone(),
            mood: state.mood,
            summary: state.summary.clone(),
            busy,
        }
    }
}
