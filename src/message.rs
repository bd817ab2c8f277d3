//! Conversation messages
//!
//! Messages are created once and never modified; the controller only ever
//! appends to or wholesale replaces its list. Fields are private so that
//! holders of a `Message` cannot mutate it in place.

use crate::mood::Mood;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text the user typed
    User,
    /// Text returned by the assistant service
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single entry in the conversation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mood: Option<Mood>,
    created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, mood: Option<Mood>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            mood,
            created_at: Utc::now(),
        }
    }

    /// Create a user message
    ///
    /// # Examples
    ///
    /// ```
    /// use attrangi::message::{Message, Role};
    ///
    /// let msg = Message::user("I feel tired");
    /// assert_eq!(msg.role(), Role::User);
    /// assert_eq!(msg.content(), "I feel tired");
    /// assert!(msg.mood().is_none());
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, None)
    }

    /// Create an assistant message, optionally tagged with a mood
    pub fn assistant(content: impl Into<String>, mood: Option<Mood>) -> Self {
        Self::new(Role::Assistant, content, mood)
    }

    /// Unique identifier of this message
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Author of this message
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Mood attached to an assistant reply, if the service sent one
    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    /// When the client created this message
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
