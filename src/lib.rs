//! Attrangi - terminal client for the Attrangi support assistant
//!
//! This library provides the conversation controller, the HTTP transport to
//! the assistant service, session persistence and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `controller`: Conversation state, busy guard and request orchestration
//! - `transport`: Wire types and the HTTP client for the assistant service
//! - `session`: Session id persistence (SQLite or in-memory)
//! - `mood`: Mood tags reported by the assistant
//! - `message`: Messages of the conversation thread
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use attrangi::{ChatController, Config};
//! use attrangi::session::{MemorySessionStore, SessionContext};
//! use attrangi::transport::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let store = MemorySessionStore::new();
//!     let session = SessionContext::initialize(&store, &config.session.storage_key)?;
//!     let controller = ChatController::new(
//!         Box::new(HttpTransport::new(&config.api)?),
//!         session,
//!         config.chat.controller_options(),
//!     );
//!     controller.send("I feel tired").await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod message;
pub mod mood;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use controller::{ChatController, ControllerOptions, Outcome, SkipReason};
pub use error::{AttrangiError, Result};
pub use message::{Message, Role};
pub use mood::Mood;
pub use session::{SessionContext, SessionId, SessionStore};

#[cfg(test)]
pub mod test_utils;
