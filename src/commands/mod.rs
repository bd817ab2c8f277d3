/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`    - Interactive chat
- `oneshot` - `send`, `summary` and `reset` as single commands
- `session` - Inspect or rotate the stored session id

The handlers are thin: they wire configuration into a session store, an
HTTP transport and a [`ChatController`], then render what the controller
reports.
*/

use crate::config::{Config, SessionConfig};
use crate::controller::{ChatController, ConversationSnapshot};
use crate::error::Result;
use crate::message::{Message, Role};
use crate::session::{SessionContext, SessionId, SqliteSessionStore};
use crate::transport::HttpTransport;
use colored::Colorize;

// Special commands parser for the interactive loop
pub mod special_commands;

/// Open the session store selected by configuration
///
/// Uses `session.store_path` when set, the platform data directory otherwise.
pub fn open_session_store(config: &SessionConfig) -> Result<SqliteSessionStore> {
    match &config.store_path {
        Some(path) => SqliteSessionStore::new_with_path(path),
        None => SqliteSessionStore::new(),
    }
}

/// Build a controller for the stored (or newly created) session
///
/// # Errors
///
/// Returns error if the session store cannot be opened or the transport
/// cannot be built
pub fn build_controller(config: &Config) -> Result<ChatController> {
    let store = open_session_store(&config.session)?;
    let session = SessionContext::initialize(&store, &config.session.storage_key)?;
    let transport = HttpTransport::new(&config.api)?;

    Ok(ChatController::new(
        Box::new(transport),
        session,
        config.chat.controller_options(),
    ))
}

/// Render one message of the thread
pub fn format_message(message: &Message, show_mood: bool) -> String {
    match message.role() {
        Role::User => format!("{} {}", "you:".blue().bold(), message.content()),
        Role::Assistant => {
            let mut out = format!("{} {}", "attrangi:".green().bold(), message.content());
            if show_mood {
                if let Some(mood) = message.mood() {
                    out.push_str(&format!("\n{}", mood.colored_tag()));
                }
            }
            out
        }
    }
}

/// Render the summary panel
pub fn format_summary(summary: &str) -> String {
    let rule = "─".repeat(62);
    format!(
        "\n{}\n{}\n{}\n{}\n{}\n",
        rule,
        "Clinical Summary".yellow().bold(),
        rule,
        summary,
        rule
    )
}

/// Render the `/status` panel
pub fn format_status(snapshot: &ConversationSnapshot, session_id: &SessionId) -> String {
    format!(
        "Session:      {}\nMood:         {} ({})\nMessages:     {}\nSummary:      {}\nBusy:         {}",
        session_id,
        snapshot.mood.colored_tag(),
        snapshot.mood.description(),
        snapshot.messages.len(),
        if snapshot.summary.is_some() {
            "shown (/close to dismiss)"
        } else {
            "none"
        },
        snapshot.busy
    )
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Builds a controller for the stored session and runs a readline-based
    //! loop: plain lines are sent to the assistant, `/` lines are commands.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::controller::Outcome;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let controller = build_controller(&config)?;
        let show_mood = config.chat.show_mood;

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&controller);

        loop {
            let prompt = format!("{} >> ", controller.mood().colored_tag());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Summary) => {
                            handle_summary(&controller).await;
                            continue;
                        }
                        Ok(SpecialCommand::DismissSummary) => {
                            if controller.dismiss_summary().is_none() {
                                println!("{}", "No summary to dismiss.".dimmed());
                            }
                            continue;
                        }
                        Ok(SpecialCommand::Reset) => {
                            if let Outcome::Completed(greeting) = controller.reset().await {
                                println!("\n{}\n", format_message(&greeting, show_mood));
                            }
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            println!(
                                "\n{}\n",
                                format_status(&controller.snapshot(), controller.session_id())
                            );
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "attrangi is typing…".dimmed());
                    // Failures are logged by the controller and not shown here.
                    if let Outcome::Completed(reply) = controller.send(&line).await {
                        println!("\n{}\n", format_message(&reply, show_mood));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Take care!");
        Ok(())
    }

    async fn handle_summary(controller: &ChatController) {
        println!("{}", "Generating summary…".dimmed());
        match controller.summarize().await {
            Outcome::Completed(Some(summary)) => println!("{}", format_summary(&summary)),
            Outcome::Completed(None) => println!("{}", "Nothing to summarize yet.".dimmed()),
            Outcome::Failed(_) | Outcome::Skipped(_) => {}
        }
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(controller: &ChatController) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                        Hey Attrangi                          ║");
        println!("║                   A safe place to talk.                      ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Mood:    {}", controller.mood().colored_tag());
        println!("Session: {}\n", controller.session_id());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}

// One-shot command handlers
pub mod oneshot {
    //! Single-request commands for scripting.
    //!
    //! Unlike the interactive loop these report a failed request as an
    //! error so the process exits non-zero.

    use super::*;
    use crate::controller::{Outcome, SkipReason};
    use crate::error::AttrangiError;

    fn into_result<T>(outcome: Outcome<T>) -> Result<T> {
        match outcome {
            Outcome::Completed(value) => Ok(value),
            Outcome::Failed(message) => Err(AttrangiError::RequestFailed(message).into()),
            Outcome::Skipped(SkipReason::EmptyInput) => {
                Err(AttrangiError::Config("Message cannot be empty".to_string()).into())
            }
            Outcome::Skipped(SkipReason::Busy) => Err(AttrangiError::RequestFailed(
                "Another request is in flight".to_string(),
            )
            .into()),
        }
    }

    /// Send one message and print the reply
    pub async fn run_send(config: Config, message: String) -> Result<()> {
        let controller = build_controller(&config)?;
        let reply = into_result(controller.send(&message).await)?;
        println!("{}", format_message(&reply, config.chat.show_mood));
        Ok(())
    }

    /// Request and print a summary
    pub async fn run_summary(config: Config) -> Result<()> {
        let controller = build_controller(&config)?;
        match into_result(controller.summarize().await)? {
            Some(summary) => println!("{}", format_summary(&summary)),
            None => println!("Nothing to summarize yet."),
        }
        Ok(())
    }

    /// Reset the conversation and print the greeting
    pub async fn run_reset(config: Config) -> Result<()> {
        let controller = build_controller(&config)?;
        let greeting = into_result(controller.reset().await)?;
        println!("{}", format_message(&greeting, false));
        Ok(())
    }

}

// Session id commands
pub mod session {
    //! `session show` and `session new`.

    use super::*;
    use crate::cli::SessionCommand;

    /// Print or rotate the stored session id
    pub fn run_session(config: Config, command: SessionCommand) -> Result<()> {
        let store = open_session_store(&config.session)?;
        let key = &config.session.storage_key;

        let context = match command {
            SessionCommand::Show => SessionContext::initialize(&store, key)?,
            SessionCommand::New => SessionContext::rotate(&store, key)?,
        };

        println!("{}", context.id());
        Ok(())
    }

}
