//! Special commands parser for interactive chat mode
//!
//! Lines starting with `/` are interpreted as commands rather than sent to
//! the assistant. They let the user:
//! - Request or dismiss a summary
//! - Reset the conversation
//! - View the session status
//! - Display help information
//! - Exit the session
//!
//! Commands are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an argument it does not take
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Ask the service for a summary of the conversation
    Summary,

    /// Close the summary panel
    DismissSummary,

    /// Clear the conversation on the service and locally
    Reset,

    /// Display session id, mood and thread length
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the line to the assistant
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an argument.
///
/// # Examples
///
/// ```
/// use attrangi::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/summary").unwrap(), SpecialCommand::Summary);
/// assert_eq!(parse_special_command("I feel tired").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // Bare exit/quit are accepted without the slash
    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let mut parts = lower.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let command = match name {
        "/summary" | "/summarize" => SpecialCommand::Summary,
        "/close" | "/dismiss" => SpecialCommand::DismissSummary,
        "/reset" | "/clear" => SpecialCommand::Reset,
        "/status" => SpecialCommand::ShowStatus,
        "/help" | "/?" => SpecialCommand::Help,
        "/exit" | "/quit" | "/q" => SpecialCommand::Exit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    if !arg.is_empty() {
        return Err(CommandError::UnsupportedArgument {
            command: name.to_string(),
            arg: arg.to_string(),
        });
    }

    Ok(command)
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Commands
========

  /summary        - Generate a summary of the conversation
  /close          - Dismiss the summary (alias: /dismiss)
  /reset          - Clear the conversation and start fresh (alias: /clear)
  /status         - Show session id, mood and message count
  /help           - Show this help (alias: /?)
  /exit           - Leave the chat (aliases: /quit, exit, quit)

Anything else you type is sent to the assistant.
"#
    );
}
