//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the API.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a new session, clearing the transcript.
    New,

    /// Clear the visible transcript without touching the session.
    Clear,

    /// Reload the transcript from the server's stored history.
    History,

    /// Show details of the current session.
    Session,

    /// Close the current session server-side.
    Close,

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use deskchat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/new").is_some());
/// assert!(parse_command("Where is my order?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" | "reset" => reject_argument(ChatCommand::New, argument, "/new"),
        "clear" => reject_argument(ChatCommand::Clear, argument, "/clear"),
        "history" => reject_argument(ChatCommand::History, argument, "/history"),
        "session" => reject_argument(ChatCommand::Session, argument, "/session"),
        "close" => reject_argument(ChatCommand::Close, argument, "/close"),
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn reject_argument(command: ChatCommand, argument: Option<&str>, name: &str) -> ChatCommand {
    if argument.is_some() {
        ChatCommand::Invalid(format!("{} takes no argument", name))
    } else {
        command
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                   Start a new session (transcript is cleared)
  /clear                 Clear the visible transcript
  /history               Reload the transcript from the server
  /session               Show details of the current session
  /close                 Close the current session
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
