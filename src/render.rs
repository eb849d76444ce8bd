//! Output rendering for the chat session.
//!
//! The session core never touches a display surface directly. It emits
//! transcript and state changes through the [`Renderer`] trait, and a
//! presentation layer decides how to show them. [`PlainTextRenderer`] is the
//! terminal implementation used by the deskchat binary.

use std::io::{self, Stdout, Write};

use crate::types::{EscalationInfo, Message, SessionId};

/// ANSI escape code for dim text (used for timestamps and badges).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for user messages in replays).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for escalation notices).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for FAQ match badges).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering transcript and session-state changes.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - A GUI layer subscribing to transcript events
pub trait Renderer: Send {
    /// Called when a message is appended to the transcript.
    ///
    /// This covers user messages, bot replies (with any FAQ annotation), and
    /// inline error notices.
    fn message_appended(&mut self, message: &Message);

    /// Called when the whole transcript is replaced, e.g. by a history load.
    ///
    /// `messages` is the new transcript in display order, welcome banner
    /// first when one is set.
    fn transcript_replaced(&mut self, messages: &[&Message]);

    /// Called when the visible transcript is cleared.
    fn transcript_cleared(&mut self);

    /// Called when the live session changes.
    ///
    /// `None` means the session is absent (reset, or creation failed).
    fn session_changed(&mut self, session_id: Option<&SessionId>);

    /// Called when a reply carries an escalation ticket.
    fn notice_escalation(&mut self, info: &EscalationInfo);

    /// Print an error message outside the transcript.
    fn print_error(&mut self, error: &str);

    /// Print an informational message outside the transcript.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Writes directly to stdout. User messages are skipped during live appends
/// (the terminal already shows what the user typed) but shown in full
/// transcript replays.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn render_message(&mut self, message: &Message, replay: bool) {
        if message.error {
            if self.use_color {
                println!("{ANSI_RED}! {}{ANSI_RESET}", message.content);
            } else {
                println!("! {}", message.content);
            }
            self.flush();
            return;
        }

        if message.role.is_user() {
            if replay {
                if self.use_color {
                    println!("{ANSI_CYAN}You:{ANSI_RESET} {}", message.content);
                } else {
                    println!("You: {}", message.content);
                }
                self.flush();
            }
            return;
        }

        println!("Bot: {}", message.content);
        if let Some(faq) = message.faq {
            if self.use_color {
                println!("{ANSI_GREEN}  [FAQ match ({}%)]{ANSI_RESET}", faq.confidence);
            } else {
                println!("  [FAQ match ({}%)]", faq.confidence);
            }
        }
        self.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn message_appended(&mut self, message: &Message) {
        self.render_message(message, false);
    }

    fn transcript_replaced(&mut self, messages: &[&Message]) {
        for message in messages {
            self.render_message(message, true);
        }
    }

    fn transcript_cleared(&mut self) {
        if self.use_color {
            println!("{ANSI_DIM}[transcript cleared]{ANSI_RESET}");
        } else {
            println!("[transcript cleared]");
        }
        self.flush();
    }

    fn session_changed(&mut self, session_id: Option<&SessionId>) {
        let line = match session_id {
            Some(id) => format!("[session: {}...]", id.short()),
            None => "[no session]".to_string(),
        };
        if self.use_color {
            println!("{ANSI_DIM}{line}{ANSI_RESET}");
        } else {
            println!("{line}");
        }
        self.flush();
    }

    fn notice_escalation(&mut self, info: &EscalationInfo) {
        let header = "Escalated to human support";
        if self.use_color {
            println!("{ANSI_YELLOW}[{header}]{ANSI_RESET}");
            println!("{ANSI_YELLOW}  ticket:   {}{ANSI_RESET}", info.ticket_id);
            println!("{ANSI_YELLOW}  priority: {}{ANSI_RESET}", info.priority);
        } else {
            println!("[{header}]");
            println!("  ticket:   {}", info.ticket_id);
            println!("  priority: {}", info.priority);
        }
        if let Some(reason) = &info.reason {
            if self.use_color {
                println!("{ANSI_YELLOW}  reason:   {reason}{ANSI_RESET}");
            } else {
                println!("  reason:   {reason}");
            }
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }
}
