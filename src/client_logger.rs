//! Logging trait for chat client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows consumers to
//! capture API interactions passing through a [`crate::chat::ChatSession`].
//! History-load failures are reported only through this channel: the
//! transcript is left untouched and the user sees nothing.

use crate::error::Error;
use crate::types::{ChatResponse, SessionId};

/// A trait for logging chat client operations.
///
/// Implement this trait to record session lifecycle events and API failures.
///
/// # Example
///
/// ```rust,ignore
/// use deskchat::{ClientLogger, ChatResponse, SessionId};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_chat_response(&self, response: &ChatResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "reply: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a newly created session.
    fn log_session_created(&self, session_id: &SessionId) {
        _ = session_id;
    }

    /// Log a successful chat reply.
    fn log_chat_response(&self, response: &ChatResponse) {
        _ = response;
    }

    /// Log a failed operation.
    ///
    /// `operation` names the call that failed (`create_session`, `send_chat`,
    /// `load_history`).
    fn log_failure(&self, operation: &str, error: &Error) {
        _ = operation;
        _ = error;
    }
}

/// A logger that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl ClientLogger for NoopLogger {}
