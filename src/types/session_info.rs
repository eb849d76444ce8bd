use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Server-side view of a chat session.
///
/// Returned by `POST /session/new` and `GET /session/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    /// The opaque session identifier.
    pub session_id: SessionId,

    /// ISO 8601 creation timestamp, as the server formats it.
    pub created_at: String,

    /// False once the session has been closed.
    pub is_active: bool,

    /// True once the conversation has been handed to human support.
    pub escalated: bool,

    /// Number of messages stored for the session.
    pub message_count: u64,
}

/// Acknowledgement returned by `DELETE /session/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClosed {
    /// Human-readable confirmation.
    pub message: String,

    /// The session that was closed.
    pub session_id: SessionId,
}
