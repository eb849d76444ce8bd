use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The session the message belongs to.
    pub session_id: SessionId,

    /// The user's message text.
    pub message: String,
}

impl ChatRequest {
    /// Create a new chat request.
    pub fn new(session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
        }
    }
}
