use serde::{Deserialize, Serialize};

use crate::types::{Message, Role, SessionId};

/// One stored turn as returned by `GET /chat/history/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryMessage {
    /// Who authored the turn.
    pub role: Role,

    /// The turn's text.
    pub content: String,

    /// ISO 8601 timestamp, as the server formats it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// True when the stored reply came from a matched FAQ entry.
    #[serde(default)]
    pub faq_matched: bool,
}

/// Body returned by `GET /chat/history/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatHistory {
    /// The session the turns belong to.
    pub session_id: SessionId,

    /// Stored turns, oldest first.
    pub messages: Vec<HistoryMessage>,
}

impl ChatHistory {
    /// Convert the stored turns into transcript messages, preserving order.
    ///
    /// History entries carry no confidence score, so FAQ annotations are not
    /// reconstructed.
    pub fn into_transcript(self) -> Vec<Message> {
        self.messages
            .into_iter()
            .map(|msg| match msg.role {
                Role::User => Message::user(msg.content),
                Role::Assistant => Message::bot(msg.content),
            })
            .collect()
    }
}
