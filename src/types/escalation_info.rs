use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Priority assigned to an escalation ticket.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Urgent keywords were detected in the conversation.
    High,

    /// Long-running conversation without urgency markers.
    Medium,

    /// Everything else.
    Normal,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Normal => write!(f, "normal"),
        }
    }
}

/// Error returned when parsing an invalid priority string.
#[derive(Debug)]
pub struct PriorityParseError(pub String);

impl fmt::Display for PriorityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority: {}", self.0)
    }
}

impl std::error::Error for PriorityParseError {}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "normal" => Ok(Priority::Normal),
            other => Err(PriorityParseError(other.to_string())),
        }
    }
}

/// Details of a handoff to human support.
///
/// Transient: this exists to populate a notice in the presentation layer and
/// is never persisted client-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalationInfo {
    /// The support ticket reference (e.g. `ESC-20260829-120000`).
    pub ticket_id: String,

    /// Ticket priority.
    pub priority: Priority,

    /// Why the conversation was escalated, if the server included it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Server-generated conversation summary, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Ticket processing status (e.g. `pending`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// ISO 8601 timestamp of the handoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_at: Option<String>,
}

impl EscalationInfo {
    /// Create an `EscalationInfo` with only the required fields.
    pub fn new(ticket_id: impl Into<String>, priority: Priority) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            priority,
            reason: None,
            summary: None,
            status: None,
            escalated_at: None,
        }
    }
}
