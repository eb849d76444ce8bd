use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{EscalationInfo, Role};

/// Confidence annotation for a bot reply sourced from a matched FAQ entry.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqMatch {
    /// Match confidence as a percentage, 0-100.
    pub confidence: u8,
}

impl FaqMatch {
    /// Create a new FAQ match annotation.
    pub fn new(confidence: u8) -> Self {
        Self { confidence }
    }
}

/// One entry in the transcript.
///
/// The transcript is an append-only ordered sequence; insertion order is
/// display order. Messages are never removed individually, only by a full
/// clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// The message text.
    pub content: String,

    /// Who authored the message.
    pub role: Role,

    /// When the message entered the transcript.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,

    /// FAQ confidence annotation, if the reply came from a matched entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqMatch>,

    /// Escalation ticket attached to this reply, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<EscalationInfo>,

    /// True for inline failure notices rendered in place of a reply.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Message {
    /// Create a user message timestamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
            timestamp: OffsetDateTime::now_utc(),
            faq: None,
            escalation: None,
            error: false,
        }
    }

    /// Create a bot message timestamped now.
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
            timestamp: OffsetDateTime::now_utc(),
            faq: None,
            escalation: None,
            error: false,
        }
    }

    /// Create an inline error notice, rendered as a bot-side message.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            error: true,
            ..Self::bot(content)
        }
    }

    /// Attach an FAQ confidence annotation.
    pub fn with_faq(mut self, faq: FaqMatch) -> Self {
        self.faq = Some(faq);
        self
    }

    /// Attach escalation details.
    pub fn with_escalation(mut self, escalation: EscalationInfo) -> Self {
        self.escalation = Some(escalation);
        self
    }
}
