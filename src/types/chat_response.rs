use serde::{Deserialize, Serialize};

use crate::types::{EscalationInfo, FaqMatch, SessionId};

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// The session the reply belongs to.
    pub session_id: SessionId,

    /// The bot's reply text.
    pub response: String,

    /// True when the reply came from a matched FAQ entry.
    #[serde(default)]
    pub faq_matched: bool,

    /// Match confidence percentage, present when `faq_matched` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,

    /// True when the conversation was handed to human support.
    #[serde(default)]
    pub escalated: bool,

    /// Ticket details, present when `escalated` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_info: Option<EscalationInfo>,
}

impl ChatResponse {
    /// The FAQ annotation for this reply, if the server matched one and
    /// provided a confidence score.
    pub fn faq_match(&self) -> Option<FaqMatch> {
        if self.faq_matched {
            self.confidence.map(FaqMatch::new)
        } else {
            None
        }
    }

    /// The escalation ticket for this reply, if the server escalated.
    pub fn escalation(&self) -> Option<&EscalationInfo> {
        if self.escalated {
            self.escalation_info.as_ref()
        } else {
            None
        }
    }
}
