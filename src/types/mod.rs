// Public modules
pub mod chat_history;
pub mod chat_request;
pub mod chat_response;
pub mod escalation_info;
pub mod message;
pub mod role;
pub mod session_id;
pub mod session_info;

// Re-exports
pub use chat_history::{ChatHistory, HistoryMessage};
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use escalation_info::{EscalationInfo, Priority, PriorityParseError};
pub use message::{FaqMatch, Message};
pub use role::{Role, RoleParseError};
pub use session_id::SessionId;
pub use session_info::{SessionClosed, SessionInfo};
