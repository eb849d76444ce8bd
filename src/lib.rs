// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod render;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{SupportApi, SupportDesk};
pub use client_logger::{ClientLogger, NoopLogger};
pub use error::{Error, Result};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
