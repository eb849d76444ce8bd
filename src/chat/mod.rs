//! Chat session module for conversations with the support desk.
//!
//! This module provides the session core behind the deskchat binary. It
//! supports:
//!
//! - Session lifecycle (create, reset, close)
//! - Sending chat turns with FAQ annotations and escalation notices
//! - History loading and transcript management
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core session state and API interaction
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, SessionStats};
