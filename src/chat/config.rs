//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

/// Default welcome banner shown at the top of every transcript.
const DEFAULT_WELCOME: &str = "Hi! I'm the support assistant. How can I help you today?";

/// Command-line arguments for the deskchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the chat service.
    #[arrrg(optional, "Base URL of the chat service (default: http://localhost:8000)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Welcome banner text.
    #[arrrg(optional, "Welcome banner text", "TEXT")]
    pub welcome: Option<String>,

    /// Suppress the welcome banner entirely.
    #[arrrg(flag, "Suppress the welcome banner")]
    pub no_welcome: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Base URL of the chat service. `None` defers to the client's
    /// environment/default resolution.
    pub base_url: Option<String>,

    /// Request timeout. `None` defers to the client default.
    pub timeout: Option<Duration>,

    /// Welcome banner text. `None` disables the banner.
    pub welcome: Option<String>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: client default (http://localhost:8000)
    /// - Timeout: client default (60s)
    /// - Welcome banner: enabled
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            welcome: Some(DEFAULT_WELCOME.to_string()),
            use_color: true,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets or disables the welcome banner.
    pub fn with_welcome(mut self, welcome: Option<String>) -> Self {
        self.welcome = welcome;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let welcome = if args.no_welcome {
            None
        } else {
            args.welcome.or_else(|| Some(DEFAULT_WELCOME.to_string()))
        };

        ChatConfig {
            base_url: args.base_url,
            timeout: args.timeout.map(Duration::from_secs),
            welcome,
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use arrrg::CommandLine;

    use super::*;

    #[test]
    fn args_from_command_line() {
        let (args, free) = ChatArgs::from_arguments(
            "deskchat [OPTIONS]",
            &[
                "--base-url",
                "http://support.example.com",
                "--timeout",
                "10",
                "--no-color",
            ],
        );
        assert_eq!(
            args.base_url.as_deref(),
            Some("http://support.example.com")
        );
        assert_eq!(args.timeout, Some(10));
        assert!(!args.no_welcome);
        assert!(args.no_color);
        assert!(free.is_empty());
    }

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert_eq!(config.welcome.as_deref(), Some(DEFAULT_WELCOME));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert!(config.base_url.is_none());
        assert_eq!(config.welcome.as_deref(), Some(DEFAULT_WELCOME));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://support.example.com".to_string()),
            timeout: Some(10),
            welcome: Some("Welcome!".to_string()),
            no_welcome: false,
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(
            config.base_url.as_deref(),
            Some("http://support.example.com")
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.welcome.as_deref(), Some("Welcome!"));
        assert!(!config.use_color);
    }

    #[test]
    fn no_welcome_wins_over_welcome_text() {
        let args = ChatArgs {
            welcome: Some("Welcome!".to_string()),
            no_welcome: true,
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert!(config.welcome.is_none());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://localhost:9000")
            .with_timeout(Duration::from_secs(5))
            .with_welcome(None)
            .without_color();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(config.welcome.is_none());
        assert!(!config.use_color);
    }
}
