//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the session
//! identifier and the transcript, and drives the support-desk API.

use std::sync::Arc;

use crate::chat::config::ChatConfig;
use crate::client::SupportApi;
use crate::client_logger::{ClientLogger, NoopLogger};
use crate::error::{Error, Result};
use crate::observability;
use crate::render::Renderer;
use crate::types::{ChatRequest, Message, SessionClosed, SessionId, SessionInfo};

/// Inline notice appended when session creation fails.
const SESSION_CREATE_ERROR: &str = "Failed to create a session. Please try again.";

/// Inline notice appended when a send fails.
const SEND_ERROR: &str = "Sorry, I encountered an error. Please try again.";

/// A chat session against the support-desk API.
///
/// The session holds the live session id (absent until the first successful
/// creation), the transcript, and the waiting flag that serializes sends.
/// All state changes are emitted through a [`Renderer`] so the presentation
/// layer stays out of this module.
///
/// Every operation fails soft: errors become inline transcript notices or
/// logger entries, and the session remains usable afterwards.
pub struct ChatSession<C: SupportApi> {
    client: C,
    config: ChatConfig,
    session_id: Option<SessionId>,
    welcome: Option<Message>,
    messages: Vec<Message>,
    waiting: bool,
    sends: u64,
    send_failures: u64,
    sessions_created: u64,
    logger: Arc<dyn ClientLogger>,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The live session id, if any.
    pub session_id: Option<SessionId>,

    /// Number of visible transcript entries, welcome banner included.
    pub message_count: usize,

    /// Chat turns attempted.
    pub sends: u64,

    /// Chat turns that failed.
    pub send_failures: u64,

    /// Sessions created over the lifetime of this instance.
    pub sessions_created: u64,

    /// True while a send is in flight.
    pub waiting: bool,
}

impl<C: SupportApi> ChatSession<C> {
    /// Creates a new chat session with the given client and configuration.
    pub fn new(client: C, config: ChatConfig) -> Self {
        let welcome = config.welcome.clone().map(Message::bot);
        Self {
            client,
            config,
            session_id: None,
            welcome,
            messages: Vec::new(),
            waiting: false,
            sends: 0,
            send_failures: 0,
            sessions_created: 0,
            logger: Arc::new(NoopLogger),
        }
    }

    /// Attaches a logger that observes API interactions and failures.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// The live session id, if one exists.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// True while a send is in flight. Callers should treat input as
    /// disabled for the duration.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// The visible transcript in display order, welcome banner first.
    pub fn transcript(&self) -> Vec<&Message> {
        self.welcome.iter().chain(self.messages.iter()).collect()
    }

    /// Number of visible transcript entries, welcome banner included.
    pub fn message_count(&self) -> usize {
        self.messages.len() + usize::from(self.welcome.is_some())
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Obtains a fresh session id from the server.
    ///
    /// On success the id is stored and announced through the renderer. On
    /// failure the session is left absent, an inline error notice is appended,
    /// and the error is returned. There is no retry.
    pub async fn create_session(&mut self, renderer: &mut dyn Renderer) -> Result<SessionId> {
        match self.client.create_session().await {
            Ok(info) => {
                let id = info.session_id;
                self.session_id = Some(id.clone());
                self.sessions_created += 1;
                self.logger.log_session_created(&id);
                renderer.session_changed(Some(&id));
                Ok(id)
            }
            Err(err) => {
                self.session_id = None;
                self.logger.log_failure("create_session", &err);
                renderer.session_changed(None);
                self.append(Message::error(SESSION_CREATE_ERROR), renderer);
                Err(err)
            }
        }
    }

    /// Sends a user message and appends the bot's reply.
    ///
    /// If no session exists one is created first; if that fails the message
    /// is not sent. While the request is in flight the waiting flag is set,
    /// and a second send attempt is a no-op, so at most one outbound message
    /// is ever pending. On failure exactly one inline error notice is
    /// appended and the waiting flag is cleared; the transcript never gains
    /// the unsent bot reply.
    pub async fn send_message(&mut self, text: &str, renderer: &mut dyn Renderer) -> Result<()> {
        if self.waiting {
            return Ok(());
        }

        let session_id = match &self.session_id {
            Some(id) => id.clone(),
            None => self.create_session(renderer).await?,
        };

        self.append(Message::user(text), renderer);
        self.sends += 1;
        self.waiting = true;
        let result = self
            .client
            .send_chat(ChatRequest::new(session_id, text))
            .await;
        self.waiting = false;

        match result {
            Ok(response) => {
                self.logger.log_chat_response(&response);
                let escalation = response.escalation().cloned();
                let mut reply = Message::bot(response.response.as_str());
                if let Some(faq) = response.faq_match() {
                    reply = reply.with_faq(faq);
                }
                if let Some(info) = &escalation {
                    reply = reply.with_escalation(info.clone());
                }
                self.append(reply, renderer);
                if let Some(info) = &escalation {
                    observability::CHAT_ESCALATIONS.click();
                    renderer.notice_escalation(info);
                }
                Ok(())
            }
            Err(err) => {
                self.send_failures += 1;
                self.logger.log_failure("send_chat", &err);
                self.append(Message::error(SEND_ERROR), renderer);
                Err(err)
            }
        }
    }

    /// Replaces the transcript with the server's stored history.
    ///
    /// The welcome banner is preserved and the fetched messages are rendered
    /// in the order received. On failure the transcript is left untouched and
    /// the error is reported only to the logger. No-op when no session
    /// exists.
    pub async fn load_history(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(());
        };

        match self.client.history(&session_id).await {
            Ok(history) => {
                self.messages = history.into_transcript();
                renderer.transcript_replaced(&self.transcript());
                Ok(())
            }
            Err(err) => {
                self.logger.log_failure("load_history", &err);
                Ok(())
            }
        }
    }

    /// Discards the current session and transcript, then creates a fresh
    /// session. Always issues a new creation call even if an id existed.
    pub async fn reset_session(&mut self, renderer: &mut dyn Renderer) -> Result<SessionId> {
        observability::SESSION_RESETS.click();
        self.session_id = None;
        self.messages.clear();
        renderer.transcript_cleared();
        renderer.session_changed(None);
        self.create_session(renderer).await
    }

    /// Clears the visible transcript without touching the session id. The
    /// welcome banner is preserved.
    pub fn clear_transcript(&mut self, renderer: &mut dyn Renderer) {
        self.messages.clear();
        renderer.transcript_cleared();
    }

    /// Fetches server-side details for the live session.
    pub async fn session_info(&self) -> Result<SessionInfo> {
        let session_id = self.require_session()?;
        self.client.session_info(&session_id).await
    }

    /// Closes the live session server-side. The local id is kept so the
    /// caller can still inspect it; a subsequent reset starts fresh.
    pub async fn close_session(&self) -> Result<SessionClosed> {
        let session_id = self.require_session()?;
        self.client.close_session(&session_id).await
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.session_id.clone(),
            message_count: self.message_count(),
            sends: self.sends,
            send_failures: self.send_failures,
            sessions_created: self.sessions_created,
            waiting: self.waiting,
        }
    }

    fn require_session(&self) -> Result<SessionId> {
        self.session_id.clone().ok_or_else(|| {
            Error::validation("no live session", Some("session_id".to_string()))
        })
    }

    fn append(&mut self, message: Message, renderer: &mut dyn Renderer) {
        renderer.message_appended(&message);
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::types::{
        ChatHistory, ChatResponse, EscalationInfo, HistoryMessage, Priority, Role,
    };

    /// Scripted stand-in for the HTTP client.
    #[derive(Default)]
    struct MockApi {
        calls: Mutex<Vec<&'static str>>,
        sessions: Mutex<VecDeque<Result<SessionInfo>>>,
        chats: Mutex<VecDeque<Result<ChatResponse>>>,
        histories: Mutex<VecDeque<Result<ChatHistory>>>,
    }

    impl MockApi {
        fn script_session(self, result: Result<SessionInfo>) -> Self {
            self.sessions.lock().unwrap().push_back(result);
            self
        }

        fn script_chat(self, result: Result<ChatResponse>) -> Self {
            self.chats.lock().unwrap().push_back(result);
            self
        }

        fn script_history(self, result: Result<ChatHistory>) -> Self {
            self.histories.lock().unwrap().push_back(result);
            self
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl SupportApi for &MockApi {
        async fn create_session(&self) -> Result<SessionInfo> {
            self.calls.lock().unwrap().push("create_session");
            self.sessions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::unknown("create_session not scripted")))
        }

        async fn session_info(&self, _: &SessionId) -> Result<SessionInfo> {
            self.calls.lock().unwrap().push("session_info");
            Err(Error::unknown("session_info not scripted"))
        }

        async fn close_session(&self, _: &SessionId) -> Result<SessionClosed> {
            self.calls.lock().unwrap().push("close_session");
            Err(Error::unknown("close_session not scripted"))
        }

        async fn send_chat(&self, _: ChatRequest) -> Result<ChatResponse> {
            self.calls.lock().unwrap().push("send_chat");
            self.chats
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::unknown("send_chat not scripted")))
        }

        async fn history(&self, _: &SessionId) -> Result<ChatHistory> {
            self.calls.lock().unwrap().push("history");
            self.histories
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::unknown("history not scripted")))
        }
    }

    /// Renderer that records every event it sees.
    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn message_appended(&mut self, message: &Message) {
            self.events.push(format!("append:{}", message.content));
        }

        fn transcript_replaced(&mut self, messages: &[&Message]) {
            self.events.push(format!("replace:{}", messages.len()));
        }

        fn transcript_cleared(&mut self) {
            self.events.push("clear".to_string());
        }

        fn session_changed(&mut self, session_id: Option<&SessionId>) {
            self.events.push(format!(
                "session:{}",
                session_id.map(|id| id.as_str()).unwrap_or("-")
            ));
        }

        fn notice_escalation(&mut self, info: &EscalationInfo) {
            self.events.push(format!("escalation:{}", info.ticket_id));
        }

        fn print_error(&mut self, error: &str) {
            self.events.push(format!("error:{error}"));
        }

        fn print_info(&mut self, info: &str) {
            self.events.push(format!("info:{info}"));
        }
    }

    fn session_info(id: &str) -> SessionInfo {
        SessionInfo {
            session_id: SessionId::new(id),
            created_at: "2026-08-29T09:00:00".to_string(),
            is_active: true,
            escalated: false,
            message_count: 0,
        }
    }

    fn chat_response(text: &str) -> ChatResponse {
        ChatResponse {
            session_id: SessionId::new("s-1"),
            response: text.to_string(),
            faq_matched: false,
            confidence: None,
            escalated: false,
            escalation_info: None,
        }
    }

    fn contents(session: &ChatSession<&MockApi>) -> Vec<String> {
        session
            .transcript()
            .iter()
            .map(|m| m.content.clone())
            .collect()
    }

    #[tokio::test]
    async fn send_without_session_creates_one_first() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("hi")));
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.send_message("hello", &mut renderer).await.unwrap();

        assert_eq!(api.calls(), vec!["create_session", "send_chat"]);
        assert_eq!(session.session_id(), Some(&SessionId::new("s-1")));
    }

    #[tokio::test]
    async fn send_with_session_skips_creation() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("first")))
            .script_chat(Ok(chat_response("second")));
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.send_message("one", &mut renderer).await.unwrap();
        session.send_message("two", &mut renderer).await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["create_session", "send_chat", "send_chat"]
        );
    }

    #[tokio::test]
    async fn send_while_waiting_is_a_noop() {
        let api = MockApi::default();
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.waiting = true;
        session.send_message("hello", &mut renderer).await.unwrap();

        assert!(api.calls().is_empty());
        assert_eq!(session.message_count(), 1); // only the welcome banner
    }

    #[tokio::test]
    async fn failed_session_creation_aborts_the_send() {
        let api = MockApi::default().script_session(Err(Error::connection("refused", None)));
        let mut session =
            ChatSession::new(&api, ChatConfig::new().with_welcome(None));
        let mut renderer = RecordingRenderer::default();

        let err = session.send_message("hello", &mut renderer).await.unwrap_err();

        assert!(err.is_connection());
        assert_eq!(api.calls(), vec!["create_session"]);
        assert!(session.session_id().is_none());
        // Only the creation failure notice; the user message was never posted.
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        assert!(transcript[0].error);
    }

    #[tokio::test]
    async fn failed_send_appends_one_error_and_reenables_input() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Err(Error::internal_server("boom")));
        let mut session =
            ChatSession::new(&api, ChatConfig::new().with_welcome(None));
        let mut renderer = RecordingRenderer::default();

        let err = session.send_message("hello", &mut renderer).await.unwrap_err();

        assert!(err.is_server_error());
        assert!(!session.is_waiting());
        let transcript = session.transcript();
        assert_eq!(contents(&session), vec!["hello", SEND_ERROR]);
        assert!(!transcript[0].error);
        assert!(transcript[1].error);
        assert_eq!(transcript[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn faq_reply_is_annotated_with_confidence() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(ChatResponse {
                faq_matched: true,
                confidence: Some(92),
                ..chat_response("hi")
            }));
        let mut session =
            ChatSession::new(&api, ChatConfig::new().with_welcome(None));
        let mut renderer = RecordingRenderer::default();

        session.send_message("hello", &mut renderer).await.unwrap();

        assert_eq!(contents(&session), vec!["hello", "hi"]);
        let transcript = session.transcript();
        assert_eq!(transcript[1].faq.map(|f| f.confidence), Some(92));
    }

    #[tokio::test]
    async fn escalated_reply_surfaces_the_ticket() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(ChatResponse {
                escalated: true,
                escalation_info: Some(EscalationInfo::new("ESC-7", Priority::High)),
                ..chat_response("Escalating.")
            }));
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.send_message("urgent!", &mut renderer).await.unwrap();

        assert!(renderer.events.contains(&"escalation:ESC-7".to_string()));
        let transcript = session.transcript();
        let reply = transcript.last().unwrap();
        assert_eq!(reply.escalation.as_ref().unwrap().ticket_id, "ESC-7");
    }

    #[tokio::test]
    async fn history_replaces_transcript_and_preserves_banner() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("stale")))
            .script_history(Ok(ChatHistory {
                session_id: SessionId::new("s-1"),
                messages: vec![
                    HistoryMessage {
                        role: Role::User,
                        content: "old question".to_string(),
                        timestamp: None,
                        faq_matched: false,
                    },
                    HistoryMessage {
                        role: Role::Assistant,
                        content: "old answer".to_string(),
                        timestamp: None,
                        faq_matched: false,
                    },
                ],
            }));
        let config = ChatConfig::new().with_welcome(Some("welcome!".to_string()));
        let mut session = ChatSession::new(&api, config);
        let mut renderer = RecordingRenderer::default();

        session.send_message("hello", &mut renderer).await.unwrap();
        session.load_history(&mut renderer).await.unwrap();

        assert_eq!(
            contents(&session),
            vec!["welcome!", "old question", "old answer"]
        );
    }

    #[tokio::test]
    async fn failed_history_load_is_silent() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("hi")))
            .script_history(Err(Error::internal_server("boom")));
        let mut session =
            ChatSession::new(&api, ChatConfig::new().with_welcome(None));
        let mut renderer = RecordingRenderer::default();

        session.send_message("hello", &mut renderer).await.unwrap();
        let before = contents(&session);
        session.load_history(&mut renderer).await.unwrap();

        assert_eq!(contents(&session), before);
        assert!(!renderer.events.iter().any(|e| e.starts_with("replace")));
    }

    #[tokio::test]
    async fn history_without_session_is_a_noop() {
        let api = MockApi::default();
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.load_history(&mut renderer).await.unwrap();

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn reset_always_creates_a_fresh_session() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("hi")))
            .script_session(Ok(session_info("s-2")))
            .script_chat(Ok(chat_response("again")));
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.send_message("hello", &mut renderer).await.unwrap();
        assert_eq!(session.session_id(), Some(&SessionId::new("s-1")));

        session.reset_session(&mut renderer).await.unwrap();
        session.send_message("x", &mut renderer).await.unwrap();

        assert_eq!(session.session_id(), Some(&SessionId::new("s-2")));
        let creates = api
            .calls()
            .iter()
            .filter(|c| **c == "create_session")
            .count();
        assert_eq!(creates, 2);
        assert_eq!(
            api.calls(),
            vec!["create_session", "send_chat", "create_session", "send_chat"]
        );
    }

    #[tokio::test]
    async fn clear_keeps_banner_and_session() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("hi")));
        let config = ChatConfig::new().with_welcome(Some("welcome!".to_string()));
        let mut session = ChatSession::new(&api, config);
        let mut renderer = RecordingRenderer::default();

        session.send_message("hello", &mut renderer).await.unwrap();
        assert_eq!(session.message_count(), 3);

        session.clear_transcript(&mut renderer);

        assert_eq!(contents(&session), vec!["welcome!"]);
        assert_eq!(session.session_id(), Some(&SessionId::new("s-1")));
    }

    #[tokio::test]
    async fn stats_snapshot() {
        let api = MockApi::default()
            .script_session(Ok(session_info("s-1")))
            .script_chat(Ok(chat_response("hi")))
            .script_chat(Err(Error::internal_server("boom")));
        let mut session = ChatSession::new(&api, ChatConfig::new());
        let mut renderer = RecordingRenderer::default();

        session.send_message("one", &mut renderer).await.unwrap();
        let _ = session.send_message("two", &mut renderer).await;

        let stats = session.stats();
        assert_eq!(stats.session_id, Some(SessionId::new("s-1")));
        assert_eq!(stats.sends, 2);
        assert_eq!(stats.send_failures, 1);
        assert_eq!(stats.sessions_created, 1);
        assert!(!stats.waiting);
    }

    #[tokio::test]
    async fn session_info_without_session_is_a_validation_error() {
        let api = MockApi::default();
        let session = ChatSession::new(&api, ChatConfig::new());
        let err = session.session_info().await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(api.calls().is_empty());
    }
}
