use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::observability;
use crate::types::{
    ChatHistory, ChatRequest, ChatResponse, SessionClosed, SessionId, SessionInfo,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The wire seam between the session core and the chat service.
///
/// [`SupportDesk`] is the HTTP implementation; tests substitute scripted
/// implementations so transcript semantics can be exercised without a server.
#[async_trait::async_trait]
pub trait SupportApi: Send + Sync {
    /// Obtain a fresh session from `POST /session/new`.
    async fn create_session(&self) -> Result<SessionInfo>;

    /// Look up session details via `GET /session/{session_id}`.
    async fn session_info(&self, session_id: &SessionId) -> Result<SessionInfo>;

    /// Close a session via `DELETE /session/{session_id}`.
    async fn close_session(&self, session_id: &SessionId) -> Result<SessionClosed>;

    /// Post a chat turn via `POST /chat`.
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Fetch stored turns via `GET /chat/history/{session_id}`.
    async fn history(&self, session_id: &SessionId) -> Result<ChatHistory>;
}

/// HTTP client for the support-desk chat API.
#[derive(Debug, Clone)]
pub struct SupportDesk {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl SupportDesk {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the
    /// DESKCHAT_BASE_URL environment variable; otherwise the default
    /// (`http://localhost:8000/`) is used.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("DESKCHAT_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL requests are issued against. Always ends with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Map a transport-level reqwest failure onto our error taxonomy.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response, resource_id: Option<String>) -> Error {
        let status_code = response.status().as_u16();

        // The server reports errors as a JSON body with a "detail" field.
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| error_body.clone());

        match status_code {
            400 => Error::bad_request(error_message),
            404 => Error::not_found(error_message, resource_id),
            408 => Error::timeout(error_message, None),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message),
            _ => Error::api(status_code, error_message),
        }
    }

    /// Issue a request and decode a successful JSON body.
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource_id: Option<String>,
    ) -> Result<T> {
        observability::CLIENT_REQUESTS.click();

        let response = request
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.transport_error(e)
            })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response, resource_id).await);
        }

        response.json::<T>().await.map_err(|e| {
            observability::CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl SupportApi for SupportDesk {
    async fn create_session(&self) -> Result<SessionInfo> {
        observability::SESSION_CREATES.click();
        let url = format!("{}session/new", self.base_url);
        self.execute(self.client.post(&url), None).await
    }

    async fn session_info(&self, session_id: &SessionId) -> Result<SessionInfo> {
        let url = format!("{}session/{}", self.base_url, session_id);
        self.execute(self.client.get(&url), Some(session_id.to_string()))
            .await
    }

    async fn close_session(&self, session_id: &SessionId) -> Result<SessionClosed> {
        let url = format!("{}session/{}", self.base_url, session_id);
        self.execute(self.client.delete(&url), Some(session_id.to_string()))
            .await
    }

    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        observability::CHAT_SENDS.click();
        let url = format!("{}chat", self.base_url);
        let session_id = request.session_id.to_string();
        let result: Result<ChatResponse> = self
            .execute(self.client.post(&url).json(&request), Some(session_id))
            .await;
        if result.is_err() {
            observability::CHAT_SEND_ERRORS.click();
        }
        result
    }

    async fn history(&self, session_id: &SessionId) -> Result<ChatHistory> {
        observability::HISTORY_LOADS.click();
        let url = format!("{}chat/history/{}", self.base_url, session_id);
        let result: Result<ChatHistory> = self
            .execute(self.client.get(&url), Some(session_id.to_string()))
            .await;
        if result.is_err() {
            observability::HISTORY_LOAD_ERRORS.click();
        }
        result
    }
}

/// Validate the base URL and guarantee a trailing slash so endpoint paths
/// append cleanly.
fn normalize_base_url(base_url: String) -> Result<String> {
    url::Url::parse(&base_url)?;
    if base_url.ends_with('/') {
        Ok(base_url)
    } else {
        Ok(format!("{}/", base_url))
    }
}
