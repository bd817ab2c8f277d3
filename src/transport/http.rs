//! HTTP transport for the assistant service
//!
//! Posts JSON bodies to `{base_url}/chat`, `{base_url}/summary` and
//! `{base_url}/reset`. A non-2xx status, a connection failure, or a body
//! that does not decode all surface as the same generic
//! [`AttrangiError::RequestFailed`]; the service's error body is only logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{AttrangiError, Result};
use crate::session::SessionId;
use crate::transport::{
    ChatReply, ChatRequest, ResetAck, SessionRequest, SummaryReply, Transport,
};

const SEND_FAILED: &str = "Failed to send message";
const SUMMARY_FAILED: &str = "Failed to generate summary";
const RESET_FAILED: &str = "Failed to reset session";

/// JSON-over-HTTP [`Transport`]
///
/// No retry is attempted and, unless `timeout_seconds` is configured, no
/// timeout is applied: a request either resolves or stays pending.
///
/// # Examples
///
/// ```
/// use attrangi::config::ApiConfig;
/// use attrangi::transport::HttpTransport;
///
/// let transport = HttpTransport::new(&ApiConfig::default()).unwrap();
/// let url = transport.endpoint("chat").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:8000/chat");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse or the HTTP client
    /// cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(AttrangiError::from)?;
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(AttrangiError::Config(format!(
                "API base URL must not carry a query or fragment: {}",
                config.base_url
            ))
            .into());
        }
        // Endpoints resolve relative to the base, so its path must end in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AttrangiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            base_url = %base_url,
            timeout_seconds = ?config.timeout_seconds,
            "Initialized HTTP transport"
        );

        Ok(Self { client, base_url })
    }

    /// Base URL all endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an endpoint name such as `"chat"`
    ///
    /// # Errors
    ///
    /// Returns error if `name` does not form a valid URL against the base
    pub fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(name).map_err(AttrangiError::from)?)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        name: &str,
        body: &B,
        failure: &'static str,
    ) -> Result<Response> {
        let url = self.endpoint(name)?;
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Request could not be sent");
                AttrangiError::RequestFailed(failure.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = %status, body = %error_text, "Service returned error");
            return Err(AttrangiError::RequestFailed(failure.to_string()).into());
        }

        Ok(response)
    }

    async fn post_json<B, R>(&self, name: &str, body: &B, failure: &'static str) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.post(name, body, failure).await?;
        response.json::<R>().await.map_err(|e| {
            tracing::warn!(endpoint = %name, error = %e, "Failed to decode response");
            AttrangiError::RequestFailed(failure.to_string()).into()
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<ChatReply> {
        let request = ChatRequest {
            session_id: session_id.clone(),
            message: message.to_string(),
        };
        self.post_json("chat", &request, SEND_FAILED).await
    }

    async fn summarize(&self, session_id: &SessionId) -> Result<SummaryReply> {
        let request = SessionRequest {
            session_id: session_id.clone(),
        };
        self.post_json("summary", &request, SUMMARY_FAILED).await
    }

    async fn reset(&self, session_id: &SessionId) -> Result<ResetAck> {
        let request = SessionRequest {
            session_id: session_id.clone(),
        };
        let response = self.post("reset", &request, RESET_FAILED).await?;

        // Any acknowledgment is accepted, including an empty body.
        let text = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read reset acknowledgment");
            AttrangiError::RequestFailed(RESET_FAILED.to_string())
        })?;
        if text.trim().is_empty() {
            return Ok(ResetAck::default());
        }
        let value = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::Value::String(text.clone()));
        Ok(ResetAck(value))
    }
}
