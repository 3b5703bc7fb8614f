use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::error::ExchangeError;
use super::language::Language;

/// Body of `POST {api}/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
}

/// Payload returned by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub grounded: bool,
}

/// Body of `POST {api}/translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    pub content: String,
    pub target_language: Language,
}

/// Payload returned by the translate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslateReply {
    pub translated: String,
}

/// Payload returned by `GET {api}/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The question-answering and translation service, as seen by a session.
pub trait Backend {
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, ExchangeError>> + Send;

    fn translate(
        &self,
        request: &TranslateRequest,
    ) -> impl Future<Output = Result<TranslateReply, ExchangeError>> + Send;
}

/// HTTP client for the assistant service.
pub struct AssistantClient {
    client: Client,
    api_url: String,
}

impl AssistantClient {
    /// Creates a client rooted at `api_url` (e.g. `http://localhost:8000/api`).
    ///
    /// Without a timeout, requests wait as long as the transport allows.
    pub fn new(api_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url.trim_end_matches('/'))
    }

    /// Probes the service health endpoint.
    pub async fn health(&self) -> Result<HealthReport, ExchangeError> {
        let url = self.url("health");
        let request = self.client.get(&url);
        send_json(request, url).await
    }
}

impl Backend for AssistantClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        let url = self.url("chat");
        tracing::debug!(%url, scoped = request.selected_text.is_some(), "sending chat request");
        let http_request = self.client.post(&url).json(request);
        send_json(http_request, url).await
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateReply, ExchangeError> {
        let url = self.url("translate");
        tracing::debug!(%url, target = %request.target_language, "sending translate request");
        let http_request = self.client.post(&url).json(request);
        send_json(http_request, url).await
    }
}

async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: String,
) -> Result<T, ExchangeError> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(source) => return Err(ExchangeError::Transport { url, source }),
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ExchangeError::Status { url, status, body });
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(source) => return Err(ExchangeError::Transport { url, source }),
    };

    serde_json::from_str(&body).map_err(|e| ExchangeError::Decode {
        url,
        message: e.to_string(),
    })
}
