//! HttpAnswerBackend - REST implementation of the answer capability.
//!
//! Posts the capture as JSON to a configured endpoint and parses the
//! reply into an `AnswerPayload`. Any non-success status or malformed
//! body becomes a recoverable `BackendError`, never a crash.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use tutor_core::agent::{AgentRequest, AnswerBackend, AnswerPayload, BackendError, QuizItem};
use tutor_infrastructure::AppConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend implementation that talks to the remote answer service over
/// HTTP.
#[derive(Clone)]
pub struct HttpAnswerBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAnswerBackend {
    /// Creates a backend for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Creates a backend with an explicit per-request timeout.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::request(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        })
    }

    /// Builds a backend from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let mut backend = Self::with_timeout(
            config.backend_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        backend.api_key = config.api_key.clone();
        Ok(backend)
    }

    /// Adds a bearer key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl AnswerBackend for HttpAnswerBackend {
    fn description(&self) -> &str {
        "HTTP answer service"
    }

    async fn generate(&self, request: &AgentRequest) -> Result<AnswerPayload, BackendError> {
        let body = AnswerHttpRequest::from(request);

        let mut http_request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(|err| BackendError::Request {
            status_code: None,
            message: format!("Answer service request failed: {err}"),
            is_retryable: err.is_connect() || err.is_timeout(),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: AnswerHttpResponse = response.json().await.map_err(|err| {
            BackendError::MalformedResponse(format!("Failed to parse answer reply: {err}"))
        })?;

        parsed.into_payload()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerHttpRequest<'a> {
    subject: &'a str,
    agent_kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_payload: Option<&'a str>,
}

impl<'a> From<&'a AgentRequest> for AnswerHttpRequest<'a> {
    fn from(request: &'a AgentRequest) -> Self {
        Self {
            subject: request.subject.label(),
            agent_kind: request.agent_kind.as_str(),
            input_text: request.input_text.as_deref(),
            image_payload: request.image_payload.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct AnswerHttpResponse {
    answer: Option<String>,
    hint: Option<String>,
    practice: Option<String>,
    quiz: Option<QuizDto>,
    summary: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizDto {
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_index: usize,
}

impl AnswerHttpResponse {
    fn into_payload(self) -> Result<AnswerPayload, BackendError> {
        let payload = AnswerPayload {
            answer: self.answer.unwrap_or_default(),
            hint: self.hint.unwrap_or_default(),
            practice: self.practice.unwrap_or_default(),
            quiz: self.quiz.map(|q| QuizItem {
                question: q.question,
                options: q.options,
                correct_index: q.correct_index,
            }),
            summary: self.summary.unwrap_or_default(),
        };
        if payload.answer.is_empty()
            && payload.hint.is_empty()
            && payload.practice.is_empty()
            && payload.summary.is_empty()
        {
            return Err(BackendError::EmptyContent);
        }
        Ok(payload)
    }
}

fn map_http_error(status: StatusCode, body: String) -> BackendError {
    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );
    BackendError::Request {
        status_code: Some(status.as_u16()),
        message: body,
        is_retryable,
    }
}
