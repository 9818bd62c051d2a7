use std::time::Duration;

use futures_util::StreamExt;
use manual_core::ManualStructure;
use manual_logging::{manual_debug, manual_info, manual_warn};
use serde_json::Value;

use crate::prompt::request_body;
use crate::validate::{extract_response_text, parse_service_error, parse_structure};
use crate::{FailureKind, Milestone, StructuringError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub thinking_budget: u32,
    pub search_grounding: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            thinking_budget: 32_768,
            search_grounding: true,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Receives lifecycle milestones of a single structuring call.
pub trait ProgressSink: Send + Sync {
    fn milestone(&self, milestone: Milestone);
}

/// Sink for callers that do not track milestones.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn milestone(&self, _milestone: Milestone) {}
}

#[async_trait::async_trait]
pub trait StructuringClient: Send + Sync {
    /// Asks the structuring service for a manual layout of `target_url`.
    async fn request_structure(
        &self,
        target_url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ManualStructure, StructuringError>;
}

pub fn generate_content_endpoint(base_url: &str, model: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!("{base_url}/models/{model}:generateContent")
}

/// Structuring client backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, StructuringError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| StructuringError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, StructuringError> {
        let max_bytes = self.settings.max_response_bytes;
        let too_large = || {
            StructuringError::new(FailureKind::TooLarge { max_bytes }, "response too large")
        };
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(too_large());
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        String::from_utf8(bytes)
            .map_err(|err| StructuringError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl StructuringClient for GeminiClient {
    async fn request_structure(
        &self,
        target_url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ManualStructure, StructuringError> {
        let target_url = target_url.trim();
        if target_url.is_empty() {
            return Err(StructuringError::new(
                FailureKind::InvalidInput,
                "target url is empty",
            ));
        }
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                StructuringError::new(FailureKind::MissingCredential, "no api key configured")
            })?;

        let endpoint = generate_content_endpoint(&self.settings.base_url, &self.settings.model);
        let body = request_body(
            target_url,
            self.settings.thinking_budget,
            self.settings.search_grounding,
        );
        manual_info!(
            "Requesting structure model={} url_len={} url={}",
            self.settings.model,
            target_url.len(),
            target_url
        );

        let response = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let raw = self.read_body(response).await?;
        sink.milestone(Milestone::ResponseReceived);

        if !status.is_success() {
            let message = parse_service_error(&raw).unwrap_or_else(|| status.to_string());
            manual_warn!("Structuring service returned {}: {}", status, message);
            return Err(StructuringError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let envelope: Value = serde_json::from_str(&raw)
            .map_err(|err| StructuringError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let text = extract_response_text(&envelope);
        manual_debug!(
            "Structuring reply received, text_len={}",
            text.as_ref().map_or(0, String::len)
        );

        parse_structure(text.as_deref()).inspect_err(|err| {
            manual_warn!("Could not parse structuring reply: {}", err);
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StructuringError {
    if err.is_timeout() {
        return StructuringError::new(FailureKind::Timeout, err.to_string());
    }
    StructuringError::new(FailureKind::Network, err.to_string())
}
