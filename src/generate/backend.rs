//! Generation backend: the trait the flows run against, plus the
//! OpenAI-compatible HTTP implementation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::upload::{DataUri, UploadError};

/// Generation error types
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("backend returned an empty result for {0}")]
    EmptyResult(&'static str),

    #[error("could not parse backend reply: {0}")]
    BadPayload(String),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("context file error: {0}")]
    Upload(#[from] UploadError),
}

/// Model tier for a text call. Requests with an attached context file are
/// routed to the pro tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Standard,
    Pro,
}

/// One text-generation call.
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub system: String,
    pub user: String,
    pub tier: ModelTier,
    pub attachment: Option<DataUri>,
}

/// A text-and-image generation service.
pub trait Backend {
    fn generate_text(
        &self,
        request: &TextRequest,
    ) -> impl std::future::Future<Output = Result<String, GenerateError>>;

    fn generate_image(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<DataUri, GenerateError>>;
}

/// Model names used by the HTTP backend.
#[derive(Debug, Clone)]
pub struct ModelNames {
    pub standard: String,
    pub pro: String,
    pub image: String,
}

impl Default for ModelNames {
    fn default() -> Self {
        Self {
            standard: "gpt-4o-mini".to_string(),
            pro: "gpt-4o".to_string(),
            image: "gpt-image-1".to_string(),
        }
    }
}

/// OpenAI-compatible HTTP backend: `/chat/completions` for text and
/// `/images/generations` for images.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    models: ModelNames,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, models: ModelNames) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            models,
        }
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.models.standard,
            ModelTier::Pro => &self.models.pro,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GenerateError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(GenerateError::Api {
            status: status.as_u16(),
            message: message.chars().take(400).collect(),
        })
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

impl Backend for HttpBackend {
    async fn generate_text(&self, request: &TextRequest) -> Result<String, GenerateError> {
        // Attached context travels inline, as its data URI.
        let user_content = match &request.attachment {
            Some(uri) => format!(
                "{}\n\nThe attached context file is the primary source of information:\n{}",
                request.user,
                uri.to_uri()
            ),
            None => request.user.clone(),
        };

        let model = self.model_for(request.tier);
        debug!(model, "text generation request");

        let body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": user_content },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let parsed: ChatResponse = Self::check(response).await?.json().await?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(GenerateError::EmptyResult("text completion"));
        }
        Ok(content)
    }

    async fn generate_image(&self, prompt: &str) -> Result<DataUri, GenerateError> {
        debug!(model = %self.models.image, "image generation request");

        let body = json!({
            "model": self.models.image,
            "prompt": prompt,
            "n": 1,
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let parsed: ImageResponse = Self::check(response).await?.json().await?;

        let payload = parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .ok_or(GenerateError::EmptyResult("image generation"))?;
        let data = BASE64.decode(payload.trim())?;
        if data.is_empty() {
            return Err(GenerateError::EmptyResult("image generation"));
        }
        Ok(DataUri::new("image/png", data))
    }
}

// ============================================================
// Tests
// ============================================================
