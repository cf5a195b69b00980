//! Reading a card's name from a photo.

use std::future::Future;

use serde_json::{json, Value};
use tracing::debug;

use super::capture::CapturedImage;
use super::config::ScanConfig;
use super::error::{Result, ScanError, ScanStage};

/// Something that can read a card name off an image.
pub trait CardNameRecognizer {
    /// Best guess at the card's name. `ScanError::NoTextRecognized` when
    /// nothing usable came back.
    fn recognize(&self, image: &CapturedImage) -> impl Future<Output = Result<String>> + Send;
}

/// Recognizer backed by the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiRecognizer {
    http: reqwest::Client,
    url: String,
    api_key: String,
    prompt: String,
}

impl GeminiRecognizer {
    pub fn new(http: reqwest::Client, config: &ScanConfig) -> Self {
        Self {
            http,
            url: format!(
                "{}/v1beta/models/{}:generateContent",
                config.vision_url.trim_end_matches('/'),
                config.vision_model
            ),
            api_key: config.api_key.clone(),
            prompt: config.prompt.clone(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CardNameRecognizer for GeminiRecognizer {
    async fn recognize(&self, image: &CapturedImage) -> Result<String> {
        let body = request_body(image, &self.prompt);
        debug!(url = %self.url, bytes = image.bytes().len(), "sending image for recognition");

        let response: Value = self
            .http
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ScanError::transport(ScanStage::Recognize, e))?
            .json()
            .await
            .map_err(|e| ScanError::transport(ScanStage::Recognize, e))?;

        extract_name(&response)
    }
}

/// Request body: the image inline as base64 JPEG, then the instruction.
#[must_use]
pub fn request_body(image: &CapturedImage, prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inline_data": { "mime_type": "image/jpeg", "data": image.to_base64() } },
                { "text": prompt }
            ]
        }]
    })
}

/// Pull the first candidate's text out of a response, trimmed.
///
/// An error envelope (`{"error": {"message": ..}}`, e.g. for a rejected
/// API key) is a transport failure, not an unreadable card.
pub fn extract_name(response: &Value) -> Result<String> {
    if let Some(message) = response.pointer("/error/message").and_then(Value::as_str) {
        return Err(ScanError::transport(ScanStage::Recognize, message));
    }
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(ScanError::NoTextRecognized)
}
