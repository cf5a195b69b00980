//! Scan flow configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::capture::CaptureRequest;
use super::error::{Result, ScanError};

pub const ENV_API_KEY: &str = "CCG_COMPANION_VISION_API_KEY";
pub const ENV_MODEL: &str = "CCG_COMPANION_VISION_MODEL";
pub const ENV_CARD_API: &str = "CCG_COMPANION_CARD_API";
pub const ENV_TIMEOUT_SECS: &str = "CCG_COMPANION_TIMEOUT_SECS";

pub const DEFAULT_VISION_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_CARD_API: &str = "https://api.scryfall.com";
pub const DEFAULT_PROMPT: &str = "What is the name of the trading card? Answer only with the name.";

/// Endpoints, credentials and limits for scanning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Key for the image-understanding API.
    pub api_key: String,

    /// Base URL of the image-understanding API.
    pub vision_url: String,

    /// Model asked to read the card.
    pub vision_model: String,

    /// Instruction sent alongside the image.
    pub prompt: String,

    /// Base URL of the card database.
    pub card_api_url: String,

    /// Upper bound on each step of a scan.
    pub request_timeout: Duration,

    pub capture: CaptureRequest,
}

impl ScanConfig {
    /// Default endpoints with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            vision_url: DEFAULT_VISION_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            card_api_url: DEFAULT_CARD_API.to_string(),
            request_timeout: Duration::from_secs(15),
            capture: CaptureRequest::default(),
        }
    }

    /// Read configuration from the environment.
    ///
    /// The API key is required; model, card API and timeout fall back to
    /// defaults. An unparsable timeout is ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ScanError::MissingConfig(ENV_API_KEY))?;

        let mut config = Self::new(api_key);
        if let Some(model) = lookup(ENV_MODEL) {
            config.vision_model = model;
        }
        if let Some(url) = lookup(ENV_CARD_API) {
            config.card_api_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_vision_url(mut self, url: impl Into<String>) -> Self {
        self.vision_url = url.into();
        self
    }

    #[must_use]
    pub fn with_card_api_url(mut self, url: impl Into<String>) -> Self {
        self.card_api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_capture(mut self, capture: CaptureRequest) -> Self {
        self.capture = capture;
        self
    }
}
