//! The scan pipeline: photograph, read the name, look the card up.
//!
//! Steps run strictly one after another, each bounded by the configured
//! timeout. The first failure ends the attempt; nothing from earlier steps
//! is kept and nothing is retried.
//!
//! ```text
//!   Ready ──scan──► Scanning ──ok──► Scanned(result)
//!     ▲                │
//!     │                └──err──► Error(message)
//!     └──────── reset ◄──────────────┘
//! ```
//!
//! Timeouts use `tokio::time`, so scans must run inside a Tokio runtime.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use super::capture::{CaptureRequest, ImageSource};
use super::card::CardDetails;
use super::config::ScanConfig;
use super::error::{Result, ScanError, ScanStage};
use super::lookup::{CardLookup, ScryfallClient};
use super::vision::{CardNameRecognizer, GeminiRecognizer};

const USER_AGENT: &str = concat!("ccg-companion/", env!("CARGO_PKG_VERSION"));

/// A completed scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    /// The name as the recognizer read it.
    pub extracted_text: String,
    pub details: CardDetails,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanState {
    Ready,
    Scanning,
    Scanned(ScanResult),
    /// The attempt failed; holds the message shown to the user.
    Error(String),
}

/// Drives one scan at a time through its collaborators.
#[derive(Debug)]
pub struct ScanFlow<S, R, L> {
    source: S,
    recognizer: R,
    lookup: L,
    capture: CaptureRequest,
    timeout: Duration,
    state: ScanState,
}

impl<S, R, L> ScanFlow<S, R, L>
where
    S: ImageSource,
    R: CardNameRecognizer,
    L: CardLookup,
{
    pub fn new(source: S, recognizer: R, lookup: L, capture: CaptureRequest, timeout: Duration) -> Self {
        Self {
            source,
            recognizer,
            lookup,
            capture,
            timeout,
            state: ScanState::Ready,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// The last successful result, while it is shown.
    #[must_use]
    pub fn result(&self) -> Option<&ScanResult> {
        match &self.state {
            ScanState::Scanned(result) => Some(result),
            _ => None,
        }
    }

    /// Return to `Ready`, discarding any result or error. This also
    /// recovers a flow whose scan future was dropped mid-flight.
    pub fn reset(&mut self) {
        self.state = ScanState::Ready;
    }

    /// Run one scan. Allowed from `Ready` or `Error`.
    pub async fn scan(&mut self) -> Result<&ScanResult> {
        if !matches!(self.state, ScanState::Ready | ScanState::Error(_)) {
            return Err(ScanError::NotReady);
        }
        self.state = ScanState::Scanning;

        match self.run().await {
            Ok(result) => {
                info!(card = %result.details.card.name, "scan complete");
                self.state = ScanState::Scanned(result);
                self.result().ok_or(ScanError::NotReady)
            }
            Err(err) => {
                warn!(error = %err, "scan failed");
                self.state = ScanState::Error(err.to_string());
                Err(err)
            }
        }
    }

    async fn run(&self) -> Result<ScanResult> {
        let image = within(self.timeout, ScanStage::Capture, self.source.capture(&self.capture)).await?;
        if image.is_empty() {
            return Err(ScanError::CaptureFailed("camera returned no image data".to_string()));
        }
        info!(bytes = image.bytes().len(), "image captured");

        let name = within(self.timeout, ScanStage::Recognize, self.recognizer.recognize(&image)).await?;
        info!(%name, "card name recognized");

        let details = within(self.timeout, ScanStage::Lookup, self.lookup.lookup(&name)).await?;
        Ok(ScanResult {
            extracted_text: name,
            details,
        })
    }
}

impl<S: ImageSource> ScanFlow<S, GeminiRecognizer, ScryfallClient> {
    /// Flow against the hosted recognition and card APIs named in `config`.
    pub fn from_config(source: S, config: &ScanConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScanError::HttpClient(e.to_string()))?;

        Ok(Self::new(
            source,
            GeminiRecognizer::new(http.clone(), config),
            ScryfallClient::new(http, config),
            config.capture.clone(),
            config.request_timeout,
        ))
    }
}

async fn within<T>(limit: Duration, stage: ScanStage, step: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(limit, step)
        .await
        .map_err(|_| ScanError::Timeout(stage))?
}
