//! Scan flow error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The steps of a scan, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanStage {
    Capture,
    Recognize,
    Lookup,
}

impl std::fmt::Display for ScanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScanStage::Capture => "capture",
            ScanStage::Recognize => "recognition",
            ScanStage::Lookup => "card lookup",
        };
        f.write_str(name)
    }
}

/// Why a scan attempt ended without a card. All of these are terminal for
/// the attempt; the user starts a new scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("failed to capture image: {0}")]
    CaptureFailed(String),

    #[error("no card name recognized in the image")]
    NoTextRecognized,

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("{0} timed out")]
    Timeout(ScanStage),

    #[error("{stage} request failed: {message}")]
    Transport { stage: ScanStage, message: String },

    #[error("scanner is not ready; reset it first")]
    NotReady,

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ScanError {
    pub fn transport(stage: ScanStage, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            stage,
            message: err.to_string(),
        }
    }
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
