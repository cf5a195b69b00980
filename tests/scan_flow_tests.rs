//! Scan pipeline tests with in-process collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ccg_companion::scan::{
    CaptureRequest, CapturedImage, CardDetails, CardLookup, CardNameRecognizer, CardRecord,
    ImageSource, Prices, Ruling, ScanError, ScanFlow, ScanStage, ScanState,
};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Clone)]
enum Camera {
    Photo(Vec<u8>),
    Broken,
    Hangs,
}

impl ImageSource for Camera {
    async fn capture(&self, _request: &CaptureRequest) -> Result<CapturedImage, ScanError> {
        match self {
            Camera::Photo(bytes) => Ok(CapturedImage::from_jpeg(bytes.clone())),
            Camera::Broken => Err(ScanError::CaptureFailed("camera not ready".into())),
            Camera::Hangs => std::future::pending().await,
        }
    }
}

#[derive(Clone)]
enum Reader {
    Reads(&'static str),
    Blank,
    Hangs,
}

impl CardNameRecognizer for Reader {
    async fn recognize(&self, image: &CapturedImage) -> Result<String, ScanError> {
        assert!(!image.is_empty());
        match self {
            Reader::Reads(name) => Ok(name.to_string()),
            Reader::Blank => Err(ScanError::NoTextRecognized),
            Reader::Hangs => std::future::pending().await,
        }
    }
}

/// Card database with one card, counting lookups.
#[derive(Clone, Default)]
struct Database {
    calls: Arc<AtomicUsize>,
    unreachable: bool,
}

impl Database {
    /// A database that accepts the request and never answers.
    fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }
}

impl CardLookup for Database {
    async fn lookup(&self, name: &str) -> Result<CardDetails, ScanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return std::future::pending().await;
        }
        if name != "Sol Ring" {
            return Err(ScanError::CardNotFound(format!("No cards found matching {name}")));
        }
        Ok(CardDetails {
            card: CardRecord {
                name: "Sol Ring".into(),
                type_line: "Artifact".into(),
                oracle_text: Some("{T}: Add {C}{C}.".into()),
                mana_cost: Some("{1}".into()),
                prices: Prices {
                    eur: Some("1.50".into()),
                    ..Prices::default()
                },
                image_uris: None,
                rulings_uri: None,
            },
            rulings: vec![Ruling {
                published_at: "2004-10-04".into(),
                comment: "Ruling text.".into(),
            }],
        })
    }
}

fn flow(camera: Camera, reader: Reader, db: Database) -> ScanFlow<Camera, Reader, Database> {
    ScanFlow::new(camera, reader, db, CaptureRequest::default(), Duration::from_secs(5))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_successful_scan() {
    let mut flow = flow(Camera::Photo(vec![1, 2, 3]), Reader::Reads("Sol Ring"), Database::default());

    let result = flow.scan().await.unwrap();

    assert_eq!(result.extracted_text, "Sol Ring");
    assert_eq!(result.details.card.type_line, "Artifact");
    assert_eq!(result.details.rulings.len(), 1);
    assert!(matches!(flow.state(), ScanState::Scanned(_)));
}

#[tokio::test]
async fn test_capture_failure_stops_flow() {
    let db = Database::default();
    let mut flow = flow(Camera::Broken, Reader::Reads("Sol Ring"), db.clone());

    let err = flow.scan().await.unwrap_err();

    assert_eq!(err, ScanError::CaptureFailed("camera not ready".into()));
    assert_eq!(db.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        flow.state(),
        &ScanState::Error("failed to capture image: camera not ready".into())
    );
}

#[tokio::test]
async fn test_empty_photo_is_capture_failure() {
    let mut flow = flow(Camera::Photo(Vec::new()), Reader::Reads("Sol Ring"), Database::default());

    assert!(matches!(flow.scan().await, Err(ScanError::CaptureFailed(_))));
}

#[tokio::test]
async fn test_no_text_skips_lookup() {
    let db = Database::default();
    let mut flow = flow(Camera::Photo(vec![1]), Reader::Blank, db.clone());

    assert_eq!(flow.scan().await.unwrap_err(), ScanError::NoTextRecognized);
    assert_eq!(db.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_card() {
    let mut flow = flow(Camera::Photo(vec![1]), Reader::Reads("Sol Rnig"), Database::default());

    let err = flow.scan().await.unwrap_err();

    assert!(matches!(err, ScanError::CardNotFound(_)));
    assert!(flow.result().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_hung_recognizer_times_out() {
    let mut flow = flow(Camera::Photo(vec![1]), Reader::Hangs, Database::default());

    let err = flow.scan().await.unwrap_err();

    assert_eq!(err, ScanError::Timeout(ScanStage::Recognize));
    assert!(matches!(flow.state(), ScanState::Error(_)));
}

#[tokio::test(start_paused = true)]
async fn test_hung_camera_times_out() {
    let db = Database::default();
    let mut flow = flow(Camera::Hangs, Reader::Reads("Sol Ring"), db.clone());

    let err = flow.scan().await.unwrap_err();

    assert_eq!(err, ScanError::Timeout(ScanStage::Capture));
    assert_eq!(db.calls.load(Ordering::SeqCst), 0);
    assert_eq!(flow.state(), &ScanState::Error("capture timed out".into()));
}

#[tokio::test(start_paused = true)]
async fn test_hung_lookup_times_out() {
    let db = Database::unreachable();
    let mut flow = flow(Camera::Photo(vec![1]), Reader::Reads("Sol Ring"), db.clone());

    let err = flow.scan().await.unwrap_err();

    assert_eq!(err, ScanError::Timeout(ScanStage::Lookup));
    assert_eq!(db.calls.load(Ordering::SeqCst), 1);
    assert!(flow.result().is_none());
    assert_eq!(flow.state(), &ScanState::Error("card lookup timed out".into()));
}

#[tokio::test]
async fn test_retry_after_error_and_reset_after_success() {
    let mut flow = flow(Camera::Photo(vec![1]), Reader::Reads("Sol Ring"), Database::default());

    flow.scan().await.unwrap();
    // A shown result must be dismissed before the next scan.
    assert_eq!(flow.scan().await.unwrap_err(), ScanError::NotReady);
    assert!(flow.result().is_some());

    flow.reset();
    assert_eq!(flow.state(), &ScanState::Ready);
    assert!(flow.scan().await.is_ok());
}

#[tokio::test]
async fn test_scan_allowed_from_error_state() {
    let mut flow = flow(Camera::Photo(vec![1]), Reader::Reads("Nope"), Database::default());

    assert!(flow.scan().await.is_err());
    // Still failing, but the attempt is allowed.
    assert!(matches!(flow.scan().await, Err(ScanError::CardNotFound(_))));
}
