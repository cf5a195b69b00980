//! Card scanning: photograph a card, read its name with an
//! image-understanding API, then fetch the card and its rulings from the
//! card database.
//!
//! Each collaborator sits behind a trait ([`ImageSource`],
//! [`CardNameRecognizer`], [`CardLookup`]) so hosts plug in their camera
//! and tests plug in fakes. [`ScanFlow`] runs them in order.

pub mod capture;
pub mod card;
pub mod config;
pub mod error;
pub mod flow;
pub mod lookup;
pub mod vision;

pub use capture::{CaptureRequest, CapturedImage, CropRegion, ImageSource};
pub use card::{CardDetails, CardRecord, ImageUris, Prices, Ruling};
pub use config::ScanConfig;
pub use error::{ScanError, ScanStage};
pub use flow::{ScanFlow, ScanResult, ScanState};
pub use lookup::{CardLookup, ScryfallClient};
pub use vision::{CardNameRecognizer, GeminiRecognizer};
