//! Camera capture contract.
//!
//! The device camera lives outside this crate. A host wraps it in an
//! [`ImageSource`] that honours a [`CaptureRequest`] and hands back JPEG
//! bytes.

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::error::Result;

/// Rectangle in pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// The band holding a card's title when the card fills the frame
    /// upright: 10% in from the sides, starting 15% down, 8% tall.
    ///
    /// ```
    /// use ccg_companion::scan::CropRegion;
    ///
    /// let band = CropRegion::title_band(1000, 2000);
    /// assert_eq!((band.x, band.y, band.width, band.height), (100, 300, 800, 160));
    /// ```
    #[must_use]
    pub fn title_band(width: u32, height: u32) -> Self {
        let scale = |total: u32, percent: u64| (u64::from(total) * percent / 100) as u32;
        Self {
            x: scale(width, 10),
            y: scale(height, 15),
            width: scale(width, 80),
            height: scale(height, 8),
        }
    }
}

/// What to ask the camera for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// JPEG quality, 0.0 to 1.0.
    pub quality: f32,
    /// Crop to apply after capture, if any.
    pub crop: Option<CropRegion>,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            quality: 0.8,
            crop: None,
        }
    }
}

/// A captured JPEG image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    jpeg: Vec<u8>,
}

impl CapturedImage {
    #[must_use]
    pub fn from_jpeg(jpeg: Vec<u8>) -> Self {
        Self { jpeg }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.jpeg
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jpeg.is_empty()
    }

    /// Standard base64 of the JPEG bytes, as image APIs expect inline.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.jpeg)
    }
}

/// Something that can take a picture.
pub trait ImageSource {
    /// Capture one image. Failures are `ScanError::CaptureFailed`.
    fn capture(&self, request: &CaptureRequest) -> impl Future<Output = Result<CapturedImage>> + Send;
}
