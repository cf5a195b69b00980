//! # ccg-companion
//!
//! Table-side companion for multiplayer tabletop card games: life totals,
//! commander damage and card lookup for 1-4 players sharing one device.
//!
//! ## Design Principles
//!
//! 1. **One session, one owner**: a [`LifeTracker`] holds every mutable
//!    value of a game. Renderers read it and feed it input; nothing else
//!    writes.
//!
//! 2. **Deadlines, not tasks**: annotation fade-out and press-and-hold
//!    repetition are deadlines the host polls, read from an injected
//!    [`Clock`]. The tracker is single-threaded and deterministic.
//!
//! 3. **Collaborators behind traits**: the camera, the name recognizer and
//!    the card database are traits, with HTTP implementations for the
//!    hosted APIs.
//!
//! ## Modules
//!
//! - `core`: seats, session configuration, clocks, errors
//! - `setup`: the setup screen's choices and a session builder
//! - `tracker`: life, commander damage, annotations, press-and-hold
//! - `layout`: overlay rotation, seat rows, screen orientation
//! - `scan`: capture, recognition, lookup and the scan pipeline

pub mod core;
pub mod setup;
pub mod tracker;
pub mod layout;
pub mod scan;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    SessionConfig, TrackerConfig,
    Clock, ManualClock, SystemClock,
    TrackerError,
};

pub use crate::setup::{SessionBuilder, SetupSelection};

pub use crate::tracker::{
    LifeTracker, TrackerEvent, TrackerSnapshot, OverlayTarget,
    CommanderDamage, Direction,
};

pub use crate::layout::{rotation_for, Orientation, Screen, SeatLayout};

pub use crate::scan::{
    ScanFlow, ScanState, ScanResult, ScanError, ScanStage, ScanConfig,
    CardDetails, CardRecord, Ruling,
    ImageSource, CardNameRecognizer, CardLookup,
    GeminiRecognizer, ScryfallClient,
};
