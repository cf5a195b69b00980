//! Core types shared by every screen: seats, session configuration,
//! time sources and tracker errors.

pub mod player;
pub mod config;
pub mod clock;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use config::{SessionConfig, TrackerConfig, MAX_PLAYERS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TrackerError};
