//! Life and commander damage tracking for one game session.
//!
//! - `state`: [`LifeTracker`], the session's owner of all mutable state
//! - `commander`: the clamped `[receiver][source]` damage matrix
//! - `delta`: fading per-seat life-change annotations
//! - `repeat`: the press-and-hold state machine
//! - `event`: change notifications for renderers

pub mod commander;
pub mod delta;
pub mod event;
pub mod repeat;
pub mod state;

pub use commander::{CommanderDamage, DamageChange};
pub use delta::DeltaAnnotations;
pub use event::TrackerEvent;
pub use repeat::{Direction, RepeatState, RepeatTick, Repeater};
pub use state::{LifeTracker, OverlayTarget, TrackerSnapshot, EVENT_BUFFER_LIMIT};
