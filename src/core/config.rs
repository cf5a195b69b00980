//! Session and tracker configuration.
//!
//! - `SessionConfig`: what the setup screen hands to a new session
//!   (seat count and starting life).
//! - `TrackerConfig`: timing and limits of the life tracker. The defaults
//!   match the table-side behaviour players expect; games with different
//!   commander rules can override the cap.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{Result, TrackerError};

/// Largest table the game screen can lay out.
pub const MAX_PLAYERS: usize = 4;

/// Parameters of one game session. Immutable once the session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionConfig {
    player_count: usize,
    starting_life: i32,
}

impl SessionConfig {
    /// Validate and create a session configuration.
    ///
    /// ```
    /// use ccg_companion::core::SessionConfig;
    ///
    /// let config = SessionConfig::new(4, 40).unwrap();
    /// assert_eq!(config.player_count(), 4);
    /// assert!(SessionConfig::new(5, 40).is_err());
    /// assert!(SessionConfig::new(2, 0).is_err());
    /// ```
    pub fn new(player_count: usize, starting_life: i32) -> Result<Self> {
        if !(1..=MAX_PLAYERS).contains(&player_count) {
            return Err(TrackerError::InvalidPlayerCount {
                count: player_count,
                max: MAX_PLAYERS,
            });
        }
        if starting_life <= 0 {
            return Err(TrackerError::InvalidStartingLife(starting_life));
        }
        Ok(Self {
            player_count,
            starting_life,
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn starting_life(&self) -> i32 {
        self.starting_life
    }
}

/// Timing and limits of the life tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// How long a life-change annotation stays visible after the last
    /// change to that seat.
    pub annotation_window: Duration,

    /// Delay between pressing a hold button and the first repeated change.
    pub hold_initial_delay: Duration,

    /// Interval between the first and second repeated change.
    pub hold_initial_interval: Duration,

    /// Each repeat interval is the previous one times this factor.
    pub hold_interval_factor: f64,

    /// Repeat intervals never shrink below this.
    pub hold_min_interval: Duration,

    /// Life change applied per repeat, before the direction sign.
    pub hold_step: i32,

    /// Maximum commander damage one source can deal to one receiver.
    pub commander_damage_cap: i32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            annotation_window: Duration::from_millis(1000),
            hold_initial_delay: Duration::ZERO,
            hold_initial_interval: Duration::from_millis(500),
            hold_interval_factor: 0.9,
            hold_min_interval: Duration::from_millis(50),
            hold_step: 10,
            commander_damage_cap: 21,
        }
    }
}

impl TrackerConfig {
    /// Set the annotation window.
    #[must_use]
    pub fn with_annotation_window(mut self, window: Duration) -> Self {
        self.annotation_window = window;
        self
    }

    /// Set the press-and-hold step.
    #[must_use]
    pub fn with_hold_step(mut self, step: i32) -> Self {
        self.hold_step = step;
        self
    }

    /// Set the commander damage cap.
    #[must_use]
    pub fn with_commander_damage_cap(mut self, cap: i32) -> Self {
        self.commander_damage_cap = cap;
        self
    }

    /// Reject values the tracker cannot run with.
    ///
    /// ```
    /// use ccg_companion::core::TrackerConfig;
    ///
    /// assert!(TrackerConfig::default().validate().is_ok());
    /// assert!(TrackerConfig::default().with_commander_damage_cap(-1).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.commander_damage_cap < 0 {
            return Err(TrackerError::InvalidTrackerConfig(
                "commander damage cap must not be negative",
            ));
        }
        let factor = self.hold_interval_factor;
        if factor.is_nan() || factor <= 0.0 || factor > 1.0 {
            return Err(TrackerError::InvalidTrackerConfig(
                "hold interval factor must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Interval that follows `current` in the press-and-hold schedule.
    ///
    /// A negative or NaN factor yields the floor.
    #[must_use]
    pub fn next_hold_interval(&self, current: Duration) -> Duration {
        Duration::try_from_secs_f64(current.as_secs_f64() * self.hold_interval_factor)
            .unwrap_or(self.hold_min_interval)
            .max(self.hold_min_interval)
    }
}
