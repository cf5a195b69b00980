//! Session setup.
//!
//! The setup screen offers a fixed set of seat counts and starting life
//! totals. [`SetupSelection`] tracks what has been picked; once both are
//! chosen it yields the [`SessionConfig`] that starts a game.
//! [`SessionBuilder`] builds trackers directly, for hosts and tests that
//! skip the screen.

use crate::core::{Clock, Result, SessionConfig, SystemClock, TrackerConfig};
use crate::tracker::LifeTracker;

/// Seat counts offered on the setup screen.
pub const PLAYER_COUNT_OPTIONS: [usize; 4] = [1, 2, 3, 4];

/// Starting life totals offered on the setup screen.
pub const STARTING_LIFE_OPTIONS: [i32; 4] = [25, 30, 40, 60];

/// Choices made so far on the setup screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetupSelection {
    players: Option<usize>,
    starting_life: Option<i32>,
}

impl SetupSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the seat count. Rejected counts leave the previous pick.
    pub fn select_players(&mut self, count: usize) -> Result<()> {
        // Validate against a known-good life so only the count is checked.
        SessionConfig::new(count, STARTING_LIFE_OPTIONS[0])?;
        self.players = Some(count);
        Ok(())
    }

    /// Pick the starting life. Rejected totals leave the previous pick.
    pub fn select_starting_life(&mut self, life: i32) -> Result<()> {
        SessionConfig::new(PLAYER_COUNT_OPTIONS[0], life)?;
        self.starting_life = Some(life);
        Ok(())
    }

    #[must_use]
    pub fn players(&self) -> Option<usize> {
        self.players
    }

    #[must_use]
    pub fn starting_life(&self) -> Option<i32> {
        self.starting_life
    }

    /// Whether the start button is shown.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.confirm().is_some()
    }

    /// The session to start, once both choices are made.
    #[must_use]
    pub fn confirm(&self) -> Option<SessionConfig> {
        SessionConfig::new(self.players?, self.starting_life?).ok()
    }
}

/// Builder for a [`LifeTracker`].
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    player_count: usize,
    starting_life: i32,
    config: TrackerConfig,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_life: 40,
            config: TrackerConfig::default(),
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    pub fn tracker_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build on the system clock.
    pub fn build(self) -> Result<LifeTracker> {
        self.build_with_clock(SystemClock)
    }

    /// Build on `clock`. Fails if the seat count, starting life or
    /// tracker config is out of range.
    pub fn build_with_clock<C: Clock>(self, clock: C) -> Result<LifeTracker<C>> {
        let session = SessionConfig::new(self.player_count, self.starting_life)?;
        LifeTracker::with_clock(session, self.config, clock)
    }
}
