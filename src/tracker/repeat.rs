//! Press-and-hold repetition.
//!
//! Holding a life button changes life by a large step over and over, each
//! repeat coming a little sooner than the last. The table shares a single
//! repeater: starting a hold on one seat cancels a hold on any other.
//!
//! ```text
//!   start ──► Pending ──(initial delay)──► Repeating ──(interval)──► Repeating ...
//!     ▲                                        │
//!     └──────────── stop (any state) ──► Idle ◄┘
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TrackerConfig};

/// Shortest interval the repeater will schedule, whatever the config says.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Which way a hold moves life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Increase => 1,
            Direction::Decrease => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatState {
    Idle,
    /// Waiting out the initial delay.
    Pending {
        player: PlayerId,
        direction: Direction,
        fire_at: Instant,
    },
    /// Ticking; `interval` is the gap that led to `next_at`.
    Repeating {
        player: PlayerId,
        direction: Direction,
        interval: Duration,
        next_at: Instant,
    },
}

/// One repeated change, stamped with the time it fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatTick {
    pub player: PlayerId,
    pub direction: Direction,
    pub at: Instant,
}

/// The table-wide press-and-hold state machine.
#[derive(Clone, Debug)]
pub struct Repeater {
    state: RepeatState,
}

impl Default for Repeater {
    fn default() -> Self {
        Self::new()
    }
}

impl Repeater {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RepeatState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> RepeatState {
        self.state
    }

    /// Seat and direction of the running hold.
    #[must_use]
    pub fn active(&self) -> Option<(PlayerId, Direction)> {
        match self.state {
            RepeatState::Idle => None,
            RepeatState::Pending { player, direction, .. }
            | RepeatState::Repeating { player, direction, .. } => Some((player, direction)),
        }
    }

    /// Begin a hold at `now`, replacing any hold already running.
    pub fn start(&mut self, player: PlayerId, direction: Direction, now: Instant, config: &TrackerConfig) {
        self.state = RepeatState::Pending {
            player,
            direction,
            fire_at: now + config.hold_initial_delay,
        };
    }

    /// Cancel the hold. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.state != RepeatState::Idle;
        self.state = RepeatState::Idle;
        was_active
    }

    /// When the next tick is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            RepeatState::Idle => None,
            RepeatState::Pending { fire_at, .. } => Some(fire_at),
            RepeatState::Repeating { next_at, .. } => Some(next_at),
        }
    }

    /// Emit the tick due by `now` and schedule the following one.
    ///
    /// The tick is stamped `now` and the next deadline is one interval
    /// after it, so a host that stops polling gets a single late tick on
    /// its next poll rather than every tick it missed. Callers check the
    /// deadline against the clock first; this does not.
    pub fn fire(&mut self, now: Instant, config: &TrackerConfig) -> Option<RepeatTick> {
        match self.state {
            RepeatState::Idle => None,
            RepeatState::Pending { player, direction, fire_at } => {
                let at = fire_at.max(now);
                let interval = config.hold_initial_interval.max(MIN_TICK);
                self.state = RepeatState::Repeating {
                    player,
                    direction,
                    interval,
                    next_at: at + interval,
                };
                Some(RepeatTick { player, direction, at })
            }
            RepeatState::Repeating { player, direction, interval, next_at } => {
                let at = next_at.max(now);
                let interval = config.next_hold_interval(interval).max(MIN_TICK);
                self.state = RepeatState::Repeating {
                    player,
                    direction,
                    interval,
                    next_at: at + interval,
                };
                Some(RepeatTick { player, direction, at })
            }
        }
    }
}
