//! Tracker error types.

use thiserror::Error;

use super::PlayerId;

/// Errors raised by session setup and tracker operations.
///
/// Every tracker mutation succeeds for seats that exist; these errors only
/// surface caller mistakes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("invalid player index {index} for a {player_count}-player session")]
    InvalidIndex { index: usize, player_count: usize },

    #[error("player count must be between 1 and {max}, got {count}")]
    InvalidPlayerCount { count: usize, max: usize },

    #[error("starting life must be positive, got {0}")]
    InvalidStartingLife(i32),

    #[error("invalid tracker config: {0}")]
    InvalidTrackerConfig(&'static str),
}

impl TrackerError {
    pub fn invalid_index(player: PlayerId, player_count: usize) -> Self {
        Self::InvalidIndex {
            index: player.index(),
            player_count,
        }
    }
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
