//! Pairwise commander damage.
//!
//! Cell `[receiver][source]` holds the damage `source`'s commander has dealt
//! to `receiver` over the whole session. Every cell stays within
//! `0..=cap`.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Result of one commander damage update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageChange {
    pub previous: i32,
    pub current: i32,
}

impl DamageChange {
    /// Life the receiver loses for this change: the clamped increase, or
    /// nothing when the cell went down or stayed put.
    #[must_use]
    pub fn life_loss(&self) -> i32 {
        (self.current - self.previous).max(0)
    }
}

/// Square matrix of commander damage, indexed `[receiver][source]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommanderDamage {
    cells: PlayerMap<PlayerMap<i32>>,
    cap: i32,
}

impl CommanderDamage {
    /// All-zero matrix for `player_count` seats. A negative cap is
    /// treated as zero.
    #[must_use]
    pub fn new(player_count: usize, cap: i32) -> Self {
        Self {
            cells: PlayerMap::new(player_count, |_| PlayerMap::with_value(player_count, 0)),
            cap: cap.max(0),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.cells.player_count()
    }

    #[must_use]
    pub fn cap(&self) -> i32 {
        self.cap
    }

    /// Damage `source` has dealt to `receiver`.
    ///
    /// Both seats must exist.
    #[must_use]
    pub fn get(&self, receiver: PlayerId, source: PlayerId) -> i32 {
        self.cells[receiver][source]
    }

    /// Add `delta` to a cell, clamping the result to `0..=cap`.
    ///
    /// Both seats must exist. Self-damage (`receiver == source`) is not
    /// rejected here.
    pub fn apply(&mut self, receiver: PlayerId, source: PlayerId, delta: i32) -> DamageChange {
        let cell = &mut self.cells[receiver][source];
        let previous = *cell;
        let current = previous.saturating_add(delta).clamp(0, self.cap);
        *cell = current;
        DamageChange { previous, current }
    }

    /// Damage received by `receiver`, one entry per source seat.
    #[must_use]
    pub fn received_by(&self, receiver: PlayerId) -> &[i32] {
        self.cells[receiver].as_slice()
    }

    /// The full matrix as nested rows, receiver-major.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .iter()
            .map(|(_, row)| row.as_slice().to_vec())
            .collect()
    }
}
