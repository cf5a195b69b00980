//! Transient life-change annotations.
//!
//! Each seat shows the running sum of its recent life changes ("+2",
//! "-10"). A change within the window adds to the shown value and pushes
//! its expiry back; once a seat has been quiet for a full window the
//! annotation disappears.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::core::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingDelta {
    amount: i32,
    expires_at: Instant,
}

/// Pending annotations keyed by seat. Seats without an entry show nothing.
#[derive(Clone, Debug)]
pub struct DeltaAnnotations {
    window: Duration,
    pending: FxHashMap<PlayerId, PendingDelta>,
}

impl DeltaAnnotations {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: FxHashMap::default(),
        }
    }

    /// Add `delta` to the seat's annotation and restart its expiry at
    /// `at + window`. Returns the annotation now shown.
    pub fn record(&mut self, player: PlayerId, delta: i32, at: Instant) -> i32 {
        let expires_at = at + self.window;
        let entry = self.pending.entry(player).or_insert(PendingDelta {
            amount: 0,
            expires_at,
        });
        entry.amount = entry.amount.saturating_add(delta);
        entry.expires_at = expires_at;
        entry.amount
    }

    /// Current annotation for a seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<i32> {
        self.pending.get(&player).map(|p| p.amount)
    }

    /// Annotations in seat order, `None` for quiet seats.
    #[must_use]
    pub fn slots(&self, player_count: usize) -> Vec<Option<i32>> {
        PlayerId::all(player_count).map(|p| self.get(p)).collect()
    }

    /// The earliest expiry, with its seat. Ties go to the lower seat.
    #[must_use]
    pub fn next_expiry(&self) -> Option<(PlayerId, Instant)> {
        self.pending
            .iter()
            .map(|(player, pending)| (*player, pending.expires_at))
            .min_by_key(|(player, at)| (*at, *player))
    }

    /// Drop a seat's annotation, returning the value it showed.
    pub fn clear(&mut self, player: PlayerId) -> Option<i32> {
        self.pending.remove(&player).map(|p| p.amount)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
