//! The life tracker: all mutable state of one game session.
//!
//! ## State
//!
//! - Life totals, one per seat, unbounded in both directions
//! - Commander damage, `[receiver][source]`, clamped to `0..=cap`
//! - Life-change annotations that fade after a quiet window
//! - The single open commander damage overlay, if any
//! - The table-wide press-and-hold repeater
//!
//! ## Timers
//!
//! Timers are deadlines, not tasks. Hosts call [`LifeTracker::poll_timers`]
//! once [`LifeTracker::next_deadline`] has passed; due timers then fire in
//! time order. A hold fires at most one repeat per poll: ticks the host was
//! too slow to poll for are dropped, not replayed.
//!
//! ## Events
//!
//! Every change is also recorded as a [`TrackerEvent`]. Hosts that react
//! to events call [`LifeTracker::drain_events`] after each input or poll.
//! Hosts that only render from [`LifeTracker::snapshot`] may ignore them;
//! the buffer keeps the latest [`EVENT_BUFFER_LIMIT`] and drops older ones.

use std::collections::VecDeque;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::commander::CommanderDamage;
use super::delta::DeltaAnnotations;
use super::event::TrackerEvent;
use super::repeat::{Direction, Repeater};
use crate::core::{
    Clock, PlayerId, PlayerMap, Result, SessionConfig, SystemClock, TrackerConfig, TrackerError,
};
use crate::layout::rotation_for;

/// One entry of an open commander damage overlay.
///
/// The overlay belongs to the viewer and records damage dealt *to* the
/// viewer by `source`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayTarget {
    pub source: PlayerId,
    pub damage: i32,
    /// Degrees to turn the entry so it faces `source`'s seat.
    pub rotation: u16,
}

/// A read-only copy of everything a renderer draws.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub life: Vec<i32>,
    pub commander_damage: Vec<Vec<i32>>,
    pub deltas: Vec<Option<i32>>,
    pub commander_menu: Option<PlayerId>,
    pub repeating: Option<(PlayerId, Direction)>,
}

/// Undrained events kept before the oldest are dropped.
pub const EVENT_BUFFER_LIMIT: usize = 1024;

/// Which timer `poll_timers` fires next.
enum DueTimer {
    Expiry(PlayerId),
    Repeat,
}

/// Per-session life and commander damage state.
///
/// ## Example
///
/// ```
/// use ccg_companion::core::{PlayerId, SessionConfig};
/// use ccg_companion::tracker::LifeTracker;
///
/// let config = SessionConfig::new(2, 40).unwrap();
/// let mut tracker = LifeTracker::new(config);
///
/// tracker.change_life(PlayerId::new(0), -3).unwrap();
/// tracker.change_commander_damage(PlayerId::new(1), PlayerId::new(0), 10).unwrap();
///
/// assert_eq!(tracker.life_totals(), &[37, 30]);
/// ```
#[derive(Clone, Debug)]
pub struct LifeTracker<C: Clock = SystemClock> {
    session: SessionConfig,
    config: TrackerConfig,
    clock: C,
    life: PlayerMap<i32>,
    commander: CommanderDamage,
    deltas: DeltaAnnotations,
    commander_menu: Option<PlayerId>,
    repeater: Repeater,
    events: VecDeque<TrackerEvent>,
}

impl LifeTracker<SystemClock> {
    /// Start a session on the system clock with default timing.
    #[must_use]
    pub fn new(session: SessionConfig) -> Self {
        Self::assemble(session, TrackerConfig::default(), SystemClock)
    }
}

impl<C: Clock> LifeTracker<C> {
    /// Start a session with explicit timing and time source.
    ///
    /// Fails with [`TrackerError::InvalidTrackerConfig`] if `config` does
    /// not pass [`TrackerConfig::validate`].
    pub fn with_clock(session: SessionConfig, config: TrackerConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(session, config, clock))
    }

    fn assemble(session: SessionConfig, config: TrackerConfig, clock: C) -> Self {
        let player_count = session.player_count();
        debug!(
            player_count,
            starting_life = session.starting_life(),
            "session started"
        );
        Self {
            life: PlayerMap::with_value(player_count, session.starting_life()),
            commander: CommanderDamage::new(player_count, config.commander_damage_cap),
            deltas: DeltaAnnotations::new(config.annotation_window),
            commander_menu: None,
            repeater: Repeater::new(),
            events: VecDeque::new(),
            session,
            config,
            clock,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.session.player_count()
    }

    #[must_use]
    pub fn starting_life(&self) -> i32 {
        self.session.starting_life()
    }

    #[must_use]
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn life(&self, player: PlayerId) -> Result<i32> {
        self.check(player)?;
        Ok(self.life[player])
    }

    /// Life totals in seat order.
    #[must_use]
    pub fn life_totals(&self) -> &[i32] {
        self.life.as_slice()
    }

    pub fn commander_damage(&self, receiver: PlayerId, source: PlayerId) -> Result<i32> {
        self.check(receiver)?;
        self.check(source)?;
        Ok(self.commander.get(receiver, source))
    }

    #[must_use]
    pub fn commander_matrix(&self) -> &CommanderDamage {
        &self.commander
    }

    /// The annotation next to a seat's total, if it changed recently.
    pub fn pending_delta(&self, player: PlayerId) -> Result<Option<i32>> {
        self.check(player)?;
        Ok(self.deltas.get(player))
    }

    /// Annotations in seat order.
    #[must_use]
    pub fn pending_deltas(&self) -> Vec<Option<i32>> {
        self.deltas.slots(self.player_count())
    }

    /// Seat whose commander damage overlay is open.
    #[must_use]
    pub fn commander_menu(&self) -> Option<PlayerId> {
        self.commander_menu
    }

    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.repeater.active().is_some()
    }

    #[must_use]
    pub fn repeating(&self) -> Option<(PlayerId, Direction)> {
        self.repeater.active()
    }

    // === Life ===

    /// Add `delta` to a seat's life total and to its annotation.
    pub fn change_life(&mut self, player: PlayerId, delta: i32) -> Result<()> {
        self.check(player)?;
        let now = self.clock.now();
        self.apply_life_change(player, delta, now);
        Ok(())
    }

    fn apply_life_change(&mut self, player: PlayerId, delta: i32, at: Instant) {
        let life = &mut self.life[player];
        *life = life.saturating_add(delta);
        let life = *life;
        let annotation = self.deltas.record(player, delta, at);

        debug!(%player, delta, life, annotation, "life changed");
        self.emit(TrackerEvent::LifeChanged {
            player,
            delta,
            life,
            annotation,
        });
    }

    // === Commander damage ===

    /// Add `delta` to the damage `source` has dealt `receiver`.
    ///
    /// The cell is clamped to `0..=cap`. If it went up, the receiver loses
    /// exactly the amount it went up by; decreases never restore life.
    /// Returns the life lost.
    pub fn change_commander_damage(
        &mut self,
        receiver: PlayerId,
        source: PlayerId,
        delta: i32,
    ) -> Result<i32> {
        self.check(receiver)?;
        self.check(source)?;

        let change = self.commander.apply(receiver, source, delta);
        let life_loss = change.life_loss();
        if life_loss > 0 {
            let now = self.clock.now();
            self.apply_life_change(receiver, -life_loss, now);
        }

        if change.current != change.previous {
            debug!(%receiver, %source, damage = change.current, life_loss, "commander damage changed");
            self.emit(TrackerEvent::CommanderDamageChanged {
                receiver,
                source,
                damage: change.current,
                life_loss,
            });
        }
        Ok(life_loss)
    }

    /// Open the overlay for `player`, or close it if it is already open.
    /// Opening one overlay closes any other. Returns the overlay now open.
    pub fn toggle_commander_menu(&mut self, player: PlayerId) -> Result<Option<PlayerId>> {
        self.check(player)?;
        self.commander_menu = if self.commander_menu == Some(player) {
            None
        } else {
            Some(player)
        };
        self.emit(TrackerEvent::CommanderMenuToggled {
            open: self.commander_menu,
        });
        Ok(self.commander_menu)
    }

    /// Entries of the open overlay: every other seat, with the damage it
    /// has dealt the viewer and the rotation that faces it.
    #[must_use]
    pub fn overlay_targets(&self) -> Vec<OverlayTarget> {
        let Some(viewer) = self.commander_menu else {
            return Vec::new();
        };
        let player_count = self.player_count();
        PlayerId::all(player_count)
            .filter(|source| *source != viewer)
            .map(|source| OverlayTarget {
                source,
                damage: self.commander.get(viewer, source),
                rotation: rotation_for(player_count, viewer, source),
            })
            .collect()
    }

    // === Press-and-hold ===

    /// Start repeating `hold_step` changes on a seat. Any running hold,
    /// on this seat or another, is replaced.
    pub fn start_repeating_change(&mut self, player: PlayerId, direction: Direction) -> Result<()> {
        self.check(player)?;
        self.stop_repeating_change();

        let now = self.clock.now();
        self.repeater.start(player, direction, now, &self.config);
        debug!(%player, ?direction, "hold started");
        self.emit(TrackerEvent::RepeatStarted { player, direction });
        Ok(())
    }

    /// Stop the running hold. Safe to call when nothing is held.
    pub fn stop_repeating_change(&mut self) {
        let active = self.repeater.active();
        if self.repeater.stop() {
            if let Some((player, _)) = active {
                debug!(%player, "hold stopped");
                self.emit(TrackerEvent::RepeatStopped { player });
            }
        }
    }

    // === Timers ===

    /// Earliest instant at which `poll_timers` has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let expiry = self.deltas.next_expiry().map(|(_, at)| at);
        match (expiry, self.repeater.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer due by now, oldest first. Returns how many fired.
    ///
    /// At most one repeat tick fires per call; the next one is scheduled
    /// from now. An annotation expiring at the same instant as a repeat
    /// tick expires first, so the tick starts a fresh annotation.
    pub fn poll_timers(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some(due) = self.next_due(now) {
            match due {
                DueTimer::Expiry(player) => {
                    if let Some(annotation) = self.deltas.clear(player) {
                        self.emit(TrackerEvent::DeltaExpired { player, annotation });
                    }
                }
                DueTimer::Repeat => {
                    if let Some(tick) = self.repeater.fire(now, &self.config) {
                        let delta = self.config.hold_step.saturating_mul(tick.direction.sign());
                        self.apply_life_change(tick.player, delta, tick.at);
                    }
                }
            }
            fired += 1;
        }
        fired
    }

    fn next_due(&self, now: Instant) -> Option<DueTimer> {
        let expiry = self.deltas.next_expiry().filter(|(_, at)| *at <= now);
        let repeat = self.repeater.next_deadline().filter(|at| *at <= now);
        match (expiry, repeat) {
            (Some((player, expires)), Some(tick)) if expires <= tick => Some(DueTimer::Expiry(player)),
            (_, Some(_)) => Some(DueTimer::Repeat),
            (Some((player, _)), None) => Some(DueTimer::Expiry(player)),
            (None, None) => None,
        }
    }

    // === Rendering support ===

    /// Take the events recorded since the last drain, oldest first.
    ///
    /// At most [`EVENT_BUFFER_LIMIT`] are kept between drains.
    pub fn drain_events(&mut self) -> Vec<TrackerEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: TrackerEvent) {
        if self.events.len() == EVENT_BUFFER_LIMIT {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    #[must_use]
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            life: self.life.as_slice().to_vec(),
            commander_damage: self.commander.to_rows(),
            deltas: self.pending_deltas(),
            commander_menu: self.commander_menu,
            repeating: self.repeater.active(),
        }
    }

    fn check(&self, player: PlayerId) -> Result<()> {
        if self.life.contains(player) {
            Ok(())
        } else {
            Err(TrackerError::invalid_index(player, self.player_count()))
        }
    }
}
