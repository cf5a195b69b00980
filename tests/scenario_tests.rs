//! Whole-session scenarios.
//!
//! Each test plays a short sequence of table inputs against a tracker on a
//! manual clock and checks what the players would see.

use std::time::Duration;

use ccg_companion::core::{Clock, ManualClock, PlayerId, SessionConfig, TrackerConfig};
use ccg_companion::layout::rotation_for;
use ccg_companion::setup::{SessionBuilder, SetupSelection};
use ccg_companion::tracker::{Direction, LifeTracker, TrackerEvent};

fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn session(players: usize, life: i32) -> (LifeTracker<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let tracker = SessionBuilder::new()
        .player_count(players)
        .starting_life(life)
        .build_with_clock(clock.clone())
        .unwrap();
    (tracker, clock)
}

// =============================================================================
// Life and commander damage
// =============================================================================

/// Life loss and commander damage in a two-player game at 40.
#[test]
fn test_two_player_damage_sequence() {
    let (mut tracker, _) = session(2, 40);

    tracker.change_life(p(0), -3).unwrap();
    assert_eq!(tracker.life_totals(), &[37, 40]);

    tracker.change_commander_damage(p(1), p(0), 10).unwrap();
    assert_eq!(tracker.commander_damage(p(1), p(0)).unwrap(), 10);
    assert_eq!(tracker.life_totals(), &[37, 30]);

    // 10 + 15 clamps to 21: only 11 more life is lost.
    tracker.change_commander_damage(p(1), p(0), 15).unwrap();
    assert_eq!(tracker.commander_damage(p(1), p(0)).unwrap(), 21);
    assert_eq!(tracker.life_totals(), &[37, 19]);

    // Lowering commander damage gives no life back.
    tracker.change_commander_damage(p(1), p(0), -5).unwrap();
    assert_eq!(tracker.commander_damage(p(1), p(0)).unwrap(), 16);
    assert_eq!(tracker.life_totals(), &[37, 19]);
}

/// Commander damage from different sources is tracked separately.
#[test]
fn test_commander_damage_per_source() {
    let (mut tracker, _) = session(4, 40);

    tracker.change_commander_damage(p(0), p(1), 7).unwrap();
    tracker.change_commander_damage(p(0), p(2), 21).unwrap();
    tracker.change_commander_damage(p(0), p(3), 30).unwrap();

    assert_eq!(tracker.commander_matrix().received_by(p(0)), &[0, 7, 21, 21]);
    assert_eq!(tracker.life(p(0)).unwrap(), 40 - 7 - 21 - 21);
    for other in 1..4 {
        assert_eq!(tracker.life(p(other)).unwrap(), 40);
    }
}

/// The setup screen's choice flows into a working session.
#[test]
fn test_setup_to_session() {
    let mut selection = SetupSelection::new();
    selection.select_players(3).unwrap();
    selection.select_starting_life(60).unwrap();

    let config: SessionConfig = selection.confirm().unwrap();
    let tracker = LifeTracker::new(config);

    assert_eq!(tracker.life_totals(), &[60, 60, 60]);
    assert_eq!(tracker.commander_matrix().to_rows(), vec![vec![0; 3]; 3]);
}

// =============================================================================
// Overlays
// =============================================================================

/// Only one overlay is open at a time; each entry faces its seat.
#[test]
fn test_overlay_switching_and_rotation() {
    let (mut tracker, _) = session(4, 40);

    tracker.toggle_commander_menu(p(0)).unwrap();
    tracker.toggle_commander_menu(p(2)).unwrap();
    assert_eq!(tracker.commander_menu(), Some(p(2)));

    let rotations: Vec<_> = tracker
        .overlay_targets()
        .iter()
        .map(|t| (t.source, t.rotation))
        .collect();
    assert_eq!(rotations, vec![(p(0), 180), (p(1), 180), (p(3), 0)]);

    tracker.toggle_commander_menu(p(2)).unwrap();
    assert_eq!(tracker.commander_menu(), None);
    assert!(tracker.overlay_targets().is_empty());
}

#[test]
fn test_four_player_rotation_lookups() {
    assert_eq!(rotation_for(4, p(1), p(2)), 180);
    assert_eq!(rotation_for(4, p(0), p(1)), 0);
}

// =============================================================================
// Annotations
// =============================================================================

/// Quick taps merge into one annotation that fades a second after the last.
#[test]
fn test_taps_merge_into_one_annotation() {
    let (mut tracker, clock) = session(2, 40);

    tracker.change_life(p(1), 1).unwrap();
    clock.advance(ms(200));
    tracker.change_life(p(1), 1).unwrap();
    clock.advance(ms(200));
    tracker.change_life(p(1), -5).unwrap();

    assert_eq!(tracker.pending_deltas(), vec![None, Some(-3)]);
    assert_eq!(tracker.next_deadline(), Some(clock.now() + ms(1000)));

    clock.advance(ms(999));
    tracker.poll_timers();
    assert_eq!(tracker.pending_delta(p(1)).unwrap(), Some(-3));

    clock.advance(ms(1));
    tracker.poll_timers();
    assert_eq!(tracker.pending_delta(p(1)).unwrap(), None);
    assert_eq!(tracker.life(p(1)).unwrap(), 37);

    let expired: Vec<_> = tracker
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, TrackerEvent::DeltaExpired { .. }))
        .collect();
    assert_eq!(expired, vec![TrackerEvent::DeltaExpired { player: p(1), annotation: -3 }]);
}

/// Commander damage life loss shows up in the receiver's annotation.
#[test]
fn test_commander_damage_annotates_receiver() {
    let (mut tracker, _) = session(3, 40);

    tracker.change_commander_damage(p(2), p(0), 4).unwrap();

    assert_eq!(tracker.pending_deltas(), vec![None, None, Some(-4)]);
}

// =============================================================================
// Press-and-hold
// =============================================================================

/// Holding decrease on player 0: -10 at once, then at shrinking intervals
/// from 500ms down to the 50ms floor, until release.
#[test]
fn test_hold_accelerates_until_release() {
    let (mut tracker, clock) = session(2, 400);

    tracker.start_repeating_change(p(0), Direction::Decrease).unwrap();
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 390);

    // Expected gaps: 500, 450, 405, 364.5 ...
    clock.advance(ms(499));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 390);
    clock.advance(ms(1));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 380);
    clock.advance(ms(450));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 370);
    clock.advance(ms(405));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 360);

    tracker.stop_repeating_change();
    tracker.stop_repeating_change();
    assert!(!tracker.is_repeating());

    clock.advance(ms(10_000));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 360);
    assert_eq!(tracker.life(p(1)).unwrap(), 400);
}

/// A host that stops polling mid-hold gets one late tick, not a burst of
/// every tick it missed, and the hold carries on from there.
#[test]
fn test_stalled_hold_fires_once() {
    let (mut tracker, clock) = session(2, 40);

    tracker.start_repeating_change(p(0), Direction::Decrease).unwrap();
    tracker.poll_timers();
    tracker.drain_events();

    clock.advance(Duration::from_secs(60));
    let fired = tracker.poll_timers();

    assert_eq!(fired, 1);
    assert_eq!(tracker.life(p(0)).unwrap(), 20);
    assert_eq!(tracker.drain_events().len(), 1);

    clock.advance(ms(449));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 20);
    clock.advance(ms(1));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), 10);
}

/// Polls every `step` for `total`, like a host redrawing frames.
fn poll_every(
    tracker: &mut LifeTracker<ManualClock>,
    clock: &ManualClock,
    step: Duration,
    total: Duration,
) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        clock.advance(step);
        elapsed += step;
        tracker.poll_timers();
    }
}

/// Long holds settle at the 50ms floor.
#[test]
fn test_hold_interval_floor() {
    let (mut tracker, clock) = session(1, 1000);

    tracker.start_repeating_change(p(0), Direction::Decrease).unwrap();
    tracker.poll_timers();
    // 6s covers the geometric run down to the floor.
    poll_every(&mut tracker, &clock, ms(10), ms(6_000));
    let before = tracker.life(p(0)).unwrap();

    clock.advance(ms(50));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(0)).unwrap(), before - 10);

    poll_every(&mut tracker, &clock, ms(10), ms(500));
    assert_eq!(tracker.life(p(0)).unwrap(), before - 10 - 100);
}

/// Starting a hold on another seat cancels the first.
#[test]
fn test_second_hold_replaces_first() {
    let (mut tracker, clock) = session(2, 40);

    tracker.start_repeating_change(p(0), Direction::Decrease).unwrap();
    tracker.poll_timers();
    tracker.start_repeating_change(p(1), Direction::Increase).unwrap();
    tracker.poll_timers();

    clock.advance(ms(500));
    tracker.poll_timers();

    assert_eq!(tracker.life_totals(), &[30, 60]);
    assert_eq!(tracker.repeating(), Some((p(1), Direction::Increase)));

    let stopped: Vec<_> = tracker
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, TrackerEvent::RepeatStopped { .. }))
        .collect();
    assert_eq!(stopped, vec![TrackerEvent::RepeatStopped { player: p(0) }]);
}

/// Custom step and initial delay are honoured.
#[test]
fn test_hold_with_custom_config() {
    let clock = ManualClock::new();
    let mut config = TrackerConfig::default().with_hold_step(1);
    config.hold_initial_delay = ms(300);
    let mut tracker = SessionBuilder::new()
        .player_count(2)
        .starting_life(20)
        .tracker_config(config)
        .build_with_clock(clock.clone())
        .unwrap();

    tracker.start_repeating_change(p(1), Direction::Decrease).unwrap();
    assert_eq!(tracker.poll_timers(), 0);

    clock.advance(ms(300));
    tracker.poll_timers();
    assert_eq!(tracker.life(p(1)).unwrap(), 19);
}
