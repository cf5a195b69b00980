//! Overlay rotation by seat.
//!
//! Players sit around the device, so widgets drawn in one player's area are
//! upside down for players across the table. When a viewer opens an overlay
//! showing other seats, each entry is turned to match its seat's
//! orientation as seen from the viewer.
//!
//! The table is irregular (the third seat of a three-player game spans the
//! far edge alone), so it is looked up rather than computed.

use crate::core::PlayerId;

/// `ROTATIONS[player_count - 1][viewer][target]`, in degrees.
const ROTATIONS: [&[&[u16]]; 4] = [
    &[&[0]],
    &[&[0, 180], &[180, 0]],
    &[&[0, 0, 180], &[0, 0, 180], &[180, 180, 0]],
    &[
        &[0, 0, 180, 180],
        &[0, 0, 180, 180],
        &[180, 180, 0, 0],
        &[180, 180, 0, 0],
    ],
];

/// Rotation, in degrees, for `target`'s entry in `viewer`'s overlay.
///
/// Configurations outside the table yield 0.
///
/// ```
/// use ccg_companion::core::PlayerId;
/// use ccg_companion::layout::rotation_for;
///
/// assert_eq!(rotation_for(4, PlayerId::new(1), PlayerId::new(2)), 180);
/// assert_eq!(rotation_for(4, PlayerId::new(0), PlayerId::new(1)), 0);
/// assert_eq!(rotation_for(7, PlayerId::new(0), PlayerId::new(1)), 0);
/// ```
#[must_use]
pub fn rotation_for(player_count: usize, viewer: PlayerId, target: PlayerId) -> u16 {
    player_count
        .checked_sub(1)
        .and_then(|i| ROTATIONS.get(i))
        .and_then(|viewers| viewers.get(viewer.index()))
        .and_then(|targets| targets.get(target.index()))
        .copied()
        .unwrap_or(0)
}
