//! Change notifications for the rendering layer.
//!
//! The tracker records one event per observable change. A renderer drains
//! them after each input or timer poll and redraws only the seats touched.

use serde::{Deserialize, Serialize};

use super::repeat::Direction;
use crate::core::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerEvent {
    /// A seat's life total moved by `delta`.
    LifeChanged {
        player: PlayerId,
        delta: i32,
        life: i32,
        /// Running annotation shown next to the total.
        annotation: i32,
    },

    /// A commander damage cell changed value.
    CommanderDamageChanged {
        receiver: PlayerId,
        source: PlayerId,
        damage: i32,
        life_loss: i32,
    },

    /// A seat's annotation timed out.
    DeltaExpired { player: PlayerId, annotation: i32 },

    /// The open commander damage overlay changed.
    CommanderMenuToggled { open: Option<PlayerId> },

    RepeatStarted { player: PlayerId, direction: Direction },

    RepeatStopped { player: PlayerId },
}

impl TrackerEvent {
    /// The seat whose widget needs redrawing, if the event has one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            TrackerEvent::LifeChanged { player, .. }
            | TrackerEvent::DeltaExpired { player, .. }
            | TrackerEvent::RepeatStarted { player, .. }
            | TrackerEvent::RepeatStopped { player } => Some(*player),
            TrackerEvent::CommanderDamageChanged { receiver, .. } => Some(*receiver),
            TrackerEvent::CommanderMenuToggled { open } => *open,
        }
    }
}
