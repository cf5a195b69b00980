//! Screen arrangement: where seats go and which way each screen faces.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, SessionConfig};

/// Device orientation a screen locks to while shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// The application's screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    GameSetup,
    Game(SessionConfig),
    Scanner,
}

impl Screen {
    /// Setup and scanning are used one-handed; the game lies flat between
    /// the players.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        match self {
            Screen::GameSetup | Screen::Scanner => Orientation::Portrait,
            Screen::Game(_) => Orientation::Landscape,
        }
    }
}

/// Seats arranged in rows, top to bottom, left to right.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    rows: Vec<Vec<PlayerId>>,
}

impl SeatLayout {
    /// Game-screen layout for a table of `player_count`.
    ///
    /// Two seats per row; an odd last seat takes a row of its own.
    ///
    /// ```
    /// use ccg_companion::core::PlayerId;
    /// use ccg_companion::layout::SeatLayout;
    ///
    /// let layout = SeatLayout::for_players(3);
    /// assert_eq!(layout.rows()[1], vec![PlayerId::new(2)]);
    /// ```
    #[must_use]
    pub fn for_players(player_count: usize) -> Self {
        let seats: Vec<_> = PlayerId::all(player_count).collect();
        Self {
            rows: seats.chunks(2).map(<[PlayerId]>::to_vec).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<PlayerId>] {
        &self.rows
    }

    /// Row and column of a seat.
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter().position(|p| *p == player).map(|c| (r, c))
        })
    }
}
