//! Display geometry: overlay rotation per seat, seat rows, and screen
//! orientation. Nothing here touches game state.

pub mod rotation;
pub mod seating;

pub use rotation::rotation_for;
pub use seating::{Orientation, Screen, SeatLayout};
