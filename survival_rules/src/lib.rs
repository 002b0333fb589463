//! # Survival Rules
//!
//! The rule book of the survivor story - player stats and their bounds,
//! choice conditions, psychological modes and the ending policy.
//! Everything here is a pure function of [`PlayerState`]; this crate knows
//! nothing about scenes or story content.

pub mod error;
pub mod mechanics;
pub mod player_state;

pub use error::*;
pub use mechanics::*;
pub use player_state::*;
