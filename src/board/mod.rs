//! Board state: slots, holds, scores and round resolution.
//!
//! ## Key Types
//!
//! - `Gameboard`: two rows of optional cards plus the hold grid
//! - `Scoreboard`: per-suit scores in deck suit order
//! - `RoundResolver`: applies specials and scores a round

pub mod gameboard;
pub mod scoreboard;
pub mod round;

pub use gameboard::{Gameboard, HoldState};
pub use scoreboard::{Outcome, Scoreboard, MATCH_POINTS};
pub use round::{RoundReport, RoundResolver, SlotOutcome};
