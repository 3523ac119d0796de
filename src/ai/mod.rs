//! Opponent AI.
//!
//! ## Key Types
//!
//! - `PossiblePlay`: a candidate set of cards, its placement and value
//! - `ArtificialIntelligence`: builds, ranks and verifies candidates

mod possible_play;
mod intelligence;

pub use possible_play::{Placement, PlayContext, PossiblePlay};
pub use intelligence::ArtificialIntelligence;
