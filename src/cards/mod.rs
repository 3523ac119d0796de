//! Card system: values, cards, special definitions, hands and decks.
//!
//! ## Key Types
//!
//! - `CardValue`: numeric value or sentinel outcome
//! - `Card`: runtime card with original and current face
//! - `SpecialCard`: shared requirement/application/effect definition
//! - `Hand`: collaborator contract for a player's hand
//! - `Deck`: suits and specials parsed from deck text

pub mod value;
pub mod card;
pub mod special;
pub mod hand;
pub mod deck;

pub use value::{CardValue, MAX_VALUE, MIN_VALUE};
pub use card::{Card, CardFace};
pub use special::SpecialCard;
pub use hand::{Hand, PileHand};
pub use deck::{AllUnlocked, Deck, Unlocks};
