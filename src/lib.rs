//! # rendezvous
//!
//! Rules, scoring and opponent AI engine for the Rendez-Vous card game.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Cards**: Special cards are parsed from deck text into a
//!    requirement, an application and an effect. Nothing about a particular
//!    deck is compiled in.
//!
//! 2. **Explicit Values**: Card values are a closed enum. Outcome sentinels
//!    never masquerade as integers.
//!
//! 3. **Tolerant Loading**: Parsers return their result together with a
//!    list of warnings. One bad line never aborts a file.
//!
//! ## Architecture
//!
//! - **Predicate Trees**: Requirements and applications share one AND/OR
//!   composite, `PredicateNode`.
//!
//! - **Reversible Effects**: Cards keep their original face plus a log of
//!   applied effect kinds, so `reset()` is total.
//!
//! - **Persistent Data Structures**: Board rows use `im` vectors so a host
//!   can snapshot a round cheaply and replay it.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Card values, cards, special definitions, hands and decks
//! - `rules`: Predicate trees for requirements and applications
//! - `effects`: Effects and the board-wide special resolver
//! - `board`: Gameboard, holds, scoreboard and round resolution
//! - `parser`: Deck, special-card and achievement text
//! - `achievements`: Statistics, criteria and the achievement book
//! - `ai`: Candidate plays and the opponent AI

pub mod core;
pub mod cards;
pub mod rules;
pub mod effects;
pub mod board;
pub mod parser;
pub mod achievements;
pub mod ai;

// Re-export commonly used types
pub use crate::core::{AiConfig, EngineError, GameConfig, GameRng, PlayerId, PlayerMap};

pub use crate::cards::{
    AllUnlocked, Card, CardFace, CardValue, Deck, Hand, PileHand, SpecialCard, Unlocks,
};

pub use crate::rules::{
    Alignment, Application, ApplicationLeaf, CountOp, Op, PredicateNode, Requirement,
    RequirementLeaf, Side,
};

pub use crate::effects::{Effect, EffectKind, EffectPayload, Resolution, SpecialResolver};

pub use crate::board::{Gameboard, HoldState, Outcome, RoundReport, RoundResolver, Scoreboard};

pub use crate::parser::{ParseWarning, Parsed, SpecialParser};

pub use crate::achievements::{Achievement, AchievementBook, AchievementCriterion, Statistics};

pub use crate::ai::{ArtificialIntelligence, Placement, PossiblePlay};
