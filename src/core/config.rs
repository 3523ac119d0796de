//! Engine configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `GameConfig`: table geometry and the base seed
//! - `AiConfig`: tuning constants for the opponent's play heuristic
//!
//! Both follow the same builder pattern: start from `Default` and
//! override with `with_*` methods.

use serde::{Deserialize, Serialize};

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Slots per side of the board.
    pub cards_on_board: usize,

    /// Cards a hand is refilled to.
    pub hand_size: usize,

    /// Base seed; deck shuffles and AI arrangement derive their streams from it.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cards_on_board: 4,
            hand_size: 10,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the number of slots per side.
    #[must_use]
    pub fn with_cards_on_board(mut self, slots: usize) -> Self {
        assert!(slots > 0, "Board needs at least one slot per side");
        self.cards_on_board = slots;
        self
    }

    /// Set the hand capacity.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Heuristic constants for the opponent AI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Seed for arranging plays against an empty opposing side.
    pub seed: u64,

    /// Flat value added per special card in a play.
    pub special_bonus: i32,

    /// Bonus for beating an opposing hold by exactly one point.
    pub hold_margin_bonus: i32,

    /// Extra value when a buff lands on one of our held cards.
    pub held_friendly_bonus: i32,

    /// Penalty per good special thrown away by a flush.
    pub flush_penalty: i32,

    /// Preference for required cards the special also affects.
    pub self_bias: i32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            special_bonus: 10,
            hold_margin_bonus: 10,
            held_friendly_bonus: 5,
            flush_penalty: 50,
            self_bias: 50,
        }
    }
}

impl AiConfig {
    /// Set the arrangement seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the flat per-special bonus.
    #[must_use]
    pub fn with_special_bonus(mut self, bonus: i32) -> Self {
        self.special_bonus = bonus;
        self
    }

    /// Set the flush penalty.
    #[must_use]
    pub fn with_flush_penalty(mut self, penalty: i32) -> Self {
        self.flush_penalty = penalty;
        self
    }
}
