//! Decks: suits plus special card definitions.
//!
//! A deck is loaded once from definition text. Every round draw pile is
//! built fresh from it: each suit contributes values 1..=10 and every
//! currently drawable special contributes one copy.

use std::path::Path;
use std::sync::Arc;

use super::card::Card;
use super::special::SpecialCard;
use super::value::{MAX_VALUE, MIN_VALUE};
use super::hand::{Hand, PileHand};
use crate::core::{EngineError, GameConfig, GameRng, PlayerId};
use crate::parser::{self, Parsed};

/// Decides whether a special may be drawn.
///
/// Implemented by the achievement book: specials handed out as rewards
/// stay out of the pile until their achievement is reached.
pub trait Unlocks {
    /// Check if the special named `special` is drawable.
    fn unlocked(&self, special: &str) -> bool;
}

/// Every special is drawable.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllUnlocked;

impl Unlocks for AllUnlocked {
    fn unlocked(&self, _special: &str) -> bool {
        true
    }
}

/// A parsed deck.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deck {
    /// Deck name, used to select per-deck statistics.
    pub name: String,

    /// Suits in declaration order; scoreboard columns follow this order.
    pub suits: Vec<String>,

    /// Special definitions in declaration order.
    pub specials: Vec<Arc<SpecialCard>>,
}

impl Deck {
    /// Create a deck with no specials.
    #[must_use]
    pub fn new(name: impl Into<String>, suits: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            suits: suits.into_iter().map(Into::into).collect(),
            specials: Vec::new(),
        }
    }

    /// Add a special definition (builder pattern).
    #[must_use]
    pub fn with_special(mut self, special: SpecialCard) -> Self {
        self.specials.push(Arc::new(special));
        self
    }

    /// Parse deck definition text.
    #[must_use]
    pub fn parse(name: impl Into<String>, text: &str) -> Parsed<Deck> {
        parser::parse_deck(name, text)
    }

    /// Read and parse a deck file. The deck is named after the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Parsed<Deck>, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::from_io(e, path))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::parse(name, &text))
    }

    /// Look up a special by name.
    #[must_use]
    pub fn special(&self, name: &str) -> Option<&Arc<SpecialCard>> {
        self.specials.iter().find(|s| s.name == name)
    }

    /// Specials currently allowed into the pile.
    pub fn drawable_specials<'a>(
        &'a self,
        unlocks: &'a impl Unlocks,
    ) -> impl Iterator<Item = &'a Arc<SpecialCard>> + 'a {
        self.specials.iter().filter(move |s| unlocks.unlocked(&s.name))
    }

    /// Build a shuffled draw pile.
    #[must_use]
    pub fn build_pile(&self, unlocks: &impl Unlocks, rng: &mut GameRng) -> Vec<Card> {
        let mut pile: Vec<Card> = self
            .suits
            .iter()
            .flat_map(|suit| (MIN_VALUE..=MAX_VALUE).map(move |v| Card::new(suit.clone(), v)))
            .collect();
        pile.extend(
            self.drawable_specials(unlocks)
                .map(|s| Card::special(Arc::clone(s))),
        );
        rng.shuffle(&mut pile);
        pile
    }

    /// Deal a fresh hand for one player.
    ///
    /// The pile is shuffled from the `player`-specific stream of the
    /// configured seed and the hand is filled to `hand_size`.
    #[must_use]
    pub fn deal(&self, config: &GameConfig, player: PlayerId, unlocks: &impl Unlocks) -> PileHand {
        let mut rng = GameRng::new(config.seed).for_context(&format!("deck-{}", player));
        let mut hand = PileHand::new(self.build_pile(unlocks, &mut rng), config.hand_size);
        hand.refill();
        hand
    }
}
