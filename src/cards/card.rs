//! Card instances - runtime card state.
//!
//! A `Card` keeps the face it was drawn with (`original`) next to the face
//! it currently shows. Effects only ever touch the current face and are
//! logged, so `reset()` is a single assignment back to the original.
//!
//! Special cards share their requirement/application/effect trees through
//! an `Arc`; every drawn copy is an independent `Card` around the same
//! definition.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::special::SpecialCard;
use super::value::CardValue;
use crate::effects::{Effect, EffectKind, EffectPayload};

/// Suit and value of a card at one moment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub suit: String,
    pub value: CardValue,
}

impl CardFace {
    /// Create a face.
    #[must_use]
    pub fn new(suit: impl Into<String>, value: CardValue) -> Self {
        Self {
            suit: suit.into(),
            value,
        }
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

/// A card in a hand or on the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    original: CardFace,
    face: CardFace,
    /// Kinds applied since the last reset, oldest first.
    applied: SmallVec<[EffectKind; 4]>,
    special: Option<Arc<SpecialCard>>,
}

impl Card {
    /// Create a standard card.
    #[must_use]
    pub fn new(suit: impl Into<String>, value: i32) -> Self {
        Self::with_value(suit, CardValue::Numeric(value))
    }

    /// Create a card with an arbitrary value, sentinels included.
    #[must_use]
    pub fn with_value(suit: impl Into<String>, value: CardValue) -> Self {
        let face = CardFace::new(suit, value);
        Self {
            original: face.clone(),
            face,
            applied: SmallVec::new(),
            special: None,
        }
    }

    /// Draw a copy of a special card.
    #[must_use]
    pub fn special(definition: Arc<SpecialCard>) -> Self {
        let face = CardFace::new(String::new(), CardValue::Special);
        Self {
            original: face.clone(),
            face,
            applied: SmallVec::new(),
            special: Some(definition),
        }
    }

    /// Current suit.
    #[must_use]
    pub fn suit(&self) -> &str {
        &self.face.suit
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> CardValue {
        self.face.value
    }

    /// Current value if numeric.
    #[must_use]
    pub fn numeric(&self) -> Option<i32> {
        self.face.value.numeric()
    }

    /// Current face.
    #[must_use]
    pub fn face(&self) -> &CardFace {
        &self.face
    }

    /// Face the card was drawn with.
    #[must_use]
    pub fn original(&self) -> &CardFace {
        &self.original
    }

    /// Effect kinds applied since the last reset.
    #[must_use]
    pub fn applied(&self) -> &[EffectKind] {
        &self.applied
    }

    /// Check if this is a special card.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }

    /// The special definition, if this is a special card.
    #[must_use]
    pub fn special_def(&self) -> Option<&SpecialCard> {
        self.special.as_deref()
    }

    /// Shared handle to the special definition.
    #[must_use]
    pub fn shared_special(&self) -> Option<&Arc<SpecialCard>> {
        self.special.as_ref()
    }

    /// Name a card is known by: special name, or its suit.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.special {
            Some(def) => &def.name,
            None => &self.face.suit,
        }
    }

    /// Human-readable description of the current state.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.special {
            Some(def) => format!("{}: {}", def.name, def.description),
            None => self.face.to_string(),
        }
    }

    /// Compare by value. Only standard numeric cards are ordered.
    #[must_use]
    pub fn cmp_value(&self, other: &Card) -> Option<Ordering> {
        if self.is_special() || other.is_special() {
            return None;
        }
        self.face.value.partial_cmp(&other.face.value)
    }

    /// Apply an effect to this card. Returns whether the face changed.
    ///
    /// Specials and kissed cards are immune. Wait, Flush and Randomize are
    /// board-level effects and leave the card untouched.
    pub fn apply(&mut self, effect: &Effect) -> bool {
        if self.is_special() || self.face.value == CardValue::Kiss {
            return false;
        }

        let current = self.face.value;
        let next = match (effect.kind, &effect.payload) {
            (EffectKind::Buff, EffectPayload::Value(delta)) => match (current, *delta) {
                (_, CardValue::Win | CardValue::Lose) => CardFace::new(self.face.suit.clone(), *delta),
                (CardValue::Numeric(v), CardValue::Numeric(d)) => {
                    CardFace::new(self.face.suit.clone(), CardValue::Numeric(v + d))
                }
                _ => return false,
            },
            (EffectKind::Multiply, EffectPayload::Factor(factor)) => match current {
                CardValue::Numeric(v) => CardFace::new(
                    self.face.suit.clone(),
                    CardValue::Numeric(crate::effects::multiply_value(v, *factor)),
                ),
                _ => return false,
            },
            (EffectKind::Switch, EffectPayload::Value(value)) => {
                CardFace::new(self.face.suit.clone(), *value)
            }
            (EffectKind::Reverse, _) => {
                let flipped = match current {
                    CardValue::Win => CardValue::Lose,
                    CardValue::Lose => CardValue::Win,
                    CardValue::Numeric(v) => CardValue::Numeric(11 - v),
                    other => other,
                };
                CardFace::new(self.face.suit.clone(), flipped)
            }
            (EffectKind::Replace, EffectPayload::Suit(suit)) => CardFace::new(suit.clone(), current),
            (EffectKind::Replace, EffectPayload::Value(value)) => {
                CardFace::new(self.face.suit.clone(), *value)
            }
            (EffectKind::Replace | EffectKind::Clone, EffectPayload::Face(face)) => face.clone(),
            (EffectKind::Kiss, _) => CardFace::new(self.face.suit.clone(), CardValue::Kiss),
            _ => return false,
        };

        if next == self.face {
            return false;
        }

        tracing::trace!(from = %self.face, to = %next, kind = ?effect.kind, "effect applied");
        self.face = next;
        self.applied.push(effect.kind);
        true
    }

    /// Restore the face the card was drawn with and clear the effect log.
    pub fn reset(&mut self) {
        self.face = self.original.clone();
        self.applied.clear();
    }
}

impl PartialEq for Card {
    /// Suit and value, plus the special name for special cards.
    fn eq(&self, other: &Self) -> bool {
        self.face == other.face
            && self.special.as_ref().map(|s| s.name.as_str())
                == other.special.as_ref().map(|s| s.name.as_str())
    }
}

impl Eq for Card {}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.special {
            Some(def) => write!(f, "{}", def.name),
            None => write!(f, "{}", self.face),
        }
    }
}
