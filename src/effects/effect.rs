//! Effect definitions.
//!
//! An effect is a kind plus a payload whose shape depends on the kind.
//! Effects carry no behavior of their own: cards apply them to
//! themselves (`Card::apply`) and the board engine decides which cards
//! they reach (`SpecialResolver`).

use serde::{Deserialize, Serialize};

use crate::cards::{CardFace, CardValue};

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Add a delta, or force a Win/Lose outcome.
    Buff,
    /// Scale the value, rounding in the multiplier's favor.
    Multiply,
    /// Keep the matched slot on the board into the next round.
    Wait,
    /// Trade values with the paired opposing card.
    Switch,
    /// Flip Win/Lose, mirror numbers around 5.5.
    Reverse,
    /// Overwrite suit and/or value.
    Replace,
    /// Both participants of the matchup win.
    Kiss,
    /// Copy suit and value from a donor card.
    Clone,
    /// Discard and redraw the caster's hand.
    Flush,
    /// Re-roll a field of the matched card.
    Randomize,
}

impl EffectKind {
    /// Resolve the first word of an effect line.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "BUFF" => EffectKind::Buff,
            "MULTIPLY" | "MULT" => EffectKind::Multiply,
            "WAIT" | "HOLD" => EffectKind::Wait,
            "SWITCH" | "SWAP" => EffectKind::Switch,
            "REVERSE" => EffectKind::Reverse,
            "REPLACE" => EffectKind::Replace,
            "KISS" => EffectKind::Kiss,
            "CLONE" => EffectKind::Clone,
            "FLUSH" => EffectKind::Flush,
            "RANDOMIZE" | "RANDOM" => EffectKind::Randomize,
            _ => return None,
        };
        Some(kind)
    }

    /// Effects that pay off most when played with low cards.
    #[must_use]
    pub fn rewards_low(self) -> bool {
        matches!(self, EffectKind::Switch | EffectKind::Reverse | EffectKind::Kiss)
    }

    /// Effects too valuable to lose to a flush.
    #[must_use]
    pub fn is_keeper(self) -> bool {
        matches!(
            self,
            EffectKind::Wait
                | EffectKind::Switch
                | EffectKind::Reverse
                | EffectKind::Kiss
                | EffectKind::Flush
        )
    }
}

/// Field a Randomize effect re-rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomField {
    Suit,
    Value,
    Both,
}

/// Kind-specific effect data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectPayload {
    /// The kind needs no data (Wait, Reverse, Kiss, Flush).
    None,
    /// Buff delta or forced outcome; Switch value; Replace value.
    Value(CardValue),
    /// Multiply factor.
    Factor(f64),
    /// Replace suit.
    Suit(String),
    /// Replace suit and value; Clone donor.
    Face(CardFace),
    /// Randomize target.
    Field(RandomField),
}

/// An effect descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub payload: EffectPayload,
}

impl Effect {
    /// Create an effect from its parts.
    #[must_use]
    pub fn new(kind: EffectKind, payload: EffectPayload) -> Self {
        Self { kind, payload }
    }

    /// Add `delta` to numeric values.
    #[must_use]
    pub fn buff(delta: i32) -> Self {
        Self::new(EffectKind::Buff, EffectPayload::Value(CardValue::Numeric(delta)))
    }

    /// Force an outcome (`Win` or `Lose`) onto matched cards.
    #[must_use]
    pub fn buff_outcome(outcome: CardValue) -> Self {
        Self::new(EffectKind::Buff, EffectPayload::Value(outcome))
    }

    /// Scale numeric values.
    #[must_use]
    pub fn multiply(factor: f64) -> Self {
        Self::new(EffectKind::Multiply, EffectPayload::Factor(factor))
    }

    /// Hold matched slots.
    #[must_use]
    pub fn wait() -> Self {
        Self::new(EffectKind::Wait, EffectPayload::None)
    }

    /// Switch marker as parsed from a deck; the engine supplies the value.
    #[must_use]
    pub fn switch() -> Self {
        Self::new(EffectKind::Switch, EffectPayload::None)
    }

    /// Switch carrying the value the card receives.
    #[must_use]
    pub fn switch_to(value: CardValue) -> Self {
        Self::new(EffectKind::Switch, EffectPayload::Value(value))
    }

    /// Flip outcomes and mirror numbers.
    #[must_use]
    pub fn reverse() -> Self {
        Self::new(EffectKind::Reverse, EffectPayload::None)
    }

    /// Replace the suit only.
    #[must_use]
    pub fn replace_suit(suit: impl Into<String>) -> Self {
        Self::new(EffectKind::Replace, EffectPayload::Suit(suit.into()))
    }

    /// Replace the value only.
    #[must_use]
    pub fn replace_value(value: CardValue) -> Self {
        Self::new(EffectKind::Replace, EffectPayload::Value(value))
    }

    /// Replace suit and value.
    #[must_use]
    pub fn replace_face(face: CardFace) -> Self {
        Self::new(EffectKind::Replace, EffectPayload::Face(face))
    }

    /// Turn matched cards into kisses.
    #[must_use]
    pub fn kiss() -> Self {
        Self::new(EffectKind::Kiss, EffectPayload::None)
    }

    /// Clone marker as parsed from a deck; the engine supplies the donor.
    #[must_use]
    pub fn clone_marker() -> Self {
        Self::new(EffectKind::Clone, EffectPayload::None)
    }

    /// Clone carrying the donor face.
    #[must_use]
    pub fn clone_of(donor: CardFace) -> Self {
        Self::new(EffectKind::Clone, EffectPayload::Face(donor))
    }

    /// Flush the caster's hand.
    #[must_use]
    pub fn flush() -> Self {
        Self::new(EffectKind::Flush, EffectPayload::None)
    }

    /// Re-roll a field.
    #[must_use]
    pub fn randomize(field: RandomField) -> Self {
        Self::new(EffectKind::Randomize, EffectPayload::Field(field))
    }

    /// Effect substituted for an unreadable effect line; changes nothing.
    #[must_use]
    pub fn inert() -> Self {
        Self::buff(0)
    }

    /// Numeric delta this effect adds to a card worth `value`, if it is
    /// a numeric buff or a multiplier.
    #[must_use]
    pub fn numeric_delta(&self, value: i32) -> Option<i32> {
        match (&self.kind, &self.payload) {
            (EffectKind::Buff, EffectPayload::Value(CardValue::Numeric(d))) => Some(*d),
            (EffectKind::Buff, EffectPayload::Value(CardValue::Win)) => Some(10),
            (EffectKind::Buff, EffectPayload::Value(CardValue::Lose)) => Some(-10),
            (EffectKind::Multiply, EffectPayload::Factor(f)) => {
                Some(multiply_value(value, *f) - value)
            }
            _ => None,
        }
    }
}

/// Multiply rounding: up for factors above one, down otherwise.
#[must_use]
pub fn multiply_value(value: i32, factor: f64) -> i32 {
    let scaled = f64::from(value) * factor;
    if factor > 1.0 {
        scaled.ceil() as i32
    } else {
        scaled.floor() as i32
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            EffectPayload::None => write!(f, "{:?}", self.kind),
            EffectPayload::Value(CardValue::Numeric(v)) if self.kind == EffectKind::Buff => {
                write!(f, "Buff {:+}", v)
            }
            EffectPayload::Value(v) => write!(f, "{:?} {}", self.kind, v),
            EffectPayload::Factor(x) => write!(f, "{:?} x{}", self.kind, x),
            EffectPayload::Suit(s) => write!(f, "{:?} {}", self.kind, s),
            EffectPayload::Face(face) => write!(f, "{:?} {}", self.kind, face),
            EffectPayload::Field(field) => write!(f, "{:?} {:?}", self.kind, field),
        }
    }
}
