//! Card values.
//!
//! A card's value is either a plain number or one of a closed set of
//! sentinel outcomes. Arithmetic is only defined on `Numeric`; the
//! sentinels short-circuit scoring instead.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Lowest value a standard card is printed with.
pub const MIN_VALUE: i32 = 1;

/// Highest value a standard card is printed with.
pub const MAX_VALUE: i32 = 10;

/// Value carried by a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardValue {
    /// Ordinary value, printed 1..=10 but free to drift under effects.
    Numeric(i32),
    /// Always wins its matchup.
    Win,
    /// Always loses its matchup.
    Lose,
    /// Always draws its matchup.
    Draw,
    /// Both sides of the matchup score as winners. Immune to further effects.
    Kiss,
    /// Marks a special card; never scored.
    Special,
}

impl CardValue {
    /// The number, if this is a numeric value.
    #[must_use]
    pub fn numeric(self) -> Option<i32> {
        match self {
            CardValue::Numeric(v) => Some(v),
            _ => None,
        }
    }

    /// Check if this is a numeric value.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, CardValue::Numeric(_))
    }

    /// Check if this is one of the forced match outcomes.
    #[must_use]
    pub fn is_outcome(self) -> bool {
        matches!(
            self,
            CardValue::Win | CardValue::Lose | CardValue::Draw | CardValue::Kiss
        )
    }

    /// Resolve a DSL word: `WIN`, `LOSE`, `DRAW`, `KISS` or an integer.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "WIN" => Some(CardValue::Win),
            "LOSE" => Some(CardValue::Lose),
            "DRAW" => Some(CardValue::Draw),
            "KISS" => Some(CardValue::Kiss),
            _ => word.parse().ok().map(CardValue::Numeric),
        }
    }
}

impl PartialOrd for CardValue {
    /// Only numeric values are ordered; identical sentinels compare equal.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (CardValue::Numeric(a), CardValue::Numeric(b)) => Some(a.cmp(b)),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<i32> for CardValue {
    fn from(v: i32) -> Self {
        CardValue::Numeric(v)
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardValue::Numeric(v) => write!(f, "{}", v),
            CardValue::Win => write!(f, "Win"),
            CardValue::Lose => write!(f, "Lose"),
            CardValue::Draw => write!(f, "Draw"),
            CardValue::Kiss => write!(f, "Kiss"),
            CardValue::Special => write!(f, "Special"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering() {
        assert!(CardValue::Numeric(3) < CardValue::Numeric(7));
        assert_eq!(
            CardValue::Numeric(5).partial_cmp(&CardValue::Numeric(5)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_sentinels_unordered() {
        assert_eq!(CardValue::Win.partial_cmp(&CardValue::Numeric(3)), None);
        assert_eq!(CardValue::Win.partial_cmp(&CardValue::Lose), None);
        assert_eq!(CardValue::Kiss.partial_cmp(&CardValue::Kiss), Some(Ordering::Equal));
    }

    #[test]
    fn test_from_word() {
        assert_eq!(CardValue::from_word("win"), Some(CardValue::Win));
        assert_eq!(CardValue::from_word("LOSE"), Some(CardValue::Lose));
        assert_eq!(CardValue::from_word("-2"), Some(CardValue::Numeric(-2)));
        assert_eq!(CardValue::from_word("Boyfriend"), None);
    }

    #[test]
    fn test_outcome_classification() {
        assert!(CardValue::Kiss.is_outcome());
        assert!(!CardValue::Special.is_outcome());
        assert!(!CardValue::Numeric(4).is_outcome());
        assert_eq!(CardValue::Numeric(4).numeric(), Some(4));
        assert_eq!(CardValue::Draw.numeric(), None);
    }
}
