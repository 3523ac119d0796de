//! Applications: which cards an effect reaches.
//!
//! An application leaf looks at one card, the side it sits on relative to
//! the caster, and optionally the card facing it in the same slot. Leaves
//! combine into AND/OR trees through `PredicateNode`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::predicate::{Op, PredicateNode};
use crate::cards::Card;

/// Where a card sits relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    /// The other side.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }
}

/// Which sides a leaf accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Friendly,
    Enemy,
    /// Any side.
    #[default]
    Either,
}

impl Alignment {
    /// Check if a card on `side` passes.
    #[must_use]
    pub fn admits(self, side: Side) -> bool {
        match self {
            Alignment::Either => true,
            Alignment::Friendly => side == Side::Friendly,
            Alignment::Enemy => side == Side::Enemy,
        }
    }
}

/// A single application test.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLeaf {
    pub alignment: Alignment,
    /// Accepted suits; `None` accepts any suit.
    pub suits: Option<SmallVec<[String; 2]>>,
    /// Leaf targets cards in hand rather than on the board.
    pub in_hand: bool,
    /// Inclusive lower bound on numeric value.
    pub min_value: Option<i32>,
    /// Inclusive upper bound on numeric value.
    pub max_value: Option<i32>,
    /// Test the opposing card must pass, seen from the other side.
    pub opposite: Option<Box<Application>>,
}

impl ApplicationLeaf {
    /// Leaf accepting every standard card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the caster's side.
    #[must_use]
    pub fn friendly(mut self) -> Self {
        self.alignment = Alignment::Friendly;
        self
    }

    /// Only the opposing side.
    #[must_use]
    pub fn enemy(mut self) -> Self {
        self.alignment = Alignment::Enemy;
        self
    }

    /// Restrict to the given suits.
    #[must_use]
    pub fn with_suits(mut self, suits: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suits = Some(suits.into_iter().map(Into::into).collect());
        self
    }

    /// Target the hand instead of the board.
    #[must_use]
    pub fn in_hand(mut self) -> Self {
        self.in_hand = true;
        self
    }

    /// Inclusive minimum value.
    #[must_use]
    pub fn min(mut self, value: i32) -> Self {
        self.min_value = Some(value);
        self
    }

    /// Inclusive maximum value.
    #[must_use]
    pub fn max(mut self, value: i32) -> Self {
        self.max_value = Some(value);
        self
    }

    /// Require the opposing card to pass `opposite`.
    #[must_use]
    pub fn versus(mut self, opposite: Application) -> Self {
        self.opposite = Some(Box::new(opposite));
        self
    }

    fn admits_face(&self, card: &Card) -> bool {
        if let Some(suits) = &self.suits {
            if !suits.iter().any(|s| s == card.suit()) {
                return false;
            }
        }
        if self.min_value.is_none() && self.max_value.is_none() {
            return true;
        }
        match card.numeric() {
            Some(v) => {
                self.min_value.map_or(true, |min| v >= min)
                    && self.max_value.map_or(true, |max| v <= max)
            }
            None => false,
        }
    }

    /// Board test for one card.
    #[must_use]
    pub fn matches(&self, side: Side, card: Option<&Card>, opposing: Option<&Card>) -> bool {
        let Some(card) = card else {
            return false;
        };
        if card.is_special() || self.in_hand {
            return false;
        }
        if !self.alignment.admits(side) || !self.admits_face(card) {
            return false;
        }
        match &self.opposite {
            None => true,
            Some(opposite) => opposing
                .is_some_and(|other| opposite.matches(side.reversed(), Some(other), Some(card))),
        }
    }

    fn matches_hand(&self, card: &Card) -> bool {
        self.in_hand && !card.is_special() && self.admits_face(card)
    }

    fn describe(&self, plural: bool) -> String {
        let mut text = String::new();
        match self.alignment {
            Alignment::Friendly => text.push_str("friendly "),
            Alignment::Enemy => text.push_str("enemy "),
            Alignment::Either => {}
        }
        if let Some(suits) = &self.suits {
            text.push_str(&suits.join(" or "));
            text.push(' ');
        }
        text.push_str(if plural { "cards" } else { "card" });
        if self.in_hand {
            text.push_str(" in hand");
        }
        match (self.min_value, self.max_value) {
            (Some(min), Some(max)) if min == max => text.push_str(&format!(" worth {}", min)),
            (Some(min), Some(max)) => text.push_str(&format!(" worth {} to {}", min, max)),
            (Some(min), None) => text.push_str(&format!(" worth at least {}", min)),
            (None, Some(max)) => text.push_str(&format!(" worth at most {}", max)),
            (None, None) => {}
        }
        if let Some(opposite) = &self.opposite {
            text.push_str(" against ");
            text.push_str(&opposite.describe(false));
        }
        text
    }
}

/// Tree of application leaves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    root: PredicateNode<ApplicationLeaf>,
}

impl From<ApplicationLeaf> for Application {
    fn from(leaf: ApplicationLeaf) -> Self {
        Self {
            root: PredicateNode::leaf(leaf),
        }
    }
}

impl Application {
    /// Matches every standard card on the board.
    #[must_use]
    pub fn any() -> Self {
        ApplicationLeaf::new().into()
    }

    /// Wrap an existing tree.
    #[must_use]
    pub fn from_node(root: PredicateNode<ApplicationLeaf>) -> Self {
        Self { root }
    }

    /// The underlying tree.
    #[must_use]
    pub fn node(&self) -> &PredicateNode<ApplicationLeaf> {
        &self.root
    }

    /// AND with another application.
    #[must_use]
    pub fn and(self, other: Application) -> Self {
        Self::from_node(self.root.combine(Op::And, other.root))
    }

    /// OR with another application.
    #[must_use]
    pub fn or(self, other: Application) -> Self {
        Self::from_node(self.root.combine(Op::Or, other.root))
    }

    /// Check a board card on `side`, facing `opposing`.
    ///
    /// Special cards and empty slots never match.
    #[must_use]
    pub fn matches(&self, side: Side, card: Option<&Card>, opposing: Option<&Card>) -> bool {
        self.root.evaluate(&|leaf: &ApplicationLeaf| leaf.matches(side, card, opposing))
    }

    /// Check a card held in hand against the `HAND` leaves.
    #[must_use]
    pub fn matches_hand(&self, card: &Card) -> bool {
        self.root.evaluate(&|leaf: &ApplicationLeaf| leaf.matches_hand(card))
    }

    /// Cards on `side` that match, with no opposing card known.
    #[must_use]
    pub fn filter<'a>(&self, side: Side, cards: &'a [Card]) -> Vec<&'a Card> {
        self.filter_indices(side, cards)
            .into_iter()
            .map(|i| &cards[i])
            .collect()
    }

    /// Indices of the cards that `filter` would keep.
    #[must_use]
    pub fn filter_indices(&self, side: Side, cards: &[Card]) -> Vec<usize> {
        self.root
            .filter_indices(cards.len(), &|leaf: &ApplicationLeaf, i| {
                leaf.matches(side, Some(&cards[i]), None)
            })
    }

    /// Check if any leaf targets the hand.
    #[must_use]
    pub fn targets_hand(&self) -> bool {
        self.root.leaves().iter().any(|leaf| leaf.in_hand)
    }

    /// Check if some leaf could accept a card on `side`.
    #[must_use]
    pub fn can_reach(&self, side: Side) -> bool {
        self.root
            .leaves()
            .iter()
            .any(|leaf| !leaf.in_hand && leaf.alignment.admits(side))
    }

    /// Human-readable rendering.
    #[must_use]
    pub fn describe(&self, plural: bool) -> String {
        self.root.describe(&|leaf: &ApplicationLeaf| leaf.describe(plural))
    }
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe(true))
    }
}
