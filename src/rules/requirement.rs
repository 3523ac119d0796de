//! Requirements: what must be played alongside a special card.
//!
//! A requirement leaf counts how many candidate cards match its style and
//! compares the count against a bound. Leaves without a style always hold.

use serde::{Deserialize, Serialize};

use super::application::{Application, Side};
use super::predicate::{Op, PredicateNode};
use crate::cards::Card;

/// How a count is compared against its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountOp {
    AtLeast,
    Exactly,
    NoMoreThan,
}

impl CountOp {
    /// Compare a count against `bound`.
    #[must_use]
    pub fn compare(self, count: usize, bound: usize) -> bool {
        match self {
            CountOp::AtLeast => count >= bound,
            CountOp::Exactly => count == bound,
            CountOp::NoMoreThan => count <= bound,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CountOp::AtLeast => "At least",
            CountOp::Exactly => "Exactly",
            CountOp::NoMoreThan => "No more than",
        }
    }
}

/// A single counting test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequirementLeaf {
    pub op: CountOp,
    pub count: usize,
    /// Cards that count; `None` makes the leaf trivially true.
    pub style: Option<Application>,
}

impl RequirementLeaf {
    fn count_matches(&self, style: &Application, cards: &[&Card]) -> usize {
        cards
            .iter()
            .filter(|card| style.matches(Side::Friendly, Some(card), None))
            .count()
    }

    /// Check the leaf against candidate cards.
    #[must_use]
    pub fn verify(&self, cards: &[&Card]) -> bool {
        match &self.style {
            None => true,
            Some(style) => self.op.compare(self.count_matches(style, cards), self.count),
        }
    }

    /// Check if a single card would count toward this leaf.
    #[must_use]
    pub fn counts(&self, card: &Card) -> bool {
        self.style
            .as_ref()
            .is_some_and(|style| style.matches(Side::Friendly, Some(card), None))
    }

    fn describe(&self) -> String {
        match &self.style {
            None => "Nothing".to_string(),
            Some(style) => format!(
                "{} {} {}",
                self.op.label(),
                self.count,
                style.describe(self.count != 1)
            ),
        }
    }
}

/// Tree of requirement leaves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    root: PredicateNode<RequirementLeaf>,
}

impl From<RequirementLeaf> for Requirement {
    fn from(leaf: RequirementLeaf) -> Self {
        Self {
            root: PredicateNode::leaf(leaf),
        }
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::nothing()
    }
}

impl Requirement {
    /// Requirement that always holds.
    #[must_use]
    pub fn nothing() -> Self {
        RequirementLeaf {
            op: CountOp::AtLeast,
            count: 0,
            style: None,
        }
        .into()
    }

    /// Build a single counting leaf.
    #[must_use]
    pub fn counting(op: CountOp, count: usize, style: Application) -> Self {
        RequirementLeaf {
            op,
            count,
            style: Some(style),
        }
        .into()
    }

    /// At least `count` cards matching `style`.
    #[must_use]
    pub fn at_least(count: usize, style: Application) -> Self {
        Self::counting(CountOp::AtLeast, count, style)
    }

    /// Exactly `count` cards matching `style`.
    #[must_use]
    pub fn exactly(count: usize, style: Application) -> Self {
        Self::counting(CountOp::Exactly, count, style)
    }

    /// At most `count` cards matching `style`.
    #[must_use]
    pub fn no_more_than(count: usize, style: Application) -> Self {
        Self::counting(CountOp::NoMoreThan, count, style)
    }

    /// Wrap an existing tree.
    #[must_use]
    pub fn from_node(root: PredicateNode<RequirementLeaf>) -> Self {
        Self { root }
    }

    /// The underlying tree.
    #[must_use]
    pub fn node(&self) -> &PredicateNode<RequirementLeaf> {
        &self.root
    }

    /// AND with another requirement.
    #[must_use]
    pub fn and(self, other: Requirement) -> Self {
        Self::from_node(self.root.combine(Op::And, other.root))
    }

    /// OR with another requirement.
    #[must_use]
    pub fn or(self, other: Requirement) -> Self {
        Self::from_node(self.root.combine(Op::Or, other.root))
    }

    /// Check the requirement against the candidate cards.
    #[must_use]
    pub fn verify(&self, cards: &[&Card]) -> bool {
        self.root
            .evaluate(&|leaf: &RequirementLeaf| leaf.verify(cards))
    }

    /// Check if the requirement places no constraint at all.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.root.leaves().iter().all(|leaf| leaf.style.is_none())
    }

    /// Largest number of cards some leaf asks for. Zero if trivial.
    #[must_use]
    pub fn wanted(&self) -> usize {
        self.root
            .leaves()
            .iter()
            .filter(|leaf| leaf.style.is_some() && leaf.op != CountOp::NoMoreThan)
            .map(|leaf| leaf.count)
            .max()
            .unwrap_or(0)
    }

    /// Indices of `cards` that count toward the requirement.
    ///
    /// AND keeps cards every leaf counts, OR keeps cards any leaf counts.
    #[must_use]
    pub fn filter_indices(&self, cards: &[Card]) -> Vec<usize> {
        self.root
            .filter_indices(cards.len(), &|leaf: &RequirementLeaf, i| {
                leaf.counts(&cards[i])
            })
    }

    /// Cards that count toward the requirement.
    #[must_use]
    pub fn filter<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        self.filter_indices(cards)
            .into_iter()
            .map(|i| &cards[i])
            .collect()
    }

    /// Human-readable rendering, e.g. "At least 3 cards".
    #[must_use]
    pub fn description(&self) -> String {
        self.root.describe(&RequirementLeaf::describe)
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ApplicationLeaf;

    fn cards(values: &[i32]) -> Vec<Card> {
        values.iter().map(|&v| Card::new("Boyfriend", v)).collect()
    }

    #[test]
    fn test_nothing_always_holds() {
        let req = Requirement::nothing();
        assert!(req.verify(&[]));
        assert!(req.is_trivial());
        assert_eq!(req.description(), "Nothing");
    }

    #[test]
    fn test_count_ops() {
        let high: Application = ApplicationLeaf::new().min(6).into();
        let hand = cards(&[2, 6, 7, 9]);
        let refs: Vec<&Card> = hand.iter().collect();

        assert!(Requirement::at_least(3, high.clone()).verify(&refs));
        assert!(!Requirement::at_least(4, high.clone()).verify(&refs));
        assert!(Requirement::exactly(3, high.clone()).verify(&refs));
        assert!(!Requirement::exactly(2, high.clone()).verify(&refs));
        assert!(Requirement::no_more_than(3, high.clone()).verify(&refs));
        assert!(!Requirement::no_more_than(2, high).verify(&refs));
    }

    #[test]
    fn test_specials_do_not_count() {
        use crate::cards::SpecialCard;
        use crate::effects::Effect;
        use std::sync::Arc;

        let special = Card::special(Arc::new(SpecialCard::new(
            "Rose",
            "",
            Requirement::nothing(),
            Application::any(),
            Effect::wait(),
        )));
        let plain = Card::new("Boyfriend", 1);
        let req = Requirement::exactly(1, Application::any());
        assert!(req.verify(&[&special, &plain]));
    }

    #[test]
    fn test_and_or() {
        let low: Application = ApplicationLeaf::new().max(3).into();
        let high: Application = ApplicationLeaf::new().min(8).into();
        let hand = cards(&[1, 9]);
        let refs: Vec<&Card> = hand.iter().collect();

        let both = Requirement::at_least(1, low.clone()).and(Requirement::at_least(2, high.clone()));
        assert!(!both.verify(&refs));

        let either = Requirement::at_least(1, low).or(Requirement::at_least(2, high));
        assert!(either.verify(&refs));
    }

    #[test]
    fn test_filter() {
        let low: Application = ApplicationLeaf::new().max(3).into();
        let high: Application = ApplicationLeaf::new().min(8).into();
        let hand = cards(&[1, 5, 9, 2]);
        let req = Requirement::at_least(1, low).or(Requirement::at_least(1, high));
        assert_eq!(req.filter_indices(&hand), vec![0, 3, 2]);
    }

    #[test]
    fn test_description() {
        let req = Requirement::at_least(3, Application::any());
        assert_eq!(req.description(), "At least 3 cards");

        let one: Application = ApplicationLeaf::new().friendly().with_suits(["Girlfriend"]).into();
        assert_eq!(
            Requirement::exactly(1, one).description(),
            "Exactly 1 friendly Girlfriend card"
        );
    }

    #[test]
    fn test_wanted() {
        let req = Requirement::at_least(2, Application::any())
            .and(Requirement::no_more_than(5, Application::any()));
        assert_eq!(req.wanted(), 2);
        assert_eq!(Requirement::nothing().wanted(), 0);
    }
}
