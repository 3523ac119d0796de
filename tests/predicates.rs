//! Predicate combinator integration tests.
//!
//! Truth tables for the AND/OR composite and counting behaviour of
//! requirements over generated card populations.

use proptest::prelude::*;

use rendezvous::cards::Card;
use rendezvous::parser::{parse_application, parse_requirement};
use rendezvous::rules::{Application, ApplicationLeaf, Op, PredicateNode, Requirement, Side};

fn leaf(v: bool) -> PredicateNode<bool> {
    PredicateNode::leaf(v)
}

fn check(node: &PredicateNode<bool>) -> bool {
    node.evaluate(&|v: &bool| *v)
}

// =============================================================================
// Combinator Truth Tables
// =============================================================================

proptest! {
    #[test]
    fn and_or_truth_tables(a: bool, b: bool, c: bool) {
        prop_assert_eq!(check(&(leaf(a) & leaf(b))), a && b);
        prop_assert_eq!(check(&(leaf(a) | leaf(b))), a || b);
        prop_assert_eq!(check(&(leaf(a) | (leaf(b) & leaf(c)))), a || (b && c));
        prop_assert_eq!(check(&((leaf(a) | leaf(b)) & leaf(c))), (a || b) && c);
    }

    #[test]
    fn chained_and_flattens(a: bool, b: bool, c: bool) {
        let node = leaf(a) & leaf(b) & leaf(c);
        prop_assert_eq!(node.op(), Some(Op::And));
        prop_assert_eq!(node.items().len(), 3);
        prop_assert_eq!(node.leaves(), vec![&a, &b, &c]);
    }
}

#[test]
fn test_mixed_chain_keeps_nesting() {
    let node = leaf(true) | leaf(false) & leaf(true);
    assert_eq!(node.op(), Some(Op::Or));
    assert_eq!(node.items().len(), 2);
    assert_eq!(node.items()[1].op(), Some(Op::And));
}

// =============================================================================
// Requirement Counting
// =============================================================================

fn card_strategy() -> impl Strategy<Value = Card> {
    (prop::sample::select(vec!["Boyfriend", "Girlfriend"]), 1i32..=10)
        .prop_map(|(suit, value)| Card::new(suit, value))
}

fn style_strategy() -> impl Strategy<Value = (Option<&'static str>, Option<i32>, Option<i32>)> {
    (
        prop::option::of(prop::sample::select(vec!["Boyfriend", "Girlfriend"])),
        prop::option::of(1i32..=10),
        prop::option::of(1i32..=10),
    )
}

proptest! {
    #[test]
    fn exactly_two_counts_matches(
        cards in prop::collection::vec(card_strategy(), 0..8),
        (suit, min, max) in style_strategy(),
    ) {
        let mut style = ApplicationLeaf::new();
        if let Some(suit) = suit {
            style = style.with_suits([suit]);
        }
        if let Some(min) = min {
            style = style.min(min);
        }
        if let Some(max) = max {
            style = style.max(max);
        }
        let requirement = Requirement::exactly(2, style.into());

        let expected = cards
            .iter()
            .filter(|card| suit.map_or(true, |s| card.suit() == s))
            .filter(|card| min.map_or(true, |m| card.numeric().unwrap_or(0) >= m))
            .filter(|card| max.map_or(true, |m| card.numeric().unwrap_or(0) <= m))
            .count();

        let refs: Vec<&Card> = cards.iter().collect();
        prop_assert_eq!(requirement.verify(&refs), expected == 2);
    }
}

#[test]
fn test_requirement_and_or() {
    let boys = || Application::from(ApplicationLeaf::new().with_suits(["Boyfriend"]));
    let girls = || Application::from(ApplicationLeaf::new().with_suits(["Girlfriend"]));
    let cards = [Card::new("Boyfriend", 3), Card::new("Boyfriend", 8)];
    let refs: Vec<&Card> = cards.iter().collect();

    let both = Requirement::at_least(2, boys()).and(Requirement::at_least(1, girls()));
    let either = Requirement::at_least(2, boys()).or(Requirement::at_least(1, girls()));
    assert!(!both.verify(&refs));
    assert!(either.verify(&refs));
}

// =============================================================================
// Parsed Predicates
// =============================================================================

#[test]
fn test_parsed_requirement_descriptions() {
    let min3 = parse_requirement("min 3");
    assert!(min3.is_clean());
    assert_eq!(min3.value.description(), "At least 3 cards");

    let empty = parse_requirement("");
    assert_eq!(empty.value.description(), "Nothing");
    assert!(empty.value.verify(&[]));
    let card = Card::new("Boyfriend", 1);
    assert!(empty.value.verify(&[&card]));
}

#[test]
fn test_parsed_application_with_opposite() {
    let app = parse_application("friendly <= 4 vs enemy >= 7").value;
    let low = Card::new("Boyfriend", 3);
    let high = Card::new("Girlfriend", 9);
    let mid = Card::new("Girlfriend", 5);

    assert!(app.matches(Side::Friendly, Some(&low), Some(&high)));
    assert!(!app.matches(Side::Friendly, Some(&low), Some(&mid)));
    assert!(!app.matches(Side::Friendly, Some(&low), None));
    assert!(!app.matches(Side::Enemy, Some(&low), Some(&high)));
}
