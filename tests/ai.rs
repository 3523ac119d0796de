//! Opponent AI integration tests.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use rendezvous::ai::ArtificialIntelligence;
use rendezvous::board::{Gameboard, RoundResolver, Scoreboard};
use rendezvous::cards::{Card, Hand, PileHand, SpecialCard};
use rendezvous::core::{AiConfig, EngineError, PlayerId, PlayerMap};
use rendezvous::effects::Effect;
use rendezvous::rules::{Application, ApplicationLeaf, Requirement};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn suit_cards(values: impl IntoIterator<Item = i32>) -> Vec<Card> {
    values.into_iter().map(|v| Card::new("Suit", v)).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_empty_board_takes_top_four() {
    let ai = ArtificialIntelligence::new(AiConfig::default());
    let play = ai.best_play(&suit_cards(1..=10), &Gameboard::new(4), P0).unwrap();

    let chosen: HashSet<i32> = play.cards().filter_map(Card::numeric).collect();
    assert_eq!(chosen, HashSet::from([7, 8, 9, 10]));
    assert!(play.cards().all(|c| c.suit() == "Suit"));
}

#[test]
fn test_hold_is_beaten_by_the_cheapest_card() {
    let ai = ArtificialIntelligence::new(AiConfig::default());
    let mut board = Gameboard::new(4);
    board.place(P1, 1, Card::new("Suit", 2)).unwrap();
    board.hold(P1, 1);
    board.next_round();

    let play = ai.best_play(&suit_cards(1..=10), &board, P0).unwrap();
    assert_eq!(play.card_at(1).and_then(Card::numeric), Some(3));
}

// =============================================================================
// Legality
// =============================================================================

proptest! {
    #[test]
    fn plain_hands_play_the_top_cards(
        width in 1usize..=4,
        extra in 0usize..=6,
        values in prop::collection::vec(1i32..=10, 10),
        seed in any::<u64>(),
    ) {
        let hand = suit_cards(values.iter().copied().take(width + extra));
        let ai = ArtificialIntelligence::new(AiConfig::default().with_seed(seed));
        let play = ai.best_play(&hand, &Gameboard::new(width), P0).unwrap();

        let indices = play.hand_indices();
        let distinct: HashSet<usize> = indices.iter().copied().collect();
        prop_assert_eq!(indices.len(), width);
        prop_assert_eq!(distinct.len(), width);
        for placement in play.placements() {
            prop_assert_eq!(&hand[placement.hand_index], &placement.card);
        }

        let mut sorted: Vec<i32> = hand.iter().filter_map(Card::numeric).collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let best: i32 = sorted.iter().take(width).sum();
        let chosen: i32 = play.cards().filter_map(Card::numeric).sum();
        prop_assert_eq!(chosen, best);
    }
}

#[test]
fn test_carried_slots_are_skipped() {
    let mut board = Gameboard::new(4);
    board.place(P0, 0, Card::new("Suit", 5)).unwrap();
    board.hold(P0, 0);
    board.next_round();

    let ai = ArtificialIntelligence::default();
    let play = ai.best_play(&suit_cards(1..=6), &board, P0).unwrap();
    assert_eq!(play.len(), 3);
    assert!(play.card_at(0).is_none());
}

#[test]
fn test_unplayable_special_is_left_in_hand() {
    let greedy = Card::special(Arc::new(SpecialCard::new(
        "Greedy",
        "",
        Requirement::exactly(3, ApplicationLeaf::new().min(10).into()),
        ApplicationLeaf::new().friendly().into(),
        Effect::buff(10),
    )));
    let mut hand = suit_cards([2, 3, 10]);
    hand.push(greedy);

    let board = Gameboard::new(2);
    let ai = ArtificialIntelligence::default();
    let best = ai.best_play(&hand, &board, P0).unwrap();
    assert!(best.is_legal(&board, P0));
    assert!(!best.cards().any(Card::is_special));
}

#[test]
fn test_unplayable_hand_reports_no_play() {
    let needy = || {
        Card::special(Arc::new(SpecialCard::new(
            "Needy",
            "",
            Requirement::at_least(2, ApplicationLeaf::new().with_suits(["Boyfriend"]).into()),
            ApplicationLeaf::new().friendly().into(),
            Effect::buff(3),
        )))
    };
    let hand: Vec<Card> = (0..4).map(|_| needy()).collect();

    let ai = ArtificialIntelligence::default();
    let result = ai.best_play(&hand, &Gameboard::new(4), P0);
    assert!(matches!(result, Err(EngineError::NoPlayFound)));
}

#[test]
fn test_short_plain_hand_never_underfills() {
    let needy = Card::special(Arc::new(SpecialCard::new(
        "Needy",
        "",
        Requirement::at_least(3, ApplicationLeaf::new().min(9).into()),
        Application::any(),
        Effect::buff(10),
    )));
    let hand = vec![needy, Card::new("Suit", 5), Card::new("Suit", 6)];

    let ai = ArtificialIntelligence::default();
    let board = Gameboard::new(3);
    assert!(ai.analyze(&hand, &board, P0).iter().all(|play| play.len() == 3));
    assert!(matches!(ai.best_play(&hand, &board, P0), Err(EngineError::NoPlayFound)));
}

// =============================================================================
// Switch Arrangement
// =============================================================================

#[test]
fn test_switch_play_faces_lowest_card_at_highest_hold() {
    let mut board = Gameboard::new(3);
    board.place(P1, 1, Card::new("Rival", 4)).unwrap();
    board.place(P1, 2, Card::new("Rival", 9)).unwrap();
    board.hold(P1, 1);
    board.hold(P1, 2);
    board.next_round();

    let swap = Card::special(Arc::new(SpecialCard::new(
        "Swap",
        "",
        Requirement::nothing(),
        Application::any(),
        Effect::switch(),
    )));
    let mut hand = suit_cards([2, 6]);
    hand.push(swap);

    let ai = ArtificialIntelligence::default();
    let play = ai.best_play(&hand, &board, P0).unwrap();
    assert_eq!(play.card_at(2), Some(&Card::new("Suit", 2)));
    assert_eq!(play.card_at(1), Some(&Card::new("Suit", 6)));
    assert!(play.card_at(0).is_some_and(Card::is_special));
}

// =============================================================================
// Full Round
// =============================================================================

#[test]
fn test_ai_play_feeds_a_round() {
    let ai = ArtificialIntelligence::default();
    let mut board = Gameboard::new(3);
    let mut score = Scoreboard::new(["Suit", "Rival"]);

    for (slot, value) in [4, 6, 8].into_iter().enumerate() {
        board.place(P0, slot, Card::new("Rival", value)).unwrap();
    }

    let mut hands = PlayerMap::from_pair(
        PileHand::default(),
        PileHand::from_cards(suit_cards([1, 5, 7, 9, 10])),
    );
    let play = ai.best_play(hands[P1].cards(), &board, P1).unwrap();
    play.place(&mut board, P1).unwrap();
    for card in play.cards() {
        assert!(hands[P1].remove(card).is_some());
    }
    assert_eq!(hands[P1].len(), 2);

    let report = RoundResolver::resolve(&mut board, &mut score, &mut hands).unwrap();
    assert_eq!(report.outcomes.len(), 3);
    // Every Rival card is beaten.
    assert_eq!(report.balance(), -3);
    assert!(score.total(P1) > score.total(P0));
}
