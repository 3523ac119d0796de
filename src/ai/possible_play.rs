//! Candidate plays and their heuristic value.
//!
//! A `PossiblePlay` is built in four steps:
//!
//! 1. Tentatively apply the play's Buff, Multiply and Reverse specials to
//!    copies of the played cards and the opposing cards. A Switch swaps its
//!    lowest matching card with the highest opposing card and pins the pair
//!    to that column.
//! 2. Arrange the cards over the open slots using those values.
//! 3. Reset the copies.
//! 4. Score the arrangement with the original values.

use crate::board::Gameboard;
use crate::cards::{Card, CardValue};
use crate::core::{AiConfig, GameRng, PlayerId};
use crate::effects::{Effect, EffectKind};
use crate::rules::Side;

/// Value assumed for a card that is not on the board yet.
const UNKNOWN_VALUE: i32 = 5;

/// Hand, board and seat a play is judged against.
#[derive(Clone, Copy, Debug)]
pub struct PlayContext<'a> {
    pub hand: &'a [Card],
    pub board: &'a Gameboard,
    pub player: PlayerId,
}

impl<'a> PlayContext<'a> {
    /// Bundle a hand and board for `player`.
    #[must_use]
    pub fn new(hand: &'a [Card], board: &'a Gameboard, player: PlayerId) -> Self {
        Self {
            hand,
            board,
            player,
        }
    }

    fn opponent(&self) -> PlayerId {
        self.player.opponent()
    }
}

/// One card going into one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub slot: usize,
    /// Index of the card in the hand the play was built from.
    pub hand_index: usize,
    pub card: Card,
}

/// Sort key for arranging cards; specials sit at zero.
fn rank(card: &Card) -> i32 {
    match card.value() {
        CardValue::Numeric(v) => v,
        CardValue::Win => 100,
        CardValue::Kiss => 50,
        CardValue::Lose => -100,
        CardValue::Draw | CardValue::Special => 0,
    }
}

/// A candidate set of cards with its placement and value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossiblePlay {
    placements: Vec<Placement>,
    value: i32,
}

impl PossiblePlay {
    /// The trivial play for a full board.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            placements: Vec::new(),
            value: 0,
        }
    }

    /// Build and value a play from hand indices.
    #[must_use]
    pub fn new(indices: &[usize], ctx: &PlayContext<'_>, config: &AiConfig, rng: &mut GameRng) -> Self {
        let mut working: Vec<Card> = indices.iter().map(|&i| ctx.hand[i].clone()).collect();
        let mut opposing: Vec<Option<Card>> = ctx.board.side(ctx.opponent()).map(|c| c.cloned()).collect();

        let open = ctx.board.open_slots(ctx.player);
        let pinned = Self::apply_tentative(&mut working, &mut opposing, &open);
        let order = Self::arrange(&working, &opposing, pinned, ctx, rng);
        working.iter_mut().for_each(Card::reset);

        let placements = order
            .into_iter()
            .map(|(slot, i)| Placement {
                slot,
                hand_index: indices[i],
                card: working[i].clone(),
            })
            .collect();

        let mut play = Self {
            placements,
            value: 0,
        };
        play.value = play.calculate(ctx, config);
        play
    }

    /// Cards in slot order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Played cards in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.placements.iter().map(|p| &p.card)
    }

    /// Hand indices of the played cards, in slot order.
    #[must_use]
    pub fn hand_indices(&self) -> Vec<usize> {
        self.placements.iter().map(|p| p.hand_index).collect()
    }

    /// Heuristic value.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Number of cards played.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Check if nothing is played.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Card going into `slot`.
    #[must_use]
    pub fn card_at(&self, slot: usize) -> Option<&Card> {
        self.placements.iter().find(|p| p.slot == slot).map(|p| &p.card)
    }

    /// Check every special's requirement against the played cards plus
    /// the caster's held board cards.
    #[must_use]
    pub fn is_legal(&self, board: &Gameboard, player: PlayerId) -> bool {
        let pool: Vec<&Card> = self
            .cards()
            .chain(board.held(player).map(|(_, card)| card))
            .collect();
        self.cards()
            .filter_map(Card::special_def)
            .all(|special| special.requirement.verify(&pool))
    }

    /// Put the cards on the board. Stops at the first slot that is no
    /// longer open and hands that card back.
    pub fn place(&self, board: &mut Gameboard, player: PlayerId) -> Result<(), Card> {
        for placement in &self.placements {
            board.place(player, placement.slot, placement.card.clone())?;
        }
        Ok(())
    }

    /// Apply Buff, Multiply and Reverse to the working and opposing
    /// copies, then pin Switch pairs to their columns. Returns the pinned
    /// `(slot, working index)` pairs.
    fn apply_tentative(working: &mut [Card], opposing: &mut [Option<Card>], open: &[usize]) -> Vec<(usize, usize)> {
        let specials: Vec<_> = working
            .iter()
            .filter_map(|c| c.shared_special().cloned())
            .collect();

        for special in specials.iter().filter(|s| {
            matches!(
                s.effect.kind,
                EffectKind::Buff | EffectKind::Multiply | EffectKind::Reverse
            )
        }) {
            for card in working.iter_mut() {
                if special.application.matches(Side::Friendly, Some(&*card), None) {
                    card.apply(&special.effect);
                }
            }
            for card in opposing.iter_mut().flatten() {
                if special.application.matches(Side::Enemy, Some(&*card), None) {
                    card.apply(&special.effect);
                }
            }
        }

        let mut pinned: Vec<(usize, usize)> = Vec::new();
        for special in specials.iter().filter(|s| s.effect.kind == EffectKind::Switch) {
            let app = &special.application;
            let mut targets: Vec<(i32, usize)> = open
                .iter()
                .filter(|slot| !pinned.iter().any(|(s, _)| s == *slot))
                .filter_map(|&slot| {
                    let card = opposing.get(slot)?.as_ref()?;
                    card.numeric().map(|v| (v, slot))
                })
                .collect();
            targets.sort_by_key(|&(v, slot)| (std::cmp::Reverse(v), slot));

            for (_, slot) in targets {
                let Some(theirs) = opposing.get_mut(slot).and_then(Option::as_mut) else {
                    continue;
                };
                let mine = (0..working.len())
                    .filter(|i| !pinned.iter().any(|(_, p)| p == i))
                    .filter(|&i| working[i].numeric().is_some())
                    .filter(|&i| {
                        app.matches(Side::Friendly, Some(&working[i]), Some(&*theirs))
                            || app.matches(Side::Enemy, Some(&*theirs), Some(&working[i]))
                    })
                    .min_by_key(|&i| rank(&working[i]));
                let Some(i) = mine else {
                    continue;
                };

                let (my_value, their_value) = (working[i].value(), theirs.value());
                working[i].apply(&Effect::switch_to(their_value));
                theirs.apply(&Effect::switch_to(my_value));
                pinned.push((slot, i));
            }
        }
        pinned
    }

    /// Pair card indices with open slots, sorted by slot. Pinned pairs
    /// keep their slot. The greedy pass targets every opposing card facing
    /// an open slot, whether held or played this round.
    fn arrange(
        working: &[Card],
        opposing: &[Option<Card>],
        pinned: Vec<(usize, usize)>,
        ctx: &PlayContext<'_>,
        rng: &mut GameRng,
    ) -> Vec<(usize, usize)> {
        let open = ctx.board.open_slots(ctx.player);
        let mut assigned = pinned;
        let mut remaining: Vec<usize> = (0..working.len())
            .filter(|i| !assigned.iter().any(|(_, p)| p == i))
            .collect();

        let has_clone = working
            .iter()
            .filter_map(Card::special_def)
            .any(|s| s.effect.kind == EffectKind::Clone);

        if has_clone {
            remaining.sort_by_key(|&i| std::cmp::Reverse(rank(&working[i])));
        } else if ctx.board.side_is_empty(ctx.opponent()) {
            rng.shuffle(&mut remaining);
        } else {
            for &slot in &open {
                if assigned.iter().any(|(s, _)| *s == slot) {
                    continue;
                }
                let Some(target) = opposing.get(slot).and_then(Option::as_ref).and_then(Card::numeric) else {
                    continue;
                };
                let beater = remaining
                    .iter()
                    .copied()
                    .filter(|&i| !working[i].is_special() && rank(&working[i]) > target)
                    .min_by_key(|&i| rank(&working[i]));
                let pick = beater.or_else(|| remaining.iter().copied().min_by_key(|&i| rank(&working[i])));
                let Some(pick) = pick else {
                    break;
                };
                remaining.retain(|&i| i != pick);
                assigned.push((slot, pick));
            }
        }

        let free_slots: Vec<usize> = open
            .into_iter()
            .filter(|slot| !assigned.iter().any(|(s, _)| s == slot))
            .collect();
        assigned.extend(free_slots.into_iter().zip(remaining));
        assigned.sort_unstable();
        assigned
    }

    fn calculate(&self, ctx: &PlayContext<'_>, config: &AiConfig) -> i32 {
        let board = ctx.board;
        let me = ctx.player;
        let them = ctx.opponent();
        let friendly = |slot: usize| self.card_at(slot).or_else(|| board.get(me, slot));
        let enemy = |slot: usize| board.get(them, slot);

        let mut value: i32 = self.cards().filter_map(Card::numeric).sum();

        for p in &self.placements {
            let (Some(mine), Some(target)) = (p.card.numeric(), enemy(p.slot).and_then(Card::numeric)) else {
                continue;
            };
            if board.is_held(them, p.slot) && mine == target + 1 {
                value += config.hold_margin_bonus;
            }
        }

        for special in self.cards().filter_map(Card::special_def) {
            value += config.special_bonus;
            let app = &special.application;
            let effect = &special.effect;

            match effect.kind {
                EffectKind::Buff | EffectKind::Multiply => {
                    let delta = |v: i32| effect.numeric_delta(v).unwrap_or(0);
                    for p in &self.placements {
                        if let Some(v) = p.card.numeric() {
                            if app.matches(Side::Friendly, Some(&p.card), enemy(p.slot)) {
                                value += delta(v);
                            }
                        }
                    }
                    for (slot, card) in board.held(me) {
                        if let Some(v) = card.numeric() {
                            if app.matches(Side::Friendly, Some(card), enemy(slot)) {
                                value += delta(v) + config.held_friendly_bonus;
                            }
                        }
                    }
                    for slot in 0..board.width() {
                        match enemy(slot) {
                            Some(card) => {
                                if app.matches(Side::Enemy, Some(card), friendly(slot)) {
                                    value -= card.numeric().map_or(0, delta);
                                }
                            }
                            None if board.is_open(them, slot) && app.can_reach(Side::Enemy) => {
                                value -= delta(UNKNOWN_VALUE);
                            }
                            None => {}
                        }
                    }
                }
                EffectKind::Switch | EffectKind::Reverse | EffectKind::Kiss => {
                    for p in &self.placements {
                        if let Some(v) = p.card.numeric() {
                            if app.matches(Side::Friendly, Some(&p.card), enemy(p.slot)) {
                                value += 10 - v + if v < 5 { 5 } else { 0 };
                            }
                        }
                    }
                    for (slot, card) in board.held(them) {
                        if let Some(e) = card.numeric() {
                            if app.matches(Side::Enemy, Some(card), friendly(slot)) {
                                value += e - 5;
                            }
                        }
                    }
                }
                EffectKind::Clone => {
                    let donor = (0..board.width())
                        .flat_map(|slot| [(Side::Friendly, slot), (Side::Enemy, slot)])
                        .find_map(|(side, slot)| {
                            let (card, other) = match side {
                                Side::Friendly => (friendly(slot), enemy(slot)),
                                Side::Enemy => (enemy(slot), friendly(slot)),
                            };
                            card.filter(|c| app.matches(side, Some(*c), other))
                                .and_then(Card::numeric)
                        });
                    if let Some(dv) = donor {
                        value += self
                            .cards()
                            .filter_map(Card::numeric)
                            .map(|v| dv - v)
                            .sum::<i32>();
                        let width = board.width() as i32;
                        for (_, card) in board.held(them) {
                            if let Some(e) = card.numeric() {
                                value += if dv > e { width } else { -width };
                            }
                        }
                    }
                }
                EffectKind::Wait => {
                    for p in &self.placements {
                        if let Some(v) = p.card.numeric() {
                            if app.matches(Side::Friendly, Some(&p.card), enemy(p.slot)) {
                                value += v - 5;
                            }
                        }
                    }
                    for (slot, card) in board.occupied(them) {
                        if let Some(e) = card.numeric() {
                            if app.matches(Side::Enemy, Some(card), friendly(slot)) {
                                value -= e - 5;
                            }
                        }
                    }
                }
                EffectKind::Flush => {
                    let played = self.hand_indices();
                    for (i, card) in ctx.hand.iter().enumerate() {
                        if played.contains(&i) {
                            continue;
                        }
                        match card.special_def() {
                            Some(kept) if kept.effect.kind.is_keeper() => value -= config.flush_penalty,
                            Some(_) => {}
                            None => value += card.numeric().map_or(0, |v| 5 - v),
                        }
                    }
                }
                EffectKind::Replace | EffectKind::Randomize => {}
            }
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SpecialCard;
    use crate::effects::Effect;
    use crate::rules::{Application, ApplicationLeaf, Requirement};
    use std::sync::Arc;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn hand(values: &[i32]) -> Vec<Card> {
        values.iter().map(|&v| Card::new("Suit", v)).collect()
    }

    fn special(name: &str, effect: Effect, application: Application) -> Card {
        Card::special(Arc::new(SpecialCard::new(
            name,
            "",
            Requirement::nothing(),
            application,
            effect,
        )))
    }

    #[test]
    fn test_plain_value_is_sum() {
        let board = Gameboard::new(4);
        let cards = hand(&[1, 5, 9, 10]);
        let ctx = PlayContext::new(&cards, &board, P0);
        let play = PossiblePlay::new(&[0, 1, 2, 3], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        assert_eq!(play.value(), 25);
        assert_eq!(play.len(), 4);
    }

    #[test]
    fn test_just_enough_to_win() {
        let mut board = Gameboard::new(4);
        board.place(P1, 1, Card::new("Ex", 6)).unwrap();
        board.hold(P1, 1);
        let cards = hand(&[3, 7, 9, 10]);
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1, 2, 3], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        assert_eq!(play.card_at(1), Some(&Card::new("Suit", 7)));
        // Beats the hold by exactly one.
        assert_eq!(play.value(), 29 + 10);
    }

    #[test]
    fn test_unbeatable_target_gets_lowest() {
        let mut board = Gameboard::new(2);
        board.place(P1, 0, Card::new("Ex", 10)).unwrap();
        let cards = hand(&[2, 8]);
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        assert_eq!(play.card_at(0), Some(&Card::new("Suit", 2)));
        assert_eq!(play.card_at(1), Some(&Card::new("Suit", 8)));
    }

    #[test]
    fn test_tentative_buff_changes_arrangement_not_value() {
        let mut board = Gameboard::new(3);
        board.place(P1, 0, Card::new("Ex", 5)).unwrap();
        let mut cards = hand(&[4, 9]);
        cards.push(special("Rose", Effect::buff(2), ApplicationLeaf::new().friendly().into()));
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1, 2], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        // 4 + 2 beats 5, so the 4 is enough.
        assert_eq!(play.card_at(0), Some(&Card::new("Suit", 4)));
        assert!(play.cards().all(|c| c.applied().is_empty()));
        // 13 base, +10 special, +2 per friendly card. The enemy side is out of reach.
        assert_eq!(play.value(), 13 + 10 + 4);
    }

    #[test]
    fn test_switch_sends_lowest_card_at_highest_hold() {
        let mut board = Gameboard::new(3);
        board.place(P1, 1, Card::new("Ex", 4)).unwrap();
        board.place(P1, 2, Card::new("Ex", 9)).unwrap();
        board.hold(P1, 1);
        board.hold(P1, 2);
        let mut cards = hand(&[2, 6]);
        cards.insert(0, special("Swap", Effect::switch(), Application::any()));
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1, 2], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        assert_eq!(play.card_at(2), Some(&Card::new("Suit", 2)));
        assert_eq!(play.card_at(1), Some(&Card::new("Suit", 6)));
        assert!(play.card_at(0).is_some_and(Card::is_special));
        assert!(play.cards().all(|c| c.applied().is_empty()));
    }

    #[test]
    fn test_switch_skips_unmatched_cards() {
        let mut board = Gameboard::new(2);
        board.place(P1, 1, Card::new("Ex", 9)).unwrap();
        let weak_only: Application = ApplicationLeaf::new().friendly().max(1).into();
        let mut cards = hand(&[3, 10]);
        cards.insert(0, special("Swap", Effect::switch(), weak_only));
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1, 2], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        // Nothing matches, so the 10 beats the 9 as usual.
        assert_eq!(play.card_at(1), Some(&Card::new("Suit", 10)));
    }

    #[test]
    fn test_clone_sorts_descending() {
        let board = Gameboard::new(3);
        let mut cards = hand(&[2, 9]);
        cards.insert(0, special("Mirror", Effect::clone_marker(), Application::any()));
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1, 2], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        assert_eq!(play.card_at(0), Some(&Card::new("Suit", 9)));
        assert_eq!(play.card_at(1), Some(&Card::new("Suit", 2)));
        assert!(play.card_at(2).is_some_and(Card::is_special));
        // 11 base, +10 special, donor 9: (9-9) + (9-2).
        assert_eq!(play.value(), 11 + 10 + 7);
    }

    #[test]
    fn test_flush_penalizes_keepers_left_behind() {
        let board = Gameboard::new(2);
        let cards = vec![
            Card::new("Suit", 6),
            special("Flush", Effect::flush(), Application::any()),
            special("Hold", Effect::wait(), Application::any()),
            Card::new("Suit", 2),
        ];
        let ctx = PlayContext::new(&cards, &board, P0);

        let play = PossiblePlay::new(&[0, 1], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        // 6 base, +10 special, -50 for the kept Wait, +3 for the low card left.
        assert_eq!(play.value(), 6 + 10 - 50 + 3);
    }

    #[test]
    fn test_is_legal_counts_held_cards() {
        let mut board = Gameboard::new(3);
        board.place(P0, 0, Card::new("Suit", 8)).unwrap();
        board.hold(P0, 0);
        board.next_round();

        let needy = Card::special(Arc::new(SpecialCard::new(
            "Needy",
            "",
            Requirement::at_least(2, ApplicationLeaf::new().min(5).into()),
            Application::any(),
            Effect::kiss(),
        )));
        let cards = vec![needy, Card::new("Suit", 7)];
        let ctx = PlayContext::new(&cards, &board, P0);
        let play = PossiblePlay::new(&[0, 1], &ctx, &AiConfig::default(), &mut GameRng::new(1));
        assert!(play.is_legal(&board, P0));

        let alone = Gameboard::new(3);
        assert!(!play.is_legal(&alone, P0));
    }

    #[test]
    fn test_place_on_board() {
        let mut board = Gameboard::new(2);
        let cards = hand(&[3, 4]);
        let play = {
            let ctx = PlayContext::new(&cards, &board, P0);
            PossiblePlay::new(&[0, 1], &ctx, &AiConfig::default(), &mut GameRng::new(1))
        };
        assert!(play.place(&mut board, P0).is_ok());
        assert!(board.open_slots(P0).is_empty());
    }
}
