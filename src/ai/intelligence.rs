//! Opponent AI.
//!
//! The AI builds a handful of candidate plays, values each one with
//! `PossiblePlay` and keeps them sorted best first. Candidates come from
//! three generators:
//!
//! - one play per special in hand, filled with cards that satisfy its
//!   requirement and then with cards its application favours
//! - the highest-value play with no specials
//! - plays seeded with the cheapest cards that beat the opponent's cards
//!
//! Analysis is pure: the same hand, board and config always give the same
//! candidates in the same order.

use std::cmp::Reverse;

use crate::board::Gameboard;
use crate::cards::{Card, SpecialCard};
use crate::core::{AiConfig, EngineError, GameRng, PlayerId};
use crate::rules::{CountOp, Side};

use super::possible_play::{PlayContext, PossiblePlay};

/// Chooses which cards to play and where.
#[derive(Clone, Debug, Default)]
pub struct ArtificialIntelligence {
    config: AiConfig,
}

impl ArtificialIntelligence {
    /// Create an AI with the given weights.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Heuristic weights in use.
    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Candidates best first; the first is legal.
    ///
    /// Illegal candidates are only dropped from the front, so later ones
    /// may still fail their requirements. A board with no open slot (or an
    /// empty hand) yields a single empty play. A hand with no play filling
    /// every open slot yields nothing.
    #[must_use]
    pub fn analyze(&self, hand: &[Card], board: &Gameboard, player: PlayerId) -> Vec<PossiblePlay> {
        let needed = board.open_slots(player).len().min(hand.len());
        if needed == 0 {
            return vec![PossiblePlay::empty()];
        }

        let mut planner = Planner {
            ctx: PlayContext::new(hand, board, player),
            config: &self.config,
            rng: GameRng::new(self.config.seed).for_context("arrange"),
            needed,
            plays: Vec::new(),
        };
        planner.consider_specials(&[]);
        planner.consider_values(&[]);
        planner.meet_targets();

        let mut plays = planner.plays;
        plays.sort_by_key(|play| Reverse(play.value()));
        verify(&mut plays, board, player);

        tracing::debug!(
            player = %player,
            needed,
            candidates = plays.len(),
            best = ?plays.first().map(PossiblePlay::value),
            "hand analyzed"
        );
        plays
    }

    /// The highest-valued legal play.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoPlayFound` when no candidate survives
    /// verification.
    pub fn best_play(&self, hand: &[Card], board: &Gameboard, player: PlayerId) -> Result<PossiblePlay, EngineError> {
        self.analyze(hand, board, player)
            .into_iter()
            .next()
            .ok_or(EngineError::NoPlayFound)
    }
}

/// Drop candidates from the front while a special's requirement fails.
fn verify(plays: &mut Vec<PossiblePlay>, board: &Gameboard, player: PlayerId) {
    let illegal = plays
        .iter()
        .take_while(|play| !play.is_legal(board, player))
        .count();
    if illegal > 0 {
        tracing::trace!(dropped = illegal, "illegal candidates dropped");
    }
    *plays = plays.split_off(illegal);
}

struct Planner<'a> {
    ctx: PlayContext<'a>,
    config: &'a AiConfig,
    rng: GameRng,
    needed: usize,
    plays: Vec<PossiblePlay>,
}

impl<'a> Planner<'a> {
    fn hand(&self) -> &'a [Card] {
        self.ctx.hand
    }

    fn push(&mut self, picked: &[usize]) {
        let play = PossiblePlay::new(picked, &self.ctx, self.config, &mut self.rng);
        self.plays.push(play);
    }

    fn held(&self) -> impl Iterator<Item = &Card> + '_ {
        self.ctx.board.held(self.ctx.player).map(|(_, card)| card)
    }

    fn specials(&self, skip: &[usize]) -> Vec<usize> {
        (0..self.hand().len())
            .filter(|i| !skip.contains(i) && self.hand()[*i].is_special())
            .collect()
    }

    /// Check that adding `candidate` keeps every capped requirement leaf
    /// of the picked specials within bounds.
    fn fits(&self, picked: &[usize], candidate: usize) -> bool {
        let hand = self.hand();
        let pool: Vec<&Card> = picked
            .iter()
            .chain(std::iter::once(&candidate))
            .map(|&i| &hand[i])
            .chain(self.held())
            .collect();

        pool.iter()
            .filter_map(|card| card.special_def())
            .flat_map(|special| special.requirement.node().leaves())
            .filter(|leaf| matches!(leaf.op, CountOp::Exactly | CountOp::NoMoreThan))
            .all(|leaf| pool.iter().filter(|card| leaf.counts(card)).count() <= leaf.count)
    }

    /// Ordering key for filler cards under `special`.
    fn preference(&self, special: &SpecialCard, card: &Card) -> i32 {
        let value = card.numeric().unwrap_or(0);
        let base = if special.effect.kind.rewards_low() {
            11 - value
        } else {
            value
        };
        if special.application.matches(Side::Friendly, Some(card), None) {
            base + self.config.self_bias
        } else {
            base
        }
    }

    /// One play per special in hand, on top of `seed`.
    fn consider_specials(&mut self, seed: &[usize]) {
        if seed.len() >= self.needed {
            return;
        }
        let specials = self.specials(seed);

        for &special_index in &specials {
            let Some(special) = self.hand()[special_index].special_def() else {
                continue;
            };
            let mut picked = seed.to_vec();
            picked.push(special_index);

            let mut pool: Vec<usize> = (0..self.hand().len())
                .filter(|i| !picked.contains(i) && !self.hand()[*i].is_special())
                .collect();
            pool.sort_by_key(|&i| Reverse(self.preference(special, &self.hand()[i])));

            for leaf in special.requirement.node().leaves() {
                if leaf.op == CountOp::NoMoreThan {
                    continue;
                }
                let mut have = picked
                    .iter()
                    .map(|&i| &self.hand()[i])
                    .chain(self.held())
                    .filter(|card| leaf.counts(card))
                    .count();
                for &i in &pool {
                    if have >= leaf.count || picked.len() >= self.needed {
                        break;
                    }
                    if !picked.contains(&i) && leaf.counts(&self.hand()[i]) && self.fits(&picked, i) {
                        picked.push(i);
                        have += 1;
                    }
                }
            }

            for &i in &pool {
                if picked.len() >= self.needed {
                    break;
                }
                if !picked.contains(&i) && self.fits(&picked, i) {
                    picked.push(i);
                }
            }

            for &other in &specials {
                if picked.len() >= self.needed {
                    break;
                }
                if picked.contains(&other) || !self.fits(&picked, other) {
                    continue;
                }
                let Some(other_def) = self.hand()[other].special_def() else {
                    continue;
                };
                let cards: Vec<&Card> = picked
                    .iter()
                    .map(|&i| &self.hand()[i])
                    .chain(self.held())
                    .collect();
                if other_def.requirement.verify(&cards) {
                    picked.push(other);
                }
            }

            if picked.len() == self.needed {
                self.push(&picked);
            }
        }
    }

    /// The highest-value play on top of `seed` with no specials. Nothing
    /// is pushed when the hand runs out of plain cards before every open
    /// slot is filled.
    fn consider_values(&mut self, seed: &[usize]) {
        let hand = self.hand();
        let mut plain: Vec<usize> = (0..hand.len())
            .filter(|i| !seed.contains(i) && !hand[*i].is_special())
            .collect();
        plain.sort_by_key(|&i| Reverse(hand[i].numeric().unwrap_or(0)));

        let mut picked = seed.to_vec();
        let fill = self.needed.saturating_sub(picked.len());
        picked.extend(plain.into_iter().take(fill));
        if picked.len() == self.needed {
            self.push(&picked);
        }
    }

    /// Seed plays with the cheapest card beating each opposing card facing
    /// an open slot. Cards the opponent played this round count as targets
    /// alongside their holds.
    fn meet_targets(&mut self) {
        let board = self.ctx.board;
        let them = self.ctx.player.opponent();
        let hand = self.hand();

        let mut seed: Vec<usize> = Vec::new();
        for slot in board.open_slots(self.ctx.player) {
            if seed.len() >= self.needed {
                break;
            }
            let Some(target) = board.get(them, slot).and_then(Card::numeric) else {
                continue;
            };
            let beater = (0..hand.len())
                .filter(|i| !seed.contains(i))
                .filter_map(|i| hand[i].numeric().filter(|&v| v > target).map(|v| (v, i)))
                .min();
            if let Some((_, i)) = beater {
                seed.push(i);
            }
        }

        if !seed.is_empty() {
            self.consider_specials(&seed);
            self.consider_values(&seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;
    use crate::rules::{Application, ApplicationLeaf, Requirement};
    use std::sync::Arc;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn hand(values: impl IntoIterator<Item = i32>) -> Vec<Card> {
        values.into_iter().map(|v| Card::new("Suit", v)).collect()
    }

    fn sorted_values(play: &PossiblePlay) -> Vec<i32> {
        let mut values: Vec<i32> = play.cards().filter_map(Card::numeric).collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_empty_board_plays_highest() {
        let ai = ArtificialIntelligence::default();
        let board = Gameboard::new(4);
        let play = ai.best_play(&hand(1..=10), &board, P0).unwrap();
        assert_eq!(sorted_values(&play), vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_cheapest_card_beats_hold() {
        let ai = ArtificialIntelligence::default();
        let mut board = Gameboard::new(4);
        board.place(P1, 1, Card::new("Ex", 2)).unwrap();
        board.hold(P1, 1);

        let play = ai.best_play(&hand(1..=10), &board, P0).unwrap();
        assert_eq!(play.card_at(1), Some(&Card::new("Suit", 3)));
        assert_eq!(play.len(), 4);
    }

    #[test]
    fn test_full_board_gives_empty_play() {
        let ai = ArtificialIntelligence::default();
        let mut board = Gameboard::new(1);
        board.place(P0, 0, Card::new("Suit", 5)).unwrap();

        let plays = ai.analyze(&hand([1, 2]), &board, P0);
        assert_eq!(plays, vec![PossiblePlay::empty()]);
        assert!(ai.analyze(&[], &Gameboard::new(3), P0)[0].is_empty());
    }

    #[test]
    fn test_short_hand_plays_everything() {
        let ai = ArtificialIntelligence::default();
        let play = ai.best_play(&hand([4, 6]), &Gameboard::new(4), P0).unwrap();
        assert_eq!(sorted_values(&play), vec![4, 6]);
    }

    #[test]
    fn test_special_pulls_in_its_requirement() {
        let boost = Card::special(Arc::new(SpecialCard::new(
            "Boost",
            "",
            Requirement::at_least(2, ApplicationLeaf::new().max(3).into()),
            ApplicationLeaf::new().friendly().into(),
            Effect::buff(5),
        )));
        let mut cards = hand([1, 2, 9, 10]);
        cards.push(boost);

        let ai = ArtificialIntelligence::default();
        let board = Gameboard::new(3);
        let plays = ai.analyze(&cards, &board, P0);
        let with_boost = plays
            .iter()
            .find(|play| play.cards().any(Card::is_special))
            .unwrap();
        let values = sorted_values(with_boost);
        assert_eq!(values, vec![1, 2]);
        assert!(plays.iter().all(|play| play.is_legal(&board, P0)));
    }

    #[test]
    fn test_capped_requirement_is_respected() {
        let picky = Card::special(Arc::new(SpecialCard::new(
            "Picky",
            "",
            Requirement::no_more_than(0, ApplicationLeaf::new().min(8).into()),
            Application::any(),
            Effect::kiss(),
        )));
        let mut cards = hand([3, 4, 9, 10]);
        cards.push(picky);

        let ai = ArtificialIntelligence::default();
        let plays = ai.analyze(&cards, &Gameboard::new(3), P0);
        let with_picky = plays
            .iter()
            .find(|play| play.cards().any(Card::is_special))
            .unwrap();
        assert_eq!(sorted_values(with_picky), vec![3, 4]);
    }

    #[test]
    fn test_unmet_requirement_is_never_chosen() {
        let needy = Card::special(Arc::new(SpecialCard::new(
            "Needy",
            "",
            Requirement::at_least(3, ApplicationLeaf::new().min(9).into()),
            Application::any(),
            Effect::buff(10),
        )));
        let ai = ArtificialIntelligence::default();
        let board = Gameboard::new(2);

        let short = vec![needy.clone(), Card::new("Suit", 1)];
        assert!(matches!(ai.best_play(&short, &board, P0), Err(EngineError::NoPlayFound)));

        let enough = vec![needy, Card::new("Suit", 1), Card::new("Suit", 4)];
        let best = ai.best_play(&enough, &board, P0).unwrap();
        assert!(best.is_legal(&board, P0));
        assert_eq!(sorted_values(&best), vec![1, 4]);
        assert!(!best.cards().any(Card::is_special));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let ai = ArtificialIntelligence::new(AiConfig::default().with_seed(9));
        let board = Gameboard::new(4);
        let cards = hand([2, 5, 5, 7, 8, 9]);
        assert_eq!(ai.analyze(&cards, &board, P0), ai.analyze(&cards, &board, P0));
    }
}
