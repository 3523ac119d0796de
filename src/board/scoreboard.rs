//! Per-suit scores for both players.
//!
//! ## Scoring a match
//!
//! One comparison per slot pair updates both rows:
//!
//! - a special on either side scores nothing
//! - a kiss credits both players on both suits
//! - the winner gains 10 on its own suit and on the loser's suit
//! - the loser drops 10 on its own suit
//! - draws and equal values change nothing
//!
//! Suits missing from the scoreboard are ignored.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardValue};
use crate::core::{PlayerId, PlayerMap};

/// Points moved by one match.
pub const MATCH_POINTS: i32 = 10;

/// Result of one match from the scoring player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// +1, -1 or 0.
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::Draw => 0,
        }
    }

    /// The same match seen from the other side.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Two rows of per-suit scores in deck suit order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    suits: Vec<String>,
    scores: PlayerMap<Vec<i32>>,
}

impl Scoreboard {
    /// Create a zeroed scoreboard for the given suits.
    #[must_use]
    pub fn new(suits: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let suits: Vec<String> = suits.into_iter().map(Into::into).collect();
        let width = suits.len();
        Self {
            suits,
            scores: PlayerMap::new(|_| vec![0; width]),
        }
    }

    /// Suits in column order.
    #[must_use]
    pub fn suits(&self) -> &[String] {
        &self.suits
    }

    /// Column of a suit.
    #[must_use]
    pub fn suit_index(&self, suit: &str) -> Option<usize> {
        self.suits.iter().position(|s| s == suit)
    }

    /// One player's row.
    #[must_use]
    pub fn scores(&self, player: PlayerId) -> &[i32] {
        &self.scores[player]
    }

    /// One player's score in one suit.
    #[must_use]
    pub fn score(&self, player: PlayerId, suit: &str) -> Option<i32> {
        self.suit_index(suit).map(|i| self.scores[player][i])
    }

    /// Sum of one player's row.
    #[must_use]
    pub fn total(&self, player: PlayerId) -> i32 {
        self.scores[player].iter().sum()
    }

    /// Set a score directly. Unknown suits are ignored.
    pub fn set(&mut self, player: PlayerId, suit: &str, value: i32) {
        if let Some(i) = self.suit_index(suit) {
            self.scores[player][i] = value;
        }
    }

    fn add(&mut self, player: PlayerId, suit: &str, delta: i32) {
        if let Some(i) = self.suit_index(suit) {
            self.scores[player][i] += delta;
        }
    }

    fn credit_win(&mut self, winner: PlayerId, winner_suit: &str, loser_suit: &str) {
        self.add(winner, winner_suit, MATCH_POINTS);
        if loser_suit != winner_suit {
            self.add(winner, loser_suit, MATCH_POINTS);
        }
        self.add(winner.opponent(), loser_suit, -MATCH_POINTS);
    }

    /// Score one match between `player_card` and the `opponent_card`
    /// facing it, updating both rows.
    pub fn score_match(
        &mut self,
        player: PlayerId,
        player_card: &Card,
        opponent: PlayerId,
        opponent_card: &Card,
    ) -> Outcome {
        debug_assert_ne!(player, opponent);
        let mine = player_card.value();
        let theirs = opponent_card.value();
        let my_suit = player_card.suit().to_string();
        let their_suit = opponent_card.suit().to_string();

        let outcome = if mine == CardValue::Special || theirs == CardValue::Special {
            Outcome::Draw
        } else if mine == CardValue::Kiss || theirs == CardValue::Kiss {
            for who in [player, opponent] {
                self.add(who, &my_suit, MATCH_POINTS);
                if their_suit != my_suit {
                    self.add(who, &their_suit, MATCH_POINTS);
                }
            }
            Outcome::Win
        } else if mine == CardValue::Win || theirs == CardValue::Lose {
            Outcome::Win
        } else if mine == CardValue::Lose || theirs == CardValue::Win {
            Outcome::Loss
        } else if mine == CardValue::Draw || theirs == CardValue::Draw {
            Outcome::Draw
        } else {
            match mine.partial_cmp(&theirs) {
                Some(std::cmp::Ordering::Greater) => Outcome::Win,
                Some(std::cmp::Ordering::Less) => Outcome::Loss,
                _ => Outcome::Draw,
            }
        };

        let kissed = mine == CardValue::Kiss || theirs == CardValue::Kiss;
        if !kissed {
            match outcome {
                Outcome::Win => self.credit_win(player, &my_suit, &their_suit),
                Outcome::Loss => self.credit_win(opponent, &their_suit, &my_suit),
                Outcome::Draw => {}
            }
        }

        tracing::trace!(
            %player,
            mine = %player_card,
            theirs = %opponent_card,
            ?outcome,
            "match scored"
        );
        outcome
    }

    /// Zero every score.
    pub fn reset(&mut self) {
        for (_, row) in self.scores.iter_mut() {
            row.iter_mut().for_each(|s| *s = 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn board() -> Scoreboard {
        Scoreboard::new(["Boyfriend", "Girlfriend", "Ex"])
    }

    #[test]
    fn test_numeric_win() {
        let mut score = board();
        let outcome = score.score_match(P0, &Card::new("Boyfriend", 7), P1, &Card::new("Ex", 3));
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(score.scores(P0), &[10, 0, 10]);
        assert_eq!(score.scores(P1), &[0, 0, -10]);
    }

    #[test]
    fn test_swap_roles_flips_outcome() {
        let mut score = board();
        let outcome = score.score_match(P1, &Card::new("Ex", 3), P0, &Card::new("Boyfriend", 7));
        assert_eq!(outcome, Outcome::Loss);
        assert_eq!(score.scores(P0), &[10, 0, 10]);
        assert_eq!(score.scores(P1), &[0, 0, -10]);
    }

    #[test]
    fn test_equal_values_draw() {
        let mut score = board();
        let outcome = score.score_match(P0, &Card::new("Girlfriend", 5), P1, &Card::new("Girlfriend", 5));
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(score.total(P0), 0);
        assert_eq!(score.total(P1), 0);
    }

    #[test]
    fn test_same_suit_win_credits_once() {
        let mut score = board();
        score.score_match(P0, &Card::new("Girlfriend", 9), P1, &Card::new("Girlfriend", 2));
        assert_eq!(score.score(P0, "Girlfriend"), Some(10));
        assert_eq!(score.score(P1, "Girlfriend"), Some(-10));
    }

    #[test]
    fn test_sentinels() {
        let mut score = board();
        let lose = Card::with_value("Boyfriend", CardValue::Lose);
        assert_eq!(score.score_match(P0, &lose, P1, &Card::new("Ex", 1)), Outcome::Loss);

        let win = Card::with_value("Boyfriend", CardValue::Win);
        assert_eq!(score.score_match(P0, &Card::new("Ex", 1), P1, &win), Outcome::Loss);
        assert_eq!(score.score_match(P0, &Card::new("Ex", 1), P1, &lose), Outcome::Win);

        let draw = Card::with_value("Boyfriend", CardValue::Draw);
        let before = score.clone();
        assert_eq!(score.score_match(P0, &draw, P1, &Card::new("Ex", 9)), Outcome::Draw);
        assert_eq!(score, before);
    }

    #[test]
    fn test_kiss_credits_both() {
        let mut score = board();
        let kiss = Card::with_value("Boyfriend", CardValue::Kiss);
        let outcome = score.score_match(P0, &Card::new("Girlfriend", 1), P1, &kiss);
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(score.scores(P0), &[10, 10, 0]);
        assert_eq!(score.scores(P1), &[10, 10, 0]);
    }

    #[test]
    fn test_unknown_suit_ignored() {
        let mut score = board();
        score.score_match(P0, &Card::new("Stranger", 9), P1, &Card::new("Ex", 1));
        assert_eq!(score.scores(P0), &[0, 0, 10]);
        assert_eq!(score.scores(P1), &[0, 0, -10]);
    }

    #[test]
    fn test_reset() {
        let mut score = board();
        score.set(P0, "Ex", 30);
        score.reset();
        assert_eq!(score.total(P0), 0);
    }
}
