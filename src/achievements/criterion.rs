//! Achievement criteria.
//!
//! Three families share one type:
//!
//! - statistics: lifetime counters (`WIN 10 classic`)
//! - round: what one side put on the board this round (`USE 2 Boyfriend`)
//! - score: end-of-game scoreboard relations (`EACH WIN`, `TOTAL >= 100`)
//!
//! Game checks only pass statistic and score criteria; round checks only
//! pass round criteria.

use serde::{Deserialize, Serialize};

use super::statistics::Statistics;
use crate::board::{Gameboard, Scoreboard};
use crate::core::PlayerId;

/// Statistic counter a criterion reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Play,
    Win,
    Lose,
    Draw,
    Streak,
}

/// What a round criterion counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundKind {
    /// Cards played on the board.
    Use,
    /// Cards sitting in held slots.
    Wait,
}

/// Card a round criterion looks for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundTarget {
    /// A suit or a special card name.
    Name(String),
    /// A numeric card value.
    Value(i32),
}

/// Whose scores a score criterion reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreSide {
    #[default]
    Friendly,
    Enemy,
}

/// Which suits a score criterion looks at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreScope {
    /// One named suit.
    Suit(String),
    /// Every suit.
    Each,
    /// At least one suit.
    Any,
    /// Exactly one suit.
    One,
    /// Row totals.
    Total,
    /// The named suit and no other.
    Only(String),
}

/// Numeric comparison of a score criterion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreOp {
    Less,
    Equal,
    #[default]
    AtLeast,
}

impl ScoreOp {
    fn compare(self, left: i32, right: i32) -> bool {
        match self {
            ScoreOp::Less => left < right,
            ScoreOp::Equal => left == right,
            ScoreOp::AtLeast => left >= right,
        }
    }
}

/// What a score is compared against.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreTarget {
    /// Beat the opponent's score in the same column.
    Win,
    /// Trail the opponent's score in the same column.
    Lose,
    /// Tie the opponent's score in the same column.
    Draw,
    Points(i32),
    /// The same side's current score in another suit.
    Suit(String),
}

/// One parsed achievement code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCriterion {
    Statistic {
        stat: StatKind,
        count: u32,
        /// Deck or suit name selecting a sub-record.
        qualifier: Option<String>,
    },
    Round {
        kind: RoundKind,
        count: usize,
        target: RoundTarget,
    },
    Score {
        side: ScoreSide,
        scope: ScoreScope,
        op: ScoreOp,
        target: ScoreTarget,
    },
}

impl AchievementCriterion {
    /// Check if this criterion is judged per round.
    #[must_use]
    pub fn is_round(&self) -> bool {
        matches!(self, AchievementCriterion::Round { .. })
    }

    /// End-of-game check. Round criteria never pass here.
    #[must_use]
    pub fn check(&self, score: &Scoreboard, player: PlayerId, stats: &Statistics) -> bool {
        match self {
            AchievementCriterion::Statistic {
                stat,
                count,
                qualifier,
            } => {
                let record = stats.record(qualifier.as_deref());
                let value = match stat {
                    StatKind::Play => record.played,
                    StatKind::Win => record.wins,
                    StatKind::Lose => record.losses,
                    StatKind::Draw => record.draws(),
                    StatKind::Streak => record.win_streak(),
                };
                value >= *count
            }
            AchievementCriterion::Score {
                side,
                scope,
                op,
                target,
            } => {
                let me = match side {
                    ScoreSide::Friendly => player,
                    ScoreSide::Enemy => player.opponent(),
                };
                Self::check_score(score, me, scope, *op, target)
            }
            AchievementCriterion::Round { .. } => false,
        }
    }

    fn check_score(
        score: &Scoreboard,
        me: PlayerId,
        scope: &ScoreScope,
        op: ScoreOp,
        target: &ScoreTarget,
    ) -> bool {
        let mine = score.scores(me);
        let theirs = score.scores(me.opponent());
        let resolve = |target: &ScoreTarget| match target {
            ScoreTarget::Suit(suit) => score.score(me, suit),
            ScoreTarget::Points(points) => Some(*points),
            _ => None,
        };
        let passes = |ours: i32, other: i32| match target {
            ScoreTarget::Win => ours > other,
            ScoreTarget::Lose => ours < other,
            ScoreTarget::Draw => ours == other,
            numeric => resolve(numeric).is_some_and(|t| op.compare(ours, t)),
        };
        let column = |i: usize| passes(mine[i], theirs[i]);
        let passing = || (0..mine.len()).filter(|&i| column(i)).count();

        match scope {
            ScoreScope::Suit(suit) => score.suit_index(suit).is_some_and(column),
            ScoreScope::Each => !mine.is_empty() && (0..mine.len()).all(column),
            ScoreScope::Any => (0..mine.len()).any(column),
            ScoreScope::One => passing() == 1,
            ScoreScope::Total => passes(score.total(me), score.total(me.opponent())),
            ScoreScope::Only(suit) => {
                score.suit_index(suit).is_some_and(column) && passing() == 1
            }
        }
    }

    /// End-of-round check on `player`'s side. Only round criteria pass.
    #[must_use]
    pub fn check_round(&self, board: &Gameboard, player: PlayerId) -> bool {
        let AchievementCriterion::Round {
            kind,
            count,
            target,
        } = self
        else {
            return false;
        };

        let found = board
            .occupied(player)
            .filter(|(slot, _)| *kind == RoundKind::Use || board.is_held(player, *slot))
            .filter(|(_, card)| match target {
                RoundTarget::Name(name) => card.name() == name.as_str(),
                RoundTarget::Value(value) => card.numeric() == Some(*value),
            })
            .count();
        found >= *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Outcome;
    use crate::cards::Card;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn score(mine: [i32; 3], theirs: [i32; 3]) -> Scoreboard {
        let mut score = Scoreboard::new(["A", "B", "C"]);
        for (i, suit) in ["A", "B", "C"].iter().enumerate() {
            score.set(P0, suit, mine[i]);
            score.set(P1, suit, theirs[i]);
        }
        score
    }

    fn score_code(scope: ScoreScope, op: ScoreOp, target: ScoreTarget) -> AchievementCriterion {
        AchievementCriterion::Score {
            side: ScoreSide::Friendly,
            scope,
            op,
            target,
        }
    }

    #[test]
    fn test_statistic() {
        let mut stats = Statistics::new();
        let wins = AchievementCriterion::Statistic {
            stat: StatKind::Win,
            count: 2,
            qualifier: Some("classic".into()),
        };
        stats.record_game("classic", ["A"], Outcome::Win);
        assert!(!wins.check(&score([0; 3], [0; 3]), P0, &stats));
        stats.record_game("classic", ["A"], Outcome::Win);
        assert!(wins.check(&score([0; 3], [0; 3]), P0, &stats));
    }

    #[test]
    fn test_relational_targets() {
        let board = score([20, 0, -10], [10, 0, 0]);
        let stats = Statistics::new();
        let check = |scope, target| {
            score_code(scope, ScoreOp::AtLeast, target).check(&board, P0, &stats)
        };

        assert!(check(ScoreScope::Suit("A".into()), ScoreTarget::Win));
        assert!(check(ScoreScope::Suit("B".into()), ScoreTarget::Draw));
        assert!(check(ScoreScope::Suit("C".into()), ScoreTarget::Lose));
        assert!(!check(ScoreScope::Each, ScoreTarget::Win));
        assert!(check(ScoreScope::Any, ScoreTarget::Win));
        assert!(check(ScoreScope::One, ScoreTarget::Win));
        assert!(check(ScoreScope::Only("A".into()), ScoreTarget::Win));
        assert!(check(ScoreScope::Only("B".into()), ScoreTarget::Draw));
        assert!(check(ScoreScope::Total, ScoreTarget::Draw));
    }

    #[test]
    fn test_numeric_and_suit_targets() {
        let board = score([30, 10, 0], [0, 0, 0]);
        let stats = Statistics::new();

        let total = score_code(ScoreScope::Total, ScoreOp::AtLeast, ScoreTarget::Points(40));
        assert!(total.check(&board, P0, &stats));

        let below = score_code(ScoreScope::Suit("B".into()), ScoreOp::Less, ScoreTarget::Suit("A".into()));
        assert!(below.check(&board, P0, &stats));

        let equal = score_code(ScoreScope::Each, ScoreOp::Equal, ScoreTarget::Points(0));
        assert!(!equal.check(&board, P0, &stats));
        assert!(equal.check(&board, P1, &stats));
    }

    #[test]
    fn test_enemy_side() {
        let board = score([0, 0, 0], [50, 0, 0]);
        let enemy = AchievementCriterion::Score {
            side: ScoreSide::Enemy,
            scope: ScoreScope::Any,
            op: ScoreOp::AtLeast,
            target: ScoreTarget::Points(50),
        };
        assert!(enemy.check(&board, P0, &Statistics::new()));
    }

    #[test]
    fn test_round_counts() {
        let mut board = Gameboard::new(3);
        board.place(P0, 0, Card::new("Boyfriend", 4)).unwrap();
        board.place(P0, 1, Card::new("Boyfriend", 7)).unwrap();
        board.place(P0, 2, Card::new("Girlfriend", 7)).unwrap();

        let use_two = AchievementCriterion::Round {
            kind: RoundKind::Use,
            count: 2,
            target: RoundTarget::Name("Boyfriend".into()),
        };
        let sevens = AchievementCriterion::Round {
            kind: RoundKind::Use,
            count: 2,
            target: RoundTarget::Value(7),
        };
        let wait = AchievementCriterion::Round {
            kind: RoundKind::Wait,
            count: 1,
            target: RoundTarget::Name("Girlfriend".into()),
        };

        assert!(use_two.check_round(&board, P0));
        assert!(!use_two.check_round(&board, P1));
        assert!(sevens.check_round(&board, P0));
        assert!(!wait.check_round(&board, P0));
        board.hold(P0, 2);
        assert!(wait.check_round(&board, P0));
        assert!(!wait.check(&Scoreboard::new(["A"]), P0, &Statistics::new()));
    }
}
