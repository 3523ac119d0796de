//! Achievements and the book that tracks which are unlocked.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::criterion::AchievementCriterion;
use super::statistics::Statistics;
use crate::board::{Gameboard, Scoreboard};
use crate::cards::Unlocks;
use crate::core::{EngineError, PlayerId};
use crate::parser::{self, tokenize, Diagnostics, Parsed};

/// A named goal: every criterion must hold in the same game or round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    pub criteria: Vec<AchievementCriterion>,
    /// Special card unlocked by reaching this achievement.
    pub reward: Option<String>,
}

impl Achievement {
    /// Create an achievement with no reward.
    #[must_use]
    pub fn new(name: impl Into<String>, criteria: Vec<AchievementCriterion>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            criteria,
            reward: None,
        }
    }

    /// Set the unlocked special (builder pattern).
    #[must_use]
    pub fn with_reward(mut self, special: impl Into<String>) -> Self {
        self.reward = Some(special.into());
        self
    }

    /// Check if the achievement is judged per round.
    #[must_use]
    pub fn is_round(&self) -> bool {
        !self.criteria.is_empty() && self.criteria.iter().all(AchievementCriterion::is_round)
    }

    /// End-of-game check.
    #[must_use]
    pub fn check(&self, score: &Scoreboard, player: PlayerId, stats: &Statistics) -> bool {
        !self.criteria.is_empty() && self.criteria.iter().all(|c| c.check(score, player, stats))
    }

    /// End-of-round check.
    #[must_use]
    pub fn check_round(&self, board: &Gameboard, player: PlayerId) -> bool {
        !self.criteria.is_empty() && self.criteria.iter().all(|c| c.check_round(board, player))
    }
}

/// Every known achievement plus the set already reached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementBook {
    achievements: Vec<Achievement>,
    unlocked: FxHashSet<String>,
}

impl AchievementBook {
    /// Create a book with nothing unlocked.
    #[must_use]
    pub fn new(achievements: Vec<Achievement>) -> Self {
        Self {
            achievements,
            unlocked: FxHashSet::default(),
        }
    }

    /// Parse achievement definition text.
    #[must_use]
    pub fn parse(text: &str) -> Parsed<Self> {
        parser::parse_achievements(text).map(Self::new)
    }

    /// Read and parse an achievement file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Parsed<Self>, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::from_io(e, path))?;
        Ok(Self::parse(&text))
    }

    /// Achievements in definition order.
    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Look up an achievement by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.name == name)
    }

    /// Check if an achievement has been reached.
    #[must_use]
    pub fn is_unlocked(&self, name: &str) -> bool {
        self.unlocked.contains(name)
    }

    /// Record an achievement as reached. Returns false if it already was
    /// or if no achievement has that name.
    pub fn unlock(&mut self, name: &str) -> bool {
        if self.get(name).is_none() {
            return false;
        }
        self.unlocked.insert(name.to_string())
    }

    fn unlock_passing(&mut self, passes: impl Fn(&Achievement) -> bool) -> Vec<String> {
        let fresh: Vec<String> = self
            .achievements
            .iter()
            .filter(|a| !self.unlocked.contains(&a.name) && passes(a))
            .map(|a| a.name.clone())
            .collect();
        for name in &fresh {
            tracing::info!(achievement = %name, "achievement unlocked");
            self.unlocked.insert(name.clone());
        }
        fresh
    }

    /// Unlock game achievements reached by `player`; returns the new ones.
    pub fn check_game(&mut self, score: &Scoreboard, player: PlayerId, stats: &Statistics) -> Vec<String> {
        self.unlock_passing(|a| !a.is_round() && a.check(score, player, stats))
    }

    /// Unlock round achievements reached by `player`; returns the new ones.
    pub fn check_round(&mut self, board: &Gameboard, player: PlayerId) -> Vec<String> {
        self.unlock_passing(|a| a.is_round() && a.check_round(board, player))
    }

    /// Load the unlocked set from `[ACH-NAME]Name` lines.
    ///
    /// Names not in the book are kept out and reported.
    pub fn parse_unlocked(&mut self, text: &str) -> Vec<parser::ParseWarning> {
        let tokens = tokenize(text);
        let mut diag = Diagnostics::default();
        diag.absorb(tokens.warnings);
        for line in tokens.value {
            diag.at_line(line.number);
            if line.tag != "ACH-NAME" {
                diag.warn(format!("unexpected tag '{}' in unlocked list", line.tag));
            } else if !self.unlock(&line.value) && !self.is_unlocked(&line.value) {
                diag.warn(format!("unknown achievement '{}'", line.value));
            }
        }
        diag.finish(()).warnings
    }

    /// Unlocked set as `[ACH-NAME]Name` lines, in definition order.
    #[must_use]
    pub fn format_unlocked(&self) -> String {
        self.achievements
            .iter()
            .filter(|a| self.is_unlocked(&a.name))
            .map(|a| format!("[ACH-NAME]{}\n", a.name))
            .collect()
    }
}

impl Unlocks for AchievementBook {
    /// A special is drawable unless it is an achievement reward that has
    /// not been reached yet.
    fn unlocked(&self, special: &str) -> bool {
        let mut rewarding = self
            .achievements
            .iter()
            .filter(|a| a.reward.as_deref() == Some(special))
            .peekable();
        rewarding.peek().is_none() || rewarding.any(|a| self.is_unlocked(&a.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::{RoundKind, RoundTarget, StatKind};
    use crate::board::Outcome;
    use crate::cards::Card;

    const P0: PlayerId = PlayerId::new(0);

    fn first_win() -> Achievement {
        Achievement::new(
            "First Date",
            vec![AchievementCriterion::Statistic {
                stat: StatKind::Win,
                count: 1,
                qualifier: None,
            }],
        )
        .with_reward("Rose")
    }

    fn use_two() -> Achievement {
        Achievement::new(
            "Crowd",
            vec![AchievementCriterion::Round {
                kind: RoundKind::Use,
                count: 2,
                target: RoundTarget::Name("Boyfriend".into()),
            }],
        )
    }

    #[test]
    fn test_check_game_unlocks_once() {
        let mut book = AchievementBook::new(vec![first_win(), use_two()]);
        let score = Scoreboard::new(["Boyfriend"]);
        let mut stats = Statistics::new();
        assert!(book.check_game(&score, P0, &stats).is_empty());

        stats.record_game("classic", ["Boyfriend"], Outcome::Win);
        assert_eq!(book.check_game(&score, P0, &stats), vec!["First Date".to_string()]);
        assert!(book.check_game(&score, P0, &stats).is_empty());
        assert!(book.is_unlocked("First Date"));
    }

    #[test]
    fn test_check_round() {
        let mut book = AchievementBook::new(vec![first_win(), use_two()]);
        let mut board = Gameboard::new(3);
        board.place(P0, 0, Card::new("Boyfriend", 1)).unwrap();
        board.place(P0, 1, Card::new("Boyfriend", 2)).unwrap();

        assert_eq!(book.check_round(&board, P0), vec!["Crowd".to_string()]);
        assert!(book.check_round(&board, P0).is_empty());
    }

    #[test]
    fn test_rewards_gate_specials() {
        let mut book = AchievementBook::new(vec![first_win()]);
        assert!(!book.unlocked("Rose"));
        assert!(book.unlocked("Thorn"));
        book.unlock("First Date");
        assert!(book.unlocked("Rose"));
    }

    #[test]
    fn test_unlocked_persistence() {
        let mut book = AchievementBook::new(vec![first_win(), use_two()]);
        book.unlock("Crowd");
        let text = book.format_unlocked();
        assert_eq!(text, "[ACH-NAME]Crowd\n");

        let mut restored = AchievementBook::new(vec![first_win(), use_two()]);
        let warnings = restored.parse_unlocked(&format!("{}[ACH-NAME]Ghost\n", text));
        assert_eq!(warnings.len(), 1);
        assert!(restored.is_unlocked("Crowd"));
        assert!(!restored.is_unlocked("Ghost"));
    }

    #[test]
    fn test_empty_criteria_never_pass() {
        let empty = Achievement::new("Nothing", Vec::new());
        assert!(!empty.check(&Scoreboard::new(["A"]), P0, &Statistics::new()));
        assert!(!empty.check_round(&Gameboard::new(1), P0));
    }

    #[test]
    fn test_missing_file() {
        let result = AchievementBook::from_path("/definitely/not/here/achievements.txt");
        assert!(matches!(result, Err(EngineError::MissingResource { .. })));
    }
}
