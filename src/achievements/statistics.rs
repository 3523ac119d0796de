//! Play statistics.
//!
//! One record for all games plus one per deck and one per suit. The text
//! form is a summary tuple line followed by `DECK:name:tuple` and
//! `SUIT:name:tuple` lines, where a tuple is
//! `(wins, losses, played, streak, streakType, bestStreak)`.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::Outcome;
use crate::parser::{Diagnostics, Parsed};

/// Kind of the current streak.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreakType {
    Win,
    Loss,
    Draw,
    /// No game played yet.
    #[default]
    None,
}

impl StreakType {
    fn of(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => StreakType::Win,
            Outcome::Loss => StreakType::Loss,
            Outcome::Draw => StreakType::Draw,
        }
    }

    fn symbol(self) -> char {
        match self {
            StreakType::Win => 'W',
            StreakType::Loss => 'L',
            StreakType::Draw => 'D',
            StreakType::None => '-',
        }
    }

    fn from_symbol(text: &str) -> Option<Self> {
        match text {
            "W" => Some(StreakType::Win),
            "L" => Some(StreakType::Loss),
            "D" => Some(StreakType::Draw),
            "-" => Some(StreakType::None),
            _ => None,
        }
    }
}

/// Counters for one slice of the statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub wins: u32,
    pub losses: u32,
    pub played: u32,
    /// Length of the current run of equal outcomes.
    pub streak: u32,
    pub streak_type: StreakType,
    /// Longest winning run so far.
    pub best_streak: u32,
}

impl StatRecord {
    /// Count one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        self.played += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => {}
        }

        let kind = StreakType::of(outcome);
        if self.streak_type == kind {
            self.streak += 1;
        } else {
            self.streak_type = kind;
            self.streak = 1;
        }
        if kind == StreakType::Win {
            self.best_streak = self.best_streak.max(self.streak);
        }
    }

    /// Games that were neither won nor lost.
    #[must_use]
    pub fn draws(&self) -> u32 {
        self.played.saturating_sub(self.wins + self.losses)
    }

    /// Current winning run, zero if the last game was not a win.
    #[must_use]
    pub fn win_streak(&self) -> u32 {
        if self.streak_type == StreakType::Win {
            self.streak
        } else {
            0
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
        let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [wins, losses, played, streak, streak_type, best_streak] = fields.as_slice() else {
            return None;
        };
        Some(Self {
            wins: wins.parse().ok()?,
            losses: losses.parse().ok()?,
            played: played.parse().ok()?,
            streak: streak.parse().ok()?,
            streak_type: StreakType::from_symbol(streak_type)?,
            best_streak: best_streak.parse().ok()?,
        })
    }
}

impl fmt::Display for StatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {})",
            self.wins,
            self.losses,
            self.played,
            self.streak,
            self.streak_type.symbol(),
            self.best_streak
        )
    }
}

/// Statistics across games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub base: StatRecord,
    pub decks: FxHashMap<String, StatRecord>,
    pub suits: FxHashMap<String, StatRecord>,
}

impl Statistics {
    /// Empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished game played with `deck`, whose suits are `suits`.
    pub fn record_game(
        &mut self,
        deck: &str,
        suits: impl IntoIterator<Item = impl AsRef<str>>,
        outcome: Outcome,
    ) {
        self.base.record(outcome);
        self.decks.entry(deck.to_string()).or_default().record(outcome);
        for suit in suits {
            self.suits
                .entry(suit.as_ref().to_string())
                .or_default()
                .record(outcome);
        }
    }

    /// Record selected by a deck or suit name, or the base record.
    ///
    /// An unknown qualifier reads as an empty record.
    #[must_use]
    pub fn record(&self, qualifier: Option<&str>) -> StatRecord {
        match qualifier {
            None => self.base,
            Some(name) => self
                .decks
                .get(name)
                .or_else(|| self.suits.get(name))
                .copied()
                .unwrap_or_default(),
        }
    }

    /// Parse the text form. Malformed lines are skipped with a warning.
    #[must_use]
    pub fn parse(text: &str) -> Parsed<Statistics> {
        let mut diag = Diagnostics::default();
        let mut stats = Statistics::new();
        let mut seen_base = false;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            diag.at_line(index + 1);

            let (table, name, tuple) = match line.splitn(3, ':').collect::<Vec<_>>().as_slice() {
                [kind @ ("DECK" | "SUIT"), name, tuple] => (Some(*kind), *name, *tuple),
                _ => (None, "", line),
            };
            let Some(record) = StatRecord::parse(tuple) else {
                diag.warn(format!("malformed statistics line '{}'", line));
                continue;
            };
            match table {
                Some("DECK") => {
                    stats.decks.insert(name.to_string(), record);
                }
                Some(_) => {
                    stats.suits.insert(name.to_string(), record);
                }
                None if seen_base => diag.warn("second summary line ignored"),
                None => {
                    stats.base = record;
                    seen_base = true;
                }
            }
        }

        diag.finish(stats)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.base)?;
        for (prefix, table) in [("DECK", &self.decks), ("SUIT", &self.suits)] {
            let mut names: Vec<_> = table.keys().collect();
            names.sort();
            for name in names {
                writeln!(f, "{}:{}:{}", prefix, name, table[name])?;
            }
        }
        Ok(())
    }
}
