//! Round resolution: specials first, then one comparison per column.

use serde::{Deserialize, Serialize};

use super::gameboard::Gameboard;
use super::scoreboard::{Outcome, Scoreboard};
use crate::cards::Hand;
use crate::core::{EngineError, PlayerId, PlayerMap};
use crate::effects::{Resolution, SpecialResolver};

/// Result of one column, seen from player 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOutcome {
    pub slot: usize,
    pub outcome: Outcome,
}

/// Everything a resolved round produced.
#[derive(Clone, Debug, Default)]
pub struct RoundReport {
    pub resolutions: Vec<Resolution>,
    /// Columns where both sides had a card.
    pub outcomes: Vec<SlotOutcome>,
}

impl RoundReport {
    /// Net result for player 0: wins minus losses.
    #[must_use]
    pub fn balance(&self) -> i32 {
        self.outcomes.iter().map(|o| o.outcome.sign()).sum()
    }
}

/// Drives one round once both sides have placed their cards.
pub struct RoundResolver;

impl RoundResolver {
    /// Resolve specials, then score every column once.
    ///
    /// Columns with a missing card on either side are not scored. The
    /// board is left as resolved; the caller advances it with
    /// `Gameboard::next_round()`.
    pub fn resolve<H: Hand>(
        board: &mut Gameboard,
        score: &mut Scoreboard,
        hands: &mut PlayerMap<H>,
    ) -> Result<RoundReport, EngineError> {
        let resolutions = SpecialResolver::apply_specials(board, hands)?;

        let first = PlayerId::new(0);
        let second = first.opponent();
        let outcomes = (0..board.width())
            .filter_map(|slot| {
                let mine = board.get(first, slot)?;
                let theirs = board.get(second, slot)?;
                let outcome = score.score_match(first, mine, second, theirs);
                Some(SlotOutcome { slot, outcome })
            })
            .collect();

        Ok(RoundReport {
            resolutions,
            outcomes,
        })
    }
}
