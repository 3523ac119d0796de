//! Board-wide special resolution.
//!
//! `SpecialResolver` walks the board column by column, player 0 before
//! player 1 within a column, and resolves every special it meets. Each
//! special scans the whole board in the same order with its application.
//! A slot is seen as friendly when it is on the caster's side, and the
//! card facing it in the same column is the opposing card.
//!
//! Two kinds deliberately stop short of full generality:
//! - Switch skips a slot pair when either card is missing or special.
//! - Clone honors only the first donor it finds.

use std::sync::Arc;

use crate::board::Gameboard;
use crate::cards::{Card, Hand, SpecialCard};
use crate::core::{EngineError, PlayerId, PlayerMap};
use crate::rules::Side;

use super::{Effect, EffectKind};

/// What one resolved special did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Name of the special.
    pub special: String,
    /// Side the special was played on.
    pub caster: PlayerId,
    /// Column of the special.
    pub slot: usize,
    pub kind: EffectKind,
    /// Cards changed, slots held, or hands flushed.
    pub touched: usize,
}

/// Resolves specials on a board.
pub struct SpecialResolver;

impl SpecialResolver {
    /// Resolve every special on the board in traversal order.
    ///
    /// Fails on the first special whose effect kind the board cannot
    /// carry out; specials resolved before it keep their changes.
    pub fn apply_specials<H: Hand>(
        board: &mut Gameboard,
        hands: &mut PlayerMap<H>,
    ) -> Result<Vec<Resolution>, EngineError> {
        let mut resolutions = Vec::new();
        for slot in 0..board.width() {
            for caster in PlayerId::all() {
                let Some(special) = board.get(caster, slot).and_then(Card::shared_special) else {
                    continue;
                };
                let special = Arc::clone(special);
                let touched = Self::apply_special(board, hands, caster, &special)?;
                tracing::debug!(
                    special = %special.name,
                    %caster,
                    slot,
                    touched,
                    "special resolved"
                );
                resolutions.push(Resolution {
                    special: special.name.clone(),
                    caster,
                    slot,
                    kind: special.effect.kind,
                    touched,
                });
            }
        }
        Ok(resolutions)
    }

    /// Resolve one special cast by `caster`.
    pub fn apply_special<H: Hand>(
        board: &mut Gameboard,
        hands: &mut PlayerMap<H>,
        caster: PlayerId,
        special: &SpecialCard,
    ) -> Result<usize, EngineError> {
        let touched = match special.effect.kind {
            EffectKind::Buff
            | EffectKind::Multiply
            | EffectKind::Kiss
            | EffectKind::Reverse
            | EffectKind::Replace => Self::mutate_matches(board, caster, special),
            EffectKind::Switch => Self::switch_matches(board, caster, special),
            EffectKind::Clone => Self::clone_first(board, caster, special),
            EffectKind::Wait => Self::hold_matches(board, caster, special),
            EffectKind::Flush => {
                let hand = hands.get_mut(caster);
                hand.flush();
                hand.refill();
                1
            }
            kind @ EffectKind::Randomize => {
                return Err(EngineError::UnsupportedEffect {
                    special: special.name.clone(),
                    kind,
                });
            }
        };
        Ok(touched)
    }

    /// Every board position in traversal order.
    fn positions(board: &Gameboard) -> impl Iterator<Item = (usize, PlayerId)> {
        (0..board.width()).flat_map(|slot| PlayerId::all().map(move |player| (slot, player)))
    }

    fn side_of(caster: PlayerId, player: PlayerId) -> Side {
        if player == caster {
            Side::Friendly
        } else {
            Side::Enemy
        }
    }

    fn matches(board: &Gameboard, caster: PlayerId, special: &SpecialCard, player: PlayerId, slot: usize) -> bool {
        special.application.matches(
            Self::side_of(caster, player),
            board.get(player, slot),
            board.get(player.opponent(), slot),
        )
    }

    fn mutate_matches(board: &mut Gameboard, caster: PlayerId, special: &SpecialCard) -> usize {
        let mut touched = 0;
        for (slot, player) in Self::positions(board).collect::<Vec<_>>() {
            if !Self::matches(board, caster, special, player, slot) {
                continue;
            }
            if let Some(card) = board.get_mut(player, slot) {
                if card.apply(&special.effect) {
                    touched += 1;
                }
            }
        }
        touched
    }

    fn switch_matches(board: &mut Gameboard, caster: PlayerId, special: &SpecialCard) -> usize {
        let enemy = caster.opponent();
        let mut touched = 0;
        for slot in 0..board.width() {
            let (Some(mine), Some(theirs)) = (board.get(caster, slot), board.get(enemy, slot)) else {
                continue;
            };
            if mine.is_special() || theirs.is_special() {
                continue;
            }
            let hit = Self::matches(board, caster, special, caster, slot)
                || Self::matches(board, caster, special, enemy, slot);
            if !hit {
                continue;
            }

            let (my_value, their_value) = (mine.value(), theirs.value());
            if let Some(card) = board.get_mut(caster, slot) {
                card.apply(&Effect::switch_to(their_value));
            }
            if let Some(card) = board.get_mut(enemy, slot) {
                card.apply(&Effect::switch_to(my_value));
            }
            touched += 2;
        }
        touched
    }

    fn clone_first(board: &mut Gameboard, caster: PlayerId, special: &SpecialCard) -> usize {
        let donor = Self::positions(board)
            .find(|&(slot, player)| Self::matches(board, caster, special, player, slot))
            .and_then(|(slot, player)| board.get(player, slot))
            .map(|card| card.face().clone());
        let Some(donor) = donor else {
            return 0;
        };

        let effect = Effect::clone_of(donor);
        let mut touched = 0;
        for slot in 0..board.width() {
            if let Some(card) = board.get_mut(caster, slot) {
                if card.apply(&effect) {
                    touched += 1;
                }
            }
        }
        touched
    }

    fn hold_matches(board: &mut Gameboard, caster: PlayerId, special: &SpecialCard) -> usize {
        let hits: Vec<_> = Self::positions(board)
            .filter(|&(slot, player)| Self::matches(board, caster, special, player, slot))
            .collect();
        for &(slot, player) in &hits {
            board.hold(player, slot);
        }
        hits.len()
    }
}
