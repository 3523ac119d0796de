//! The shared board: two rows of slots plus a hold grid.
//!
//! Rows are persistent vectors so the AI and a host can snapshot the board
//! cheaply before replaying a round.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{GameConfig, PlayerId, PlayerMap};

/// Hold status of one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldState {
    /// Cleared at the end of the round.
    #[default]
    Free,
    /// Marked by a Wait effect this round; survives the next `next_round()`.
    Held,
    /// Survived one round change; released by the next one unless held again.
    Carried,
}

/// Two players by `width` slots of optional cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gameboard {
    width: usize,
    slots: PlayerMap<Vector<Option<Card>>>,
    holds: PlayerMap<Vector<HoldState>>,
}

impl Gameboard {
    /// Create an empty board with `width` slots per side.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            slots: PlayerMap::new(|_| (0..width).map(|_| None).collect()),
            holds: PlayerMap::new(|_| (0..width).map(|_| HoldState::Free).collect()),
        }
    }

    /// Create an empty board sized by the game configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cards_on_board)
    }

    /// Slots per side.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Card in a slot.
    #[must_use]
    pub fn get(&self, player: PlayerId, slot: usize) -> Option<&Card> {
        self.slots[player].get(slot).and_then(Option::as_ref)
    }

    /// Mutable card in a slot.
    pub fn get_mut(&mut self, player: PlayerId, slot: usize) -> Option<&mut Card> {
        self.slots[player].get_mut(slot).and_then(Option::as_mut)
    }

    /// Every slot of one side, left to right.
    pub fn side(&self, player: PlayerId) -> impl Iterator<Item = Option<&Card>> + '_ {
        self.slots[player].iter().map(Option::as_ref)
    }

    /// Occupied slots of one side as `(slot, card)`.
    pub fn occupied(&self, player: PlayerId) -> impl Iterator<Item = (usize, &Card)> + '_ {
        self.slots[player]
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|card| (i, card)))
    }

    /// Check if one side has no cards.
    #[must_use]
    pub fn side_is_empty(&self, player: PlayerId) -> bool {
        self.slots[player].iter().all(Option::is_none)
    }

    /// Put a card in an open slot. Hands the card back if the slot is
    /// out of range, occupied or held.
    pub fn place(&mut self, player: PlayerId, slot: usize, card: Card) -> Result<(), Card> {
        if !self.is_open(player, slot) {
            return Err(card);
        }
        self.slots[player].set(slot, Some(card));
        Ok(())
    }

    /// Remove and return the card in a slot, releasing any hold on it.
    pub fn take(&mut self, player: PlayerId, slot: usize) -> Option<Card> {
        if slot >= self.width {
            return None;
        }
        self.holds[player].set(slot, HoldState::Free);
        self.slots[player].set(slot, None)
    }

    /// Hold state of a slot.
    #[must_use]
    pub fn hold_state(&self, player: PlayerId, slot: usize) -> HoldState {
        self.holds[player].get(slot).copied().unwrap_or_default()
    }

    /// Mark a slot to survive the next round change.
    pub fn hold(&mut self, player: PlayerId, slot: usize) {
        if slot < self.width {
            self.holds[player].set(slot, HoldState::Held);
        }
    }

    /// Check if a slot is held or carried.
    #[must_use]
    pub fn is_held(&self, player: PlayerId, slot: usize) -> bool {
        self.hold_state(player, slot) != HoldState::Free
    }

    /// Held or carried cards of one side as `(slot, card)`.
    pub fn held(&self, player: PlayerId) -> impl Iterator<Item = (usize, &Card)> + '_ {
        self.occupied(player)
            .filter(move |(slot, _)| self.is_held(player, *slot))
    }

    /// Check if a slot can take a new card.
    #[must_use]
    pub fn is_open(&self, player: PlayerId, slot: usize) -> bool {
        slot < self.width && self.get(player, slot).is_none() && !self.is_held(player, slot)
    }

    /// Open slots of one side, left to right.
    #[must_use]
    pub fn open_slots(&self, player: PlayerId) -> Vec<usize> {
        (0..self.width)
            .filter(|&slot| self.is_open(player, slot))
            .collect()
    }

    /// Advance to the next round and return the cards that left the board.
    ///
    /// Free and carried slots are cleared; held slots become carried and
    /// keep their card.
    pub fn next_round(&mut self) -> Vec<Card> {
        let mut removed = Vec::new();
        for player in PlayerId::all() {
            for slot in 0..self.width {
                match self.hold_state(player, slot) {
                    HoldState::Held => {
                        self.holds[player].set(slot, HoldState::Carried);
                    }
                    HoldState::Free | HoldState::Carried => {
                        self.holds[player].set(slot, HoldState::Free);
                        removed.extend(self.slots[player].set(slot, None));
                    }
                }
            }
        }
        tracing::debug!(removed = removed.len(), "board advanced to next round");
        removed
    }

    /// Empty every slot and drop every hold.
    pub fn clear(&mut self) {
        *self = Self::new(self.width);
    }
}
