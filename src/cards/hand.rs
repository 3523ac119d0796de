//! Hands.
//!
//! The hand UI lives outside the engine; the engine only needs the
//! `Hand` contract. `PileHand` is the reference implementation: a hand
//! that refills from a draw pile.

use super::card::Card;

/// Container of cards a player holds.
pub trait Hand {
    /// Cards currently held, in hand order.
    fn cards(&self) -> &[Card];

    /// Draw until the hand is full or the pile runs out.
    fn refill(&mut self);

    /// Discard every held card.
    fn flush(&mut self);

    /// Remove the first card equal to `card`.
    fn remove(&mut self, card: &Card) -> Option<Card>;

    /// Remove the card at `index`.
    fn pop(&mut self, index: usize) -> Option<Card>;

    /// Number of held cards.
    fn len(&self) -> usize {
        self.cards().len()
    }

    /// Check if the hand is empty.
    fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    /// Card at `index`.
    fn get(&self, index: usize) -> Option<&Card> {
        self.cards().get(index)
    }
}

/// Hand backed by a draw pile. Draws from the end of the pile.
#[derive(Clone, Debug, Default)]
pub struct PileHand {
    cards: Vec<Card>,
    pile: Vec<Card>,
    discard: Vec<Card>,
    capacity: usize,
}

impl PileHand {
    /// Create an empty hand over `pile`. Call `refill()` to deal.
    #[must_use]
    pub fn new(pile: Vec<Card>, capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
            pile,
            discard: Vec::new(),
            capacity,
        }
    }

    /// Create a hand holding exactly `cards`, with nothing left to draw.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let capacity = cards.len();
        Self {
            cards,
            pile: Vec::new(),
            discard: Vec::new(),
            capacity,
        }
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn pile_len(&self) -> usize {
        self.pile.len()
    }

    /// Cards discarded so far.
    #[must_use]
    pub fn discarded(&self) -> &[Card] {
        &self.discard
    }
}

impl Hand for PileHand {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn refill(&mut self) {
        while self.cards.len() < self.capacity {
            match self.pile.pop() {
                Some(card) => self.cards.push(card),
                None => break,
            }
        }
    }

    fn flush(&mut self) {
        self.discard.extend(self.cards.drain(..).map(|mut card| {
            card.reset();
            card
        }));
    }

    fn remove(&mut self, card: &Card) -> Option<Card> {
        let index = self.cards.iter().position(|c| c == card)?;
        Some(self.cards.remove(index))
    }

    fn pop(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }
}
