use std::fmt;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Supplies cards to the engine. Reshuffled at the start of every hand; draws
/// are without replacement until the next shuffle.
pub trait CardSource: fmt::Debug {
    fn shuffle(&mut self);
    fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError>;
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl CardSource for Deck {
    fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.remaining() {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining: self.remaining(),
            });
        }
        Ok((0..n).filter_map(|_| self.deal_card()).collect())
    }
}

/// Deals a fixed sequence of cards. `shuffle` rewinds to the first card, so
/// every hand replays the same order.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    cards: Vec<Card>,
    position: usize,
}

impl StackedDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }
}

impl CardSource for StackedDeck {
    fn shuffle(&mut self) {
        self.position = 0;
    }

    fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.cards.len() - self.position;
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let drawn = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(drawn)
    }
}
