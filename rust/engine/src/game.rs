use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::CardSource;
use crate::errors::GameError;

/// Betting round, named after the number of community cards out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// No community cards
    Preflop,
    /// 3 community cards
    Flop,
    /// 4 community cards
    Turn,
    /// 5 community cards
    River,
}

impl Street {
    pub fn from_board_len(len: usize) -> Street {
        match len {
            0..=2 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }
}

pub const FULL_BOARD: usize = 5;

/// Pot and community cards of the hand in progress.
#[derive(Debug, Clone, Default)]
pub struct Round {
    pub(crate) pot: u32,
    pub(crate) board: Vec<Card>,
}

impl Round {
    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn street(&self) -> Street {
        Street::from_board_len(self.board.len())
    }

    pub(crate) fn reset(&mut self) {
        self.pot = 0;
        self.board.clear();
    }

    /// Deals the next street: 3 cards on an empty board, then 1, then 1.
    /// A full board is left untouched.
    pub(crate) fn deal_next_street<D: CardSource + ?Sized>(&mut self, deck: &mut D) -> Result<(), GameError> {
        let count = match self.board.len() {
            0 => 3,
            3 | 4 => 1,
            _ => 0,
        };
        if count > 0 {
            self.board.extend(deck.draw(count)?);
        }
        Ok(())
    }

    /// Deals every remaining community card in one draw, so a failed draw
    /// leaves the board as it was.
    pub(crate) fn run_out<D: CardSource + ?Sized>(&mut self, deck: &mut D) -> Result<(), GameError> {
        let missing = FULL_BOARD.saturating_sub(self.board.len());
        if missing > 0 {
            let cards = deck.draw(missing)?;
            self.board.extend(cards);
        }
        Ok(())
    }
}
