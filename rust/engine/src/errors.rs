use thiserror::Error;

use crate::engine::Seat;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown action code: {0} (expected 0..=4)")]
    UnknownActionCode(u8),
    #[error("Deck exhausted: requested {requested} card(s), {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("{0} has no hole cards")]
    MissingHoleCards(Seat),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
