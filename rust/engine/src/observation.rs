use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::Seat;
use crate::game::Street;
use crate::player::{LastAction, SeatRole};

/// Raw view of the table from one seat. Pairs are ordered `[own, other]`.
///
/// The opponent's hole cards are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub seat: Seat,
    pub seat_role: SeatRole,
    pub hand: Option<[Card; 2]>,
    pub community_cards: Vec<Card>,
    pub street: Street,
    pub stacks: [u32; 2],
    pub bets: [u32; 2],
    pub pot: u32,
    pub to_call: u32,
    pub last_actions: [LastAction; 2],
}
