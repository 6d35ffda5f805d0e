use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Blind a seat posts for the whole hand. Flips every hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SeatRole {
    SmallBlind,
    BigBlind,
}

impl SeatRole {
    pub fn flipped(self) -> SeatRole {
        match self {
            SeatRole::SmallBlind => SeatRole::BigBlind,
            SeatRole::BigBlind => SeatRole::SmallBlind,
        }
    }
}

/// Most recent betting action of a player. Kept apart from [`SeatRole`] so a
/// blind post never masquerades as an action.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum LastAction {
    #[default]
    None,
    Check,
    Call,
    Raise,
}

/// Per-seat state: chips, cards and the betting flags of the current street.
#[derive(Debug, Clone)]
pub struct Player {
    stack: u32,
    hand: Option<[Card; 2]>,
    total_bet: u32,
    previous_bet: u32,
    seat_role: SeatRole,
    last_action: LastAction,
    is_fold: bool,
    already_acted: bool,
}

impl Player {
    pub fn new(stack: u32, seat_role: SeatRole) -> Self {
        Self {
            stack,
            hand: None,
            total_bet: 0,
            previous_bet: 0,
            seat_role,
            last_action: LastAction::None,
            is_fold: false,
            already_acted: false,
        }
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hand(&self) -> Option<[Card; 2]> {
        self.hand
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn previous_bet(&self) -> u32 {
        self.previous_bet
    }
    pub fn seat_role(&self) -> SeatRole {
        self.seat_role
    }
    pub fn last_action(&self) -> LastAction {
        self.last_action
    }
    pub fn is_folded(&self) -> bool {
        self.is_fold
    }
    pub fn has_acted(&self) -> bool {
        self.already_acted
    }

    /// Hands are trusted to come from a proper deck; no uniqueness check.
    pub fn receive_cards(&mut self, cards: [Card; 2]) {
        self.hand = Some(cards);
    }

    /// Commits up to `amount` chips and returns what was actually contributed.
    ///
    /// A request at or above the stack puts the player all-in for whatever
    /// remains, so the stack can never go negative.
    pub fn place_bet(&mut self, amount: u32) -> u32 {
        self.previous_bet = self.total_bet;
        let contributed = if amount < self.stack {
            amount
        } else {
            self.stack
        };
        self.stack -= contributed;
        self.total_bet += contributed;
        contributed
    }

    pub fn award(&mut self, chips: u32) {
        self.stack = self.stack.saturating_add(chips);
    }

    /// Returns chips the opponent could not match.
    pub(crate) fn refund(&mut self, chips: u32) {
        debug_assert!(chips <= self.total_bet, "refund exceeds contribution");
        self.stack += chips;
        self.total_bet -= chips;
    }

    pub(crate) fn fold(&mut self) {
        self.is_fold = true;
    }

    pub(crate) fn set_last_action(&mut self, action: LastAction) {
        self.last_action = action;
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.already_acted = acted;
    }

    pub(crate) fn reset_for_hand(&mut self, seat_role: SeatRole) {
        self.seat_role = seat_role;
        self.hand = None;
        self.total_bet = 0;
        self.previous_bet = 0;
        self.last_action = LastAction::None;
        self.is_fold = false;
        self.already_acted = false;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.already_acted = false;
    }
}
