//! Action resolution: turns any requested action into a legal one and applies it.
//!
//! Resolution is split in two steps. [`resolve`] is a pure normalisation that
//! walks the degradation chain (an illegal CHECK becomes a CALL, an
//! unaffordable BIG_RAISE becomes a MIN_RAISE, and so on) and records every
//! hop with its reason. [`apply`] then mutates the players and the pot.
//!
//! ```
//! use headsup_engine::actions::{resolve, Action, Degradation};
//! use headsup_engine::config::Blinds;
//! use headsup_engine::player::{Player, SeatRole};
//!
//! let mut sb = Player::new(100, SeatRole::SmallBlind);
//! let mut bb = Player::new(100, SeatRole::BigBlind);
//! sb.place_bet(1);
//! bb.place_bet(2);
//!
//! // checking while facing the big blind is a call
//! let r = resolve(Action::Check, &sb, &bb, Blinds::default());
//! assert_eq!(r.action, Action::Call);
//! assert_eq!(r.amount, 1);
//! assert_eq!(r.hops[0].reason, Degradation::CheckFacingBet);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Blinds;
use crate::errors::GameError;
use crate::player::{LastAction, Player};

/// Longest possible chain: BIG_RAISE -> MIN_RAISE -> CALL -> CHECK.
pub const MAX_HOPS: usize = 3;

/// Discrete action space exposed to agents. Discriminants are the action codes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Fold = 0,
    Check = 1,
    Call = 2,
    MinRaise = 3,
    BigRaise = 4,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Fold,
        Action::Check,
        Action::Call,
        Action::MinRaise,
        Action::BigRaise,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "FOLD",
            Action::Check => "CHECK",
            Action::Call => "CALL",
            Action::MinRaise => "MIN_RAISE",
            Action::BigRaise => "BIG_RAISE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Action {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Action::ALL
            .get(code as usize)
            .copied()
            .ok_or(GameError::UnknownActionCode(code))
    }
}

/// Why an action was replaced by another one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Degradation {
    /// Check requested while the opponent has more chips in.
    CheckFacingBet,
    /// Call requested with nothing to call.
    NothingToCall,
    /// The amount to call already takes the whole stack.
    CannotCoverCall,
    /// The opponent has no chips behind, so no raise can be called.
    NoRaiseRoom,
    /// Stack too short for the requested raise size.
    ShortStack,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Degradation::CheckFacingBet => "check facing a bet",
            Degradation::NothingToCall => "nothing to call",
            Degradation::CannotCoverCall => "call takes the whole stack",
            Degradation::NoRaiseRoom => "opponent cannot call a raise",
            Degradation::ShortStack => "stack too short for raise size",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    pub from: Action,
    pub to: Action,
    pub reason: Degradation,
}

/// Outcome of normalising a requested action.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Resolution {
    pub requested: Action,
    /// Canonical action that will be applied.
    pub action: Action,
    /// Chips the actor is asked to commit (0 for fold and check).
    pub amount: u32,
    pub hops: Vec<Hop>,
}

impl Resolution {
    pub fn is_degraded(&self) -> bool {
        !self.hops.is_empty()
    }
}

enum Step {
    Settled(u32),
    Degrade(Action, Degradation),
}

/// Normalises `requested` into the legal action the actor will take.
///
/// Never fails: every request resolves to some action within [`MAX_HOPS`]
/// degradations.
pub fn resolve(requested: Action, actor: &Player, opponent: &Player, blinds: Blinds) -> Resolution {
    let to_call = opponent.total_bet().saturating_sub(actor.total_bet());
    let mut current = requested;
    let mut hops = Vec::new();
    loop {
        match step(current, to_call, actor.stack(), opponent.stack(), blinds) {
            Step::Settled(amount) => {
                return Resolution {
                    requested,
                    action: current,
                    amount,
                    hops,
                };
            }
            Step::Degrade(next, reason) => {
                debug_assert!(hops.len() < MAX_HOPS, "degradation chain too long: {hops:?}");
                hops.push(Hop {
                    from: current,
                    to: next,
                    reason,
                });
                current = next;
            }
        }
    }
}

fn step(action: Action, to_call: u32, stack: u32, opponent_stack: u32, blinds: Blinds) -> Step {
    match action {
        Action::Fold => Step::Settled(0),
        Action::Check if to_call > 0 => Step::Degrade(Action::Call, Degradation::CheckFacingBet),
        Action::Check => Step::Settled(0),
        Action::Call if to_call == 0 => Step::Degrade(Action::Check, Degradation::NothingToCall),
        Action::Call => Step::Settled(to_call),
        Action::MinRaise => raise_step(
            raise_size(2, blinds.small, to_call, opponent_stack),
            to_call,
            stack,
            Action::Call,
        ),
        Action::BigRaise => raise_step(
            raise_size(3, blinds.big.saturating_mul(3), to_call, opponent_stack),
            to_call,
            stack,
            Action::MinRaise,
        ),
    }
}

/// Chips a raise commits: a multiple of the amount to call, or a fixed
/// opening size, capped at what the opponent could still call.
fn raise_size(multiplier: u32, opening: u32, to_call: u32, opponent_stack: u32) -> u32 {
    let size = if to_call == 0 {
        opening
    } else {
        to_call.saturating_mul(multiplier)
    };
    size.min(opponent_stack.saturating_add(to_call))
}

fn raise_step(size: u32, to_call: u32, stack: u32, fallback: Action) -> Step {
    if to_call >= stack {
        return Step::Degrade(Action::Call, Degradation::CannotCoverCall);
    }
    if size <= to_call {
        return Step::Degrade(Action::Call, Degradation::NoRaiseRoom);
    }
    if stack < size {
        return Step::Degrade(fallback, Degradation::ShortStack);
    }
    Step::Settled(size)
}

/// Chips moved by [`apply`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Applied {
    pub contributed: u32,
    pub refunded: u32,
}

/// Applies a resolution to the actor, the opponent and the pot.
///
/// A call the actor cannot fully match puts the actor all-in and returns the
/// uncalled part of the opponent's bet from the pot to the opponent.
pub fn apply(resolution: &Resolution, actor: &mut Player, opponent: &mut Player, pot: &mut u32) -> Applied {
    match resolution.action {
        Action::Fold => {
            actor.fold();
            Applied::default()
        }
        Action::Check => {
            actor.set_last_action(LastAction::Check);
            Applied::default()
        }
        Action::Call => {
            let contributed = actor.place_bet(resolution.amount);
            *pot += contributed;
            actor.set_last_action(LastAction::Call);
            let refunded = opponent.total_bet().saturating_sub(actor.total_bet());
            if refunded > 0 {
                *pot -= refunded;
                opponent.refund(refunded);
            }
            Applied {
                contributed,
                refunded,
            }
        }
        Action::MinRaise | Action::BigRaise => {
            let contributed = actor.place_bet(resolution.amount);
            *pot += contributed;
            actor.set_last_action(LastAction::Raise);
            Applied {
                contributed,
                refunded: 0,
            }
        }
    }
}
