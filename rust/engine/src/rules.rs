use crate::actions::Action::{self, BigRaise, Call, Check, Fold, MinRaise};
use crate::player::{LastAction, Player};

const FACING_ACTION: &[Action] = &[Fold, Call, MinRaise, BigRaise];
const AFTER_PASSIVE: &[Action] = &[Check, MinRaise, BigRaise];
const FALLBACK: &[Action] = &[Fold, MinRaise, BigRaise];

/// Legal action set for the seat about to act, read from the opponent's
/// acted flag and last action.
///
/// | opponent | legal actions |
/// |---|---|
/// | not yet acted this street | FOLD, CALL, MIN_RAISE, BIG_RAISE |
/// | acted with CHECK or CALL | CHECK, MIN_RAISE, BIG_RAISE |
/// | acted with RAISE | FOLD, CALL, MIN_RAISE, BIG_RAISE |
/// | acted without a recorded action | FOLD, MIN_RAISE, BIG_RAISE |
///
/// # Examples
///
/// ```
/// use headsup_engine::actions::Action;
/// use headsup_engine::player::{Player, SeatRole};
/// use headsup_engine::rules::valid_actions;
///
/// let fresh = Player::new(100, SeatRole::BigBlind);
/// assert_eq!(valid_actions(&fresh)[0], Action::Fold);
/// ```
pub fn valid_actions(opponent: &Player) -> &'static [Action] {
    if !opponent.has_acted() {
        return FACING_ACTION;
    }
    match opponent.last_action() {
        LastAction::Check | LastAction::Call => AFTER_PASSIVE,
        LastAction::Raise => FACING_ACTION,
        LastAction::None => FALLBACK,
    }
}
