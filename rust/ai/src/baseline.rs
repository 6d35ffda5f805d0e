//! Rule-based policy.
//!
//! Rates the hand on a 0-10 scale (a lookup on the hole cards preflop, the
//! `evaluate_hand` category once the flop is out) and maps the rating and the
//! price of a call onto the discrete action space.

use headsup_engine::actions::Action;
use headsup_engine::cards::Card;
use headsup_engine::hand::{Category, evaluate_hand};
use headsup_engine::observation::Observation;

use crate::Policy;

/// Deterministic baseline opponent.
///
/// **Preflop:** premium pairs and big aces raise, strong hands call, weak
/// hands fold to a bet and check when free.
///
/// **Postflop:** two pair or better bets or raises, one pair calls cheap
/// bets, everything else checks or folds.
///
/// ```rust
/// use headsup_ai::{BaselinePolicy, Policy};
/// use headsup_engine::engine::{Engine, Seat};
///
/// let engine = Engine::with_seed(42).unwrap();
/// let mut policy = BaselinePolicy::new();
/// let valid = engine.valid_actions(Seat::Player);
/// let action = policy.choose(&engine.observe(Seat::Player), valid);
/// assert!(valid.contains(&action));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Preflop rating:
    /// - 9-10: AA, KK, QQ, JJ, AKs
    /// - 7-8: TT-99, AK, AQ, KQs
    /// - 5-6: 88-77, AJ, suited broadways
    /// - 3-4: small pairs, Ax, suited connectors
    /// - 0-2: offsuit trash
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let r1 = hole[0].rank.value();
        let r2 = hole[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Postflop rating from the made hand; `None` before the flop.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut cards = Vec::with_capacity(7);
        cards.extend_from_slice(&hole);
        cards.extend_from_slice(board);
        let strength = evaluate_hand(&cards);

        let base = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        // queen-high or better top card
        let kicker_boost = u8::from(strength.kickers[0] >= 12);
        Some((base + kicker_boost).min(10))
    }

    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn decide(strength: u8, to_call: u32, stack: u32, pot: u32) -> Action {
        if to_call == 0 {
            return match strength {
                9..=10 => Action::BigRaise,
                7..=8 => Action::MinRaise,
                _ => Action::Check,
            };
        }

        // calling puts the whole stack in
        if to_call >= stack {
            return if strength >= 7 { Action::Call } else { Action::Fold };
        }

        let odds = Self::pot_odds(pot, to_call);
        match strength {
            9..=10 => Action::BigRaise,
            7..=8 => Action::Call,
            5..=6 if odds >= 0.3 || to_call <= pot / 4 => Action::Call,
            3..=4 if odds >= 0.4 || to_call <= pot / 6 => Action::Call,
            _ => Action::Fold,
        }
    }
}

/// Nearest member of `valid` to `choice`.
fn restrict(choice: Action, valid: &[Action]) -> Action {
    let preference: &[Action] = match choice {
        Action::Fold => &[Action::Fold, Action::Check],
        Action::Check => &[Action::Check, Action::Call, Action::MinRaise],
        Action::Call => &[Action::Call, Action::Check],
        Action::MinRaise => &[Action::MinRaise, Action::Call, Action::Check],
        Action::BigRaise => &[Action::BigRaise, Action::MinRaise, Action::Call, Action::Check],
    };
    preference
        .iter()
        .copied()
        .find(|a| valid.contains(a))
        .or_else(|| valid.first().copied())
        .unwrap_or(choice)
}

impl Policy for BaselinePolicy {
    fn choose(&mut self, obs: &Observation, valid: &[Action]) -> Action {
        let Some(hole) = obs.hand else {
            let passive = if obs.to_call == 0 { Action::Check } else { Action::Fold };
            return restrict(passive, valid);
        };
        let strength = Self::postflop_strength(hole, &obs.community_cards)
            .unwrap_or_else(|| Self::preflop_strength(hole));
        restrict(Self::decide(strength, obs.to_call, obs.stacks[0], obs.pot), valid)
    }

    fn name(&self) -> &str {
        "baseline"
    }
}
