//! # headsup-ai: Policies and Agent Environment
//!
//! Decision makers for the heads-up betting engine, plus the environment a
//! learning agent steps through while an opponent policy plays the other seat.
//!
//! ## Core Components
//!
//! - [`Policy`] - Trait for anything that picks an action from an observation
//! - [`random`] - Uniform choice among the legal actions
//! - [`baseline`] - Deterministic rule-based play
//! - [`env`] - [`AgentEnv`], the learner's view of the table
//! - [`create_policy`] - Factory for policies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_ai::{create_policy, AgentEnv};
//! use headsup_engine::actions::Action;
//!
//! let opponent = create_policy("baseline", 1).unwrap();
//! let mut env = AgentEnv::with_seed(42, opponent).unwrap();
//! let obs = env.reset().unwrap();
//! assert!(obs.hand.is_some());
//!
//! let t = env.step(Action::Call).unwrap();
//! println!("reward {} after {}", t.reward, t.label);
//! ```

use headsup_engine::actions::Action;
use headsup_engine::observation::Observation;
use thiserror::Error;

pub mod baseline;
pub mod env;
pub mod random;

pub use baseline::BaselinePolicy;
pub use env::{AgentEnv, Transition};
pub use random::RandomPolicy;

/// Names accepted by [`create_policy`].
pub const POLICY_NAMES: &[&str] = &["random", "baseline"];

/// Picks an action for one seat.
///
/// Implementations should return a member of `valid`; anything else is
/// still degraded to a legal action by the engine.
///
/// ```rust
/// use headsup_ai::Policy;
/// use headsup_engine::actions::Action;
/// use headsup_engine::observation::Observation;
///
/// struct AlwaysFirst;
///
/// impl Policy for AlwaysFirst {
///     fn choose(&mut self, _obs: &Observation, valid: &[Action]) -> Action {
///         valid.first().copied().unwrap_or(Action::Fold)
///     }
///
///     fn name(&self) -> &str {
///         "always-first"
///     }
/// }
/// ```
pub trait Policy: Send + Sync {
    fn choose(&mut self, observation: &Observation, valid: &[Action]) -> Action;

    fn name(&self) -> &str;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown policy: {0} (expected one of: random, baseline)")]
    UnknownPolicy(String),
}

/// Builds a policy by name. `seed` feeds policies that sample.
///
/// ```rust
/// use headsup_ai::create_policy;
///
/// let p = create_policy("random", 7).unwrap();
/// assert_eq!(p.name(), "random");
/// assert!(create_policy("nope", 7).is_err());
/// ```
pub fn create_policy(name: &str, seed: u64) -> Result<Box<dyn Policy>, PolicyError> {
    match name {
        "random" => Ok(Box::new(RandomPolicy::new(seed))),
        "baseline" => Ok(Box::new(BaselinePolicy::new())),
        other => Err(PolicyError::UnknownPolicy(other.to_string())),
    }
}
