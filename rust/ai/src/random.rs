use headsup_engine::actions::Action;
use headsup_engine::observation::Observation;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;

use crate::Policy;

/// Uniform choice among the legal actions, from a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, _observation: &Observation, valid: &[Action]) -> Action {
        // the legal set is never empty; fold keeps the signature total
        valid.choose(&mut self.rng).copied().unwrap_or(Action::Fold)
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headsup_engine::engine::{Engine, Seat};

    #[test]
    fn picks_only_valid_actions() {
        let engine = Engine::with_seed(1).unwrap();
        let obs = engine.observe(Seat::Player);
        let valid = engine.valid_actions(Seat::Player);
        let mut p = RandomPolicy::new(3);
        for _ in 0..100 {
            assert!(valid.contains(&p.choose(&obs, valid)));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let engine = Engine::with_seed(1).unwrap();
        let obs = engine.observe(Seat::Player);
        let valid = engine.valid_actions(Seat::Player);
        let mut a = RandomPolicy::new(9);
        let mut b = RandomPolicy::new(9);
        let xs: Vec<Action> = (0..20).map(|_| a.choose(&obs, valid)).collect();
        let ys: Vec<Action> = (0..20).map(|_| b.choose(&obs, valid)).collect();
        assert_eq!(xs, ys);
    }
}
