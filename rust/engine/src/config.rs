use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::GameError;

pub const INITIAL_STACK_SIZE: u32 = 100;
pub const SMALL_BLIND: u32 = 1;
pub const BIG_BLIND: u32 = 2;
/// Smallest stack either seat can be dealt by the session split.
pub const MIN_STARTING_STACK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Default for Blinds {
    fn default() -> Self {
        Self {
            small: SMALL_BLIND,
            big: BIG_BLIND,
        }
    }
}

/// Table parameters for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Average stack; the two seats share `2 * initial_stack` chips.
    pub initial_stack: u32,
    pub blinds: Blinds,
    pub min_starting_stack: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_stack: INITIAL_STACK_SIZE,
            blinds: Blinds::default(),
            min_starting_stack: MIN_STARTING_STACK,
        }
    }
}

impl EngineConfig {
    pub fn total_chips(&self) -> u32 {
        self.initial_stack.saturating_mul(2)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.blinds.small == 0 {
            return Err(GameError::InvalidConfig("small blind must be >0".into()));
        }
        if self.blinds.big < self.blinds.small {
            return Err(GameError::InvalidConfig(
                "big blind must be >= small blind".into(),
            ));
        }
        if self.min_starting_stack == 0 || self.min_starting_stack > self.initial_stack {
            return Err(GameError::InvalidConfig(format!(
                "min_starting_stack must be within 1..={}",
                self.initial_stack
            )));
        }
        Ok(())
    }

    /// Splits the session's chips between the two seats: the player gets a
    /// uniform draw, the opponent the remainder.
    pub fn split_stacks<R: Rng + ?Sized>(&self, rng: &mut R) -> [u32; 2] {
        let total = self.total_chips();
        let player = rng.random_range(self.min_starting_stack..=total - self.min_starting_stack);
        [player, total - player]
    }
}
