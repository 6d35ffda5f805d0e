use headsup_engine::actions::Action;
use headsup_engine::deck::{CardSource, Deck};
use headsup_engine::engine::{Engine, Seat, Settlement, StepOutcome};
use headsup_engine::errors::GameError;
use headsup_engine::hand::{HandEvaluator, StandardEvaluator};
use headsup_engine::observation::Observation;
use tracing::debug;

use crate::Policy;

/// What the learner sees after one [`AgentEnv::step`].
#[derive(Debug, Clone)]
pub struct Transition {
    /// Player view once it is the player's turn again
    pub observation: Observation,
    pub reward: i64,
    /// At least one hand ended during the step
    pub done: bool,
    /// Label of the player's applied action, empty when out of turn
    pub label: String,
    pub settlements: Vec<Settlement>,
}

/// The learning seat's environment. The opponent seat is played by a
/// [`Policy`] that can be swapped between steps.
pub struct AgentEnv<D = Deck, E = StandardEvaluator> {
    engine: Engine<D, E>,
    opponent: Box<dyn Policy>,
}

impl AgentEnv<Deck, StandardEvaluator> {
    pub fn with_seed(seed: u64, opponent: Box<dyn Policy>) -> Result<Self, GameError> {
        Ok(Self::new(Engine::with_seed(seed)?, opponent))
    }
}

impl<D: CardSource, E: HandEvaluator> AgentEnv<D, E> {
    pub fn new(engine: Engine<D, E>, opponent: Box<dyn Policy>) -> Self {
        Self { engine, opponent }
    }

    /// New stack split and first hand. The opponent acts first when it holds
    /// the small blind.
    pub fn reset(&mut self) -> Result<Observation, GameError> {
        self.engine.reset_session()?;
        let mut reward = 0;
        let mut settlements = Vec::new();
        self.play_opponent(&mut reward, &mut settlements)?;
        Ok(self.engine.observe(Seat::Player))
    }

    /// Applies the player's action, then lets the opponent act until the
    /// player is to act again.
    ///
    /// The reward is the player's own step reward, plus for every hand that
    /// ended either the whole pot (player won) or the player's shaping term
    /// `previous_bet - total_bet` at the end of that hand (player lost).
    pub fn step(&mut self, action: Action) -> Result<Transition, GameError> {
        let mut reward = 0;
        let mut settlements = Vec::new();

        let outcome = self.engine.execute_action(Seat::Player, action)?;
        let label = outcome.label.clone();
        if outcome.done {
            self.absorb(outcome, &mut reward, &mut settlements)?;
        } else {
            reward += outcome.reward;
        }
        self.play_opponent(&mut reward, &mut settlements)?;

        Ok(Transition {
            observation: self.engine.observe(Seat::Player),
            reward,
            done: !settlements.is_empty(),
            label,
            settlements,
        })
    }

    pub fn valid_actions(&self) -> &'static [Action] {
        self.engine.valid_actions(Seat::Player)
    }

    pub fn observe(&self) -> Observation {
        self.engine.observe(Seat::Player)
    }

    /// Swaps the opponent policy, returning the previous one.
    pub fn update_opponent_policy(&mut self, policy: Box<dyn Policy>) -> Box<dyn Policy> {
        debug!(from = self.opponent.name(), to = policy.name(), "opponent policy swapped");
        std::mem::replace(&mut self.opponent, policy)
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    pub fn engine(&self) -> &Engine<D, E> {
        &self.engine
    }

    fn play_opponent(&mut self, reward: &mut i64, settlements: &mut Vec<Settlement>) -> Result<(), GameError> {
        while self.engine.to_act() == Seat::Opponent {
            let obs = self.engine.observe(Seat::Opponent);
            let choice = self.opponent.choose(&obs, self.engine.valid_actions(Seat::Opponent));
            let outcome = self.engine.execute_action(Seat::Opponent, choice)?;
            debug!(policy = self.opponent.name(), action = %outcome.label, "opponent acted");
            if outcome.action.is_none() {
                break;
            }
            if outcome.done {
                self.absorb(outcome, reward, settlements)?;
            }
        }
        Ok(())
    }

    /// Credits a finished hand from the player's side and re-splits the
    /// stacks when a seat is out of chips.
    fn absorb(
        &mut self,
        outcome: StepOutcome,
        reward: &mut i64,
        settlements: &mut Vec<Settlement>,
    ) -> Result<(), GameError> {
        let Some(settlement) = outcome.settlement else {
            return Ok(());
        };
        // pot on a win, the player's own shaping term on a loss
        *reward += match settlement.winner {
            Seat::Player => i64::from(settlement.pot),
            Seat::Opponent => settlement.shaping[Seat::Player.index()],
        };
        settlements.push(settlement);
        if self.engine.is_session_over() {
            debug!("seat busted, new session");
            self.engine.reset_session()?;
        }
        Ok(())
    }
}
