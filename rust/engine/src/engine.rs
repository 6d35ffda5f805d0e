use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actions::{self, Action};
use crate::cards::Card;
use crate::config::EngineConfig;
use crate::deck::{CardSource, Deck};
use crate::errors::GameError;
use crate::game::{Round, Street, FULL_BOARD};
use crate::hand::{HandEvaluator, StandardEvaluator};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo};
use crate::observation::Observation;
use crate::player::{LastAction, Player, SeatRole};
use crate::rules;

/// One of the two seats at the table. `Player` is the learning seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Player, Seat::Opponent];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => f.write_str("player"),
            Seat::Opponent => f.write_str("opponent"),
        }
    }
}

/// How the pot of a finished hand was awarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub winner: Seat,
    pub pot: u32,
    /// `false` when the hand ended on a fold
    pub showdown: bool,
    /// Community cards at the moment the hand ended
    pub board: Vec<Card>,
    /// `previous_bet - total_bet` of each seat when the hand ended, ordered
    /// `[player, opponent]`
    pub shaping: [i64; 2],
    pub record: HandRecord,
}

/// Result of a single [`Engine::execute_action`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub done: bool,
    /// Canonical action applied, `None` when the call was out of turn
    pub action: Option<Action>,
    pub label: String,
    pub reward: i64,
    /// Present when `done`; the engine has already started the next hand
    pub settlement: Option<Settlement>,
}

/// Heads-up betting engine: owns both players, the pot, the board and the
/// card source, and drives one hand after another.
///
/// # Examples
///
/// ```
/// use headsup_engine::actions::Action;
/// use headsup_engine::engine::{Engine, Seat};
///
/// let mut engine = Engine::with_seed(7).unwrap();
/// assert_eq!(engine.pot(), 3);
///
/// let seat = engine.to_act();
/// let outcome = engine.execute_action(seat, Action::Fold).unwrap();
/// assert!(outcome.done);
/// assert_eq!(outcome.settlement.unwrap().winner, seat.other());
/// ```
#[derive(Debug, Clone)]
pub struct Engine<D = Deck, E = StandardEvaluator> {
    config: EngineConfig,
    deck: D,
    evaluator: E,
    /// Source of the session stack split
    rng: ChaCha20Rng,
    seed: Option<u64>,
    players: [Player; 2],
    round: Round,
    /// Seat of the last applied action on the current street
    last_actor: Option<Seat>,
    chips_in_play: u32,
    hand_no: u64,
    starting_stacks: [u32; 2],
    history: Vec<ActionRecord>,
}

impl Engine<Deck, StandardEvaluator> {
    pub fn with_seed(seed: u64) -> Result<Self, GameError> {
        Self::with_config(EngineConfig::default(), seed)
    }

    /// Default deck and evaluator; the deck and the stack split draw from
    /// separate streams of the same seed.
    pub fn with_config(config: EngineConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(1);
        let mut engine = Self::new(config, Deck::new_with_seed(seed), StandardEvaluator, rng)?;
        engine.seed = Some(seed);
        Ok(engine)
    }
}

impl<D: CardSource, E: HandEvaluator> Engine<D, E> {
    /// Starts a session with a random stack split and deals the first hand.
    pub fn new(config: EngineConfig, deck: D, evaluator: E, mut rng: ChaCha20Rng) -> Result<Self, GameError> {
        config.validate()?;
        let stacks = config.split_stacks(&mut rng);
        Self::build(config, stacks, deck, evaluator, rng)
    }

    /// Starts a session with fixed stacks `[player, opponent]`.
    pub fn with_stacks(
        config: EngineConfig,
        stacks: [u32; 2],
        deck: D,
        evaluator: E,
        rng: ChaCha20Rng,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Self::build(config, stacks, deck, evaluator, rng)
    }

    fn build(config: EngineConfig, stacks: [u32; 2], deck: D, evaluator: E, rng: ChaCha20Rng) -> Result<Self, GameError> {
        let mut engine = Self {
            config,
            deck,
            evaluator,
            rng,
            seed: None,
            players: initial_players(stacks),
            round: Round::default(),
            last_actor: None,
            chips_in_play: stacks[0] + stacks[1],
            hand_no: 0,
            starting_stacks: stacks,
            history: Vec::new(),
        };
        engine.reset_hand()?;
        Ok(engine)
    }

    /// Redraws the stack split and deals a fresh hand.
    pub fn reset_session(&mut self) -> Result<(), GameError> {
        let stacks = self.config.split_stacks(&mut self.rng);
        self.players = initial_players(stacks);
        self.chips_in_play = stacks[0] + stacks[1];
        debug!(player = stacks[0], opponent = stacks[1], "session reset");
        self.reset_hand()
    }

    /// Reshuffles, flips the blinds, posts them and deals two hole cards to
    /// each seat.
    pub fn reset_hand(&mut self) -> Result<(), GameError> {
        self.deck.shuffle();
        self.round.reset();
        self.history.clear();
        self.last_actor = None;
        self.hand_no += 1;
        for p in &mut self.players {
            let role = p.seat_role().flipped();
            p.reset_for_hand(role);
        }

        let bb = self.seat_with(SeatRole::BigBlind);
        self.round.pot += self.players[bb.index()].place_bet(self.config.blinds.big);
        self.round.pot += self.players[bb.other().index()].place_bet(self.config.blinds.small);
        self.starting_stacks = [self.players[0].stack(), self.players[1].stack()];

        for seat in Seat::BOTH {
            let cards = draw_pair(&mut self.deck)?;
            self.players[seat.index()].receive_cards(cards);
        }
        debug!(hand_no = self.hand_no, big_blind = %bb, pot = self.round.pot, "hand started");
        self.check_chips();
        Ok(())
    }

    /// Applies one action for `seat` and advances the hand.
    ///
    /// Out-of-turn calls change nothing, but the hand-over and reward checks
    /// still run. Illegal or unaffordable actions are degraded, never
    /// rejected; errors only come from the card source or the evaluator.
    pub fn execute_action(&mut self, seat: Seat, requested: Action) -> Result<StepOutcome, GameError> {
        let street = self.round.street();
        let blinds = self.config.blinds;
        let (actor, opponent) = pair_mut(&mut self.players, seat);

        let mut applied_action = None;
        if is_turn_of(actor, opponent) {
            let resolution = actions::resolve(requested, actor, opponent, blinds);
            for hop in &resolution.hops {
                debug!(%seat, from = %hop.from, to = %hop.to, reason = %hop.reason, "action degraded");
            }
            let applied = actions::apply(&resolution, actor, opponent, &mut self.round.pot);
            actor.set_acted(true);
            debug!(
                %seat,
                ?street,
                action = %resolution.action,
                contributed = applied.contributed,
                refunded = applied.refunded,
                "action applied"
            );
            self.history.push(ActionRecord {
                seat,
                street,
                requested,
                action: resolution.action,
                amount: applied.contributed,
            });
            self.last_actor = Some(seat);
            applied_action = Some(resolution.action);
        } else {
            debug!(%seat, %requested, "out of turn, ignored");
        }

        if applied_action == Some(Action::Call) && self.players.iter().any(|p| p.stack() == 0) {
            self.run_out()?;
        }
        self.check_chips();

        let done = self.is_hand_over();
        let reward = reward(
            done,
            &self.players[seat.index()],
            &self.players[seat.other().index()],
        );

        let settlement = if done {
            Some(self.settle()?)
        } else {
            if self.is_street_ready() {
                self.advance_street()?;
            }
            None
        };

        Ok(StepOutcome {
            done,
            action: applied_action,
            label: applied_action.map(|a| a.label().to_string()).unwrap_or_default(),
            reward,
            settlement,
        })
    }

    /// Pure form of [`Engine::execute_action`]: the current engine is left
    /// untouched and the successor state is returned.
    pub fn step(&self, seat: Seat, action: Action) -> Result<(Self, StepOutcome), GameError>
    where
        D: Clone,
        E: Clone,
    {
        let mut next = self.clone();
        let outcome = next.execute_action(seat, action)?;
        Ok((next, outcome))
    }

    pub fn valid_actions(&self, seat: Seat) -> &'static [Action] {
        rules::valid_actions(&self.players[seat.other().index()])
    }

    pub fn observe(&self, seat: Seat) -> Observation {
        let me = &self.players[seat.index()];
        let other = &self.players[seat.other().index()];
        Observation {
            seat,
            seat_role: me.seat_role(),
            hand: me.hand(),
            community_cards: self.round.board().to_vec(),
            street: self.round.street(),
            stacks: [me.stack(), other.stack()],
            bets: [me.total_bet(), other.total_bet()],
            pot: self.round.pot(),
            to_call: other.total_bet().saturating_sub(me.total_bet()),
            last_actions: [me.last_action(), other.last_action()],
        }
    }

    /// Seat expected to act next: the small blind opens every street,
    /// afterwards the seat that did not act last.
    pub fn to_act(&self) -> Seat {
        match self.last_actor {
            Some(seat) => seat.other(),
            None => self.seat_with(SeatRole::SmallBlind),
        }
    }

    /// Winner of the current hand. A fold decides it outright; otherwise the
    /// lower evaluator score wins and ties go to the opponent.
    pub fn resolve_winner(&self) -> Result<Seat, GameError> {
        if let Some(seat) = self.fold_winner() {
            return Ok(seat);
        }
        Ok(winner_by_score(self.showdown_scores()?))
    }

    pub fn is_hand_over(&self) -> bool {
        self.players.iter().any(Player::is_folded)
            || (self.round.board().len() == FULL_BOARD && self.is_street_ready())
    }

    /// Both seats acted, bets match and the last actions close the street.
    pub fn is_street_ready(&self) -> bool {
        let [p, o] = &self.players;
        p.has_acted()
            && o.has_acted()
            && p.total_bet() == o.total_bet()
            && closes_street(p.last_action(), o.last_action())
    }

    /// A seat owns no chips at all, behind or in the pot.
    pub fn is_session_over(&self) -> bool {
        self.players.iter().any(|p| p.stack() + p.total_bet() == 0)
    }

    /// Stacks plus pot.
    pub fn total_chips(&self) -> u32 {
        self.players[0].stack() + self.players[1].stack() + self.round.pot()
    }

    pub fn chips_in_play(&self) -> u32 {
        self.chips_in_play
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn seat_with(&self, role: SeatRole) -> Seat {
        if self.players[0].seat_role() == role {
            Seat::Player
        } else {
            Seat::Opponent
        }
    }

    pub fn pot(&self) -> u32 {
        self.round.pot()
    }

    pub fn board(&self) -> &[Card] {
        self.round.board()
    }

    pub fn street(&self) -> Street {
        self.round.street()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }

    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    fn advance_street(&mut self) -> Result<(), GameError> {
        self.round.deal_next_street(&mut self.deck)?;
        for p in &mut self.players {
            p.reset_for_street();
        }
        self.last_actor = None;
        debug!(street = ?self.round.street(), pot = self.round.pot(), "street advanced");
        Ok(())
    }

    /// No more betting is possible: deal the rest of the board at once and
    /// close the street for both seats.
    fn run_out(&mut self) -> Result<(), GameError> {
        self.round.run_out(&mut self.deck)?;
        for p in &mut self.players {
            p.set_acted(true);
        }
        debug!(board = self.round.board().len(), "all-in run-out");
        Ok(())
    }

    fn settle(&mut self) -> Result<Settlement, GameError> {
        let (winner, showdown) = match self.fold_winner() {
            Some(seat) => (seat, None),
            None => {
                let scores = self.showdown_scores()?;
                let notes = (scores[0] == scores[1]).then(|| "tie: pot awarded to opponent".to_string());
                (winner_by_score(scores), Some(ShowdownInfo { scores, notes }))
            }
        };

        let pot = self.round.pot;
        let board = self.round.board().to_vec();
        let shaping = self
            .players
            .each_ref()
            .map(|p| i64::from(p.previous_bet()) - i64::from(p.total_bet()));
        let record = HandRecord {
            hand_id: None,
            hand_no: self.hand_no,
            seed: self.seed,
            starting_stacks: self.starting_stacks,
            roles: [self.players[0].seat_role(), self.players[1].seat_role()],
            hole_cards: [self.players[0].hand(), self.players[1].hand()],
            actions: self.history.clone(),
            board: board.clone(),
            winner,
            pot,
            showdown: showdown.clone(),
            ts: None,
            meta: None,
        };

        self.round.pot = 0;
        self.players[winner.index()].award(pot);
        info!(
            hand_no = self.hand_no,
            %winner,
            pot,
            showdown = showdown.is_some(),
            "hand settled"
        );
        self.check_chips();

        self.reset_hand()?;
        Ok(Settlement {
            winner,
            pot,
            showdown: showdown.is_some(),
            board,
            shaping,
            record,
        })
    }

    fn fold_winner(&self) -> Option<Seat> {
        if self.players[Seat::Opponent.index()].is_folded() {
            Some(Seat::Player)
        } else if self.players[Seat::Player.index()].is_folded() {
            Some(Seat::Opponent)
        } else {
            None
        }
    }

    fn showdown_scores(&self) -> Result<[u32; 2], GameError> {
        let mut scores = [0u32; 2];
        for seat in Seat::BOTH {
            let hole = self.players[seat.index()]
                .hand()
                .ok_or(GameError::MissingHoleCards(seat))?;
            scores[seat.index()] = self.evaluator.evaluate(self.round.board(), &hole);
        }
        Ok(scores)
    }

    fn check_chips(&self) {
        debug_assert_eq!(
            self.total_chips(),
            self.chips_in_play,
            "chip conservation violated: stacks {:?}, pot {}",
            [self.players[0].stack(), self.players[1].stack()],
            self.round.pot()
        );
    }
}

/// Reward for the acting seat: on a finished hand the chips both seats put
/// in, otherwise minus the chips just committed. Not symmetrised for the
/// other seat.
pub fn reward(hand_over: bool, actor: &Player, opponent: &Player) -> i64 {
    if hand_over {
        i64::from(actor.total_bet()) + i64::from(opponent.total_bet())
    } else {
        i64::from(actor.previous_bet()) - i64::from(actor.total_bet())
    }
}

// The first reset flips roles, so the player opens the session as small blind.
fn initial_players(stacks: [u32; 2]) -> [Player; 2] {
    [
        Player::new(stacks[0], SeatRole::BigBlind),
        Player::new(stacks[1], SeatRole::SmallBlind),
    ]
}

fn pair_mut(players: &mut [Player; 2], seat: Seat) -> (&mut Player, &mut Player) {
    let [p, o] = players;
    match seat {
        Seat::Player => (p, o),
        Seat::Opponent => (o, p),
    }
}

/// Only the small blind may open a street.
fn is_turn_of(actor: &Player, opponent: &Player) -> bool {
    actor.has_acted() || opponent.has_acted() || actor.seat_role() == SeatRole::SmallBlind
}

fn closes_street(a: LastAction, b: LastAction) -> bool {
    use LastAction::{Call, Check, Raise};
    matches!(
        (a, b),
        (Check, Check) | (Raise, Call) | (Call, Raise) | (Check, Call) | (Call, Check)
    )
}

fn winner_by_score(scores: [u32; 2]) -> Seat {
    // ties go to the opponent
    if scores[Seat::Player.index()] < scores[Seat::Opponent.index()] {
        Seat::Player
    } else {
        Seat::Opponent
    }
}

fn draw_pair<D: CardSource + ?Sized>(deck: &mut D) -> Result<[Card; 2], GameError> {
    deck.draw(2)?
        .try_into()
        .map_err(|cards: Vec<Card>| GameError::DeckExhausted {
            requested: 2,
            remaining: cards.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_pairs_match_street_rules() {
        use LastAction::*;
        assert!(closes_street(Check, Check));
        assert!(closes_street(Raise, Call));
        assert!(closes_street(Check, Call));
        assert!(!closes_street(Raise, Raise));
        assert!(!closes_street(Call, None));
        assert!(!closes_street(Check, Raise));
    }

    #[test]
    fn only_small_blind_opens_a_street() {
        let sb = Player::new(10, SeatRole::SmallBlind);
        let bb = Player::new(10, SeatRole::BigBlind);
        assert!(is_turn_of(&sb, &bb));
        assert!(!is_turn_of(&bb, &sb));
    }

    #[test]
    fn ties_go_to_opponent() {
        assert_eq!(winner_by_score([100, 100]), Seat::Opponent);
        assert_eq!(winner_by_score([99, 100]), Seat::Player);
    }
}
