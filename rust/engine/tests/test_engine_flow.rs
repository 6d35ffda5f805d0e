use headsup_engine::actions::Action;
use headsup_engine::cards::{parse_cards, Card};
use headsup_engine::config::EngineConfig;
use headsup_engine::deck::{Deck, StackedDeck};
use headsup_engine::engine::{reward, Engine, Seat};
use headsup_engine::errors::GameError;
use headsup_engine::game::Street;
use headsup_engine::hand::HandEvaluator;
use headsup_engine::player::{LastAction, Player, SeatRole};
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// player hole, opponent hole, flop, turn, river
const STACKED: &str = "As Ad Kc Kd 2h 7s 9c Jd 3h";

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

fn player_wins(_board: &[Card], hole: &[Card; 2]) -> u32 {
    if hole[0] == c("As") {
        1500
    } else {
        3000
    }
}

fn opponent_wins(_board: &[Card], hole: &[Card; 2]) -> u32 {
    if hole[0] == c("As") {
        3000
    } else {
        1500
    }
}

fn everyone_ties(_board: &[Card], _hole: &[Card; 2]) -> u32 {
    100
}

fn stacked<E: HandEvaluator>(stacks: [u32; 2], evaluator: E) -> Engine<StackedDeck, E> {
    Engine::with_stacks(
        EngineConfig::default(),
        stacks,
        StackedDeck::new(parse_cards(STACKED).unwrap()),
        evaluator,
        ChaCha20Rng::seed_from_u64(0),
    )
    .unwrap()
}

fn seeded(stacks: [u32; 2], seed: u64) -> Engine {
    Engine::with_stacks(
        EngineConfig::default(),
        stacks,
        Deck::new_with_seed(seed),
        Default::default(),
        ChaCha20Rng::seed_from_u64(seed),
    )
    .unwrap()
}

/// Checks every remaining street until the hand ends.
fn check_down<E: HandEvaluator>(eng: &mut Engine<StackedDeck, E>) -> headsup_engine::engine::StepOutcome {
    loop {
        let seat = eng.to_act();
        let out = eng.execute_action(seat, Action::Check).unwrap();
        if out.done {
            return out;
        }
    }
}

#[test]
fn first_hand_posts_blinds_with_player_as_small_blind() {
    let eng = seeded([60, 140], 1);
    let p = eng.player(Seat::Player);
    let o = eng.player(Seat::Opponent);
    assert_eq!(p.seat_role(), SeatRole::SmallBlind);
    assert_eq!(o.seat_role(), SeatRole::BigBlind);
    assert_eq!((p.stack(), o.stack()), (59, 138));
    assert_eq!(eng.pot(), 3);
    assert!(p.hand().is_some() && o.hand().is_some());
    assert_eq!(eng.to_act(), Seat::Player);
    assert_eq!(eng.street(), Street::Preflop);
}

#[test]
fn small_blind_fold_awards_pot_and_starts_next_hand() {
    let mut eng = seeded([60, 140], 1);
    let out = eng.execute_action(Seat::Player, Action::Fold).unwrap();
    assert!(out.done);
    assert_eq!(out.label, "FOLD");
    assert_eq!(out.reward, 3);

    let s = out.settlement.expect("settled");
    assert_eq!(s.winner, Seat::Opponent);
    assert_eq!(s.pot, 3);
    assert!(!s.showdown);
    // blinds were each seat's only commitment
    assert_eq!(s.shaping, [-1, -2]);

    // opponent collected 3 (141) and now posts the small blind
    assert_eq!(eng.player(Seat::Opponent).stack(), 140);
    assert_eq!(eng.player(Seat::Opponent).seat_role(), SeatRole::SmallBlind);
    assert_eq!(eng.player(Seat::Player).stack(), 57);
    assert_eq!(eng.player(Seat::Player).seat_role(), SeatRole::BigBlind);
    assert_eq!(eng.pot(), 3);
    assert_eq!(eng.hand_no(), 2);
}

#[test]
fn raise_reward_is_minus_the_chips_committed() {
    let mut eng = seeded([60, 140], 1);
    let out = eng.execute_action(Seat::Player, Action::BigRaise).unwrap();
    assert!(!out.done);
    assert_eq!(out.label, "BIG_RAISE");
    assert_eq!(out.reward, -3);
    assert_eq!(eng.player(Seat::Player).total_bet(), 4);
    assert_eq!(eng.to_act(), Seat::Opponent);
}

#[test]
fn reward_helper_uses_previous_and_total_bet() {
    let mut actor = Player::new(100, SeatRole::BigBlind);
    let opponent = Player::new(100, SeatRole::SmallBlind);
    actor.place_bet(2);
    actor.place_bet(4);
    assert_eq!(reward(false, &actor, &opponent), -4);
    assert_eq!(reward(true, &actor, &opponent), 6);
}

#[test]
fn check_facing_big_blind_is_played_as_call() {
    let mut eng = seeded([100, 100], 2);
    let out = eng.execute_action(Seat::Player, Action::Check).unwrap();
    assert_eq!(out.action, Some(Action::Call));
    assert_eq!(out.label, "CALL");
    assert_eq!(out.reward, -1);
    assert_eq!(eng.pot(), 4);
}

#[test]
fn valid_actions_follow_opponent_state() {
    let mut eng = seeded([100, 100], 2);
    assert_eq!(
        eng.valid_actions(Seat::Player),
        &[Action::Fold, Action::Call, Action::MinRaise, Action::BigRaise]
    );
    eng.execute_action(Seat::Player, Action::Call).unwrap();
    assert_eq!(
        eng.valid_actions(Seat::Opponent),
        &[Action::Check, Action::MinRaise, Action::BigRaise]
    );
}

#[test]
fn showdown_goes_to_lower_score() {
    let mut eng = stacked([100, 100], player_wins);
    eng.execute_action(Seat::Player, Action::Call).unwrap();
    let out = eng.execute_action(Seat::Opponent, Action::Check).unwrap();
    assert!(!out.done);
    assert_eq!(eng.street(), Street::Flop);
    assert_eq!(eng.board(), parse_cards("2h 7s 9c").unwrap().as_slice());
    assert_eq!(eng.to_act(), Seat::Player);

    let out = check_down(&mut eng);
    assert_eq!(out.reward, 4);
    let s = out.settlement.unwrap();
    assert!(s.showdown);
    assert_eq!(s.winner, Seat::Player);
    assert_eq!(s.pot, 4);
    assert_eq!(s.board.len(), 5);
    assert_eq!(s.record.showdown.unwrap().scores, [1500, 3000]);

    // 98 + 4, then the big blind of the next hand
    assert_eq!(eng.player(Seat::Player).stack(), 100);
    assert_eq!(eng.player(Seat::Opponent).stack(), 97);
}

#[test]
fn tie_goes_to_opponent() {
    let mut eng = stacked([100, 100], everyone_ties);
    eng.execute_action(Seat::Player, Action::Call).unwrap();
    eng.execute_action(Seat::Opponent, Action::Check).unwrap();
    let s = check_down(&mut eng).settlement.unwrap();
    assert_eq!(s.winner, Seat::Opponent);
    assert!(s.record.showdown.unwrap().notes.is_some());
}

#[test]
fn river_closes_on_check_then_call() {
    let mut eng = stacked([100, 100], player_wins);
    eng.execute_action(Seat::Player, Action::Call).unwrap();
    eng.execute_action(Seat::Opponent, Action::Check).unwrap();
    for _ in 0..2 {
        eng.execute_action(Seat::Player, Action::Check).unwrap();
        eng.execute_action(Seat::Opponent, Action::Check).unwrap();
    }
    assert_eq!(eng.street(), Street::River);
    eng.execute_action(Seat::Player, Action::Check).unwrap();
    // nothing to call, so CALL is played as CHECK and closes the river
    let out = eng.execute_action(Seat::Opponent, Action::Call).unwrap();
    assert_eq!(out.action, Some(Action::Check));
    assert!(out.done);
}

#[test]
fn blinds_alternate_and_big_blind_cannot_open() {
    let mut eng = seeded([100, 100], 4);
    eng.execute_action(Seat::Player, Action::Fold).unwrap();
    assert_eq!(eng.to_act(), Seat::Opponent);

    let pot = eng.pot();
    let out = eng.execute_action(Seat::Player, Action::BigRaise).unwrap();
    assert_eq!(out.action, None);
    assert_eq!(out.label, "");
    assert!(!out.done);
    // stale bets of the blind post
    assert_eq!(out.reward, -2);
    assert_eq!(eng.pot(), pot);
    assert!(!eng.player(Seat::Player).has_acted());

    let out = eng.execute_action(Seat::Opponent, Action::Fold).unwrap();
    assert_eq!(out.settlement.unwrap().winner, Seat::Player);
    assert_eq!(eng.player(Seat::Player).seat_role(), SeatRole::SmallBlind);
}

#[test]
fn all_in_call_runs_out_the_board_at_once() {
    let mut eng = stacked([2, 198], player_wins);
    let out = eng.execute_action(Seat::Player, Action::Call).unwrap();
    assert!(!out.done);
    assert_eq!(eng.player(Seat::Player).stack(), 0);
    assert_eq!(eng.board().len(), 5);
    assert_eq!(eng.street(), Street::River);

    // the big blind still gets its option
    assert_eq!(eng.to_act(), Seat::Opponent);
    let out = eng.execute_action(Seat::Opponent, Action::BigRaise).unwrap();
    assert_eq!(out.action, Some(Action::Check));
    assert!(out.done);
    let s = out.settlement.unwrap();
    assert_eq!(s.pot, 4);
    assert_eq!(s.winner, Seat::Player);
}

#[test]
fn calling_an_all_in_raise_from_a_deep_stack_settles_at_once() {
    let mut eng = stacked([4, 196], player_wins);
    let out = eng.execute_action(Seat::Player, Action::BigRaise).unwrap();
    assert!(!out.done);
    assert_eq!(eng.player(Seat::Player).stack(), 0);
    assert!(eng.board().is_empty());

    // the caller keeps 192 behind but nobody can bet any more
    let out = eng.execute_action(Seat::Opponent, Action::Call).unwrap();
    assert!(out.done);
    let s = out.settlement.unwrap();
    assert_eq!(s.board.len(), 5);
    assert_eq!((s.winner, s.pot), (Seat::Player, 8));
    assert_eq!(eng.player(Seat::Opponent).stack() + eng.player(Seat::Opponent).total_bet(), 192);
}

#[test]
fn short_call_refunds_the_uncalled_blind() {
    // the player's whole stack goes in as the small blind
    let mut eng = stacked([1, 199], opponent_wins);
    assert_eq!(eng.player(Seat::Player).stack(), 0);
    let out = eng.execute_action(Seat::Player, Action::Call).unwrap();
    assert_eq!(out.action, Some(Action::Call));
    assert_eq!(eng.pot(), 2);
    assert_eq!(eng.player(Seat::Opponent).total_bet(), 1);
    assert_eq!(eng.player(Seat::Opponent).stack(), 198);
    assert_eq!(eng.board().len(), 5);

    let out = eng.execute_action(Seat::Opponent, Action::Check).unwrap();
    let s = out.settlement.unwrap();
    assert_eq!((s.winner, s.pot), (Seat::Opponent, 2));
    assert!(eng.is_session_over());
    assert_eq!(eng.total_chips(), 200);
}

#[test]
fn failed_run_out_leaves_board_empty() {
    let mut eng = Engine::with_stacks(
        EngineConfig::default(),
        [2, 198],
        StackedDeck::new(parse_cards("As Ad Kc Kd 2h 7s").unwrap()),
        player_wins,
        ChaCha20Rng::seed_from_u64(0),
    )
    .unwrap();
    let err = eng.execute_action(Seat::Player, Action::Call).unwrap_err();
    assert_eq!(
        err,
        GameError::DeckExhausted {
            requested: 5,
            remaining: 2
        }
    );
    assert!(eng.board().is_empty());
}

#[test]
fn observation_hides_opponent_cards() {
    let eng = stacked([100, 100], player_wins);
    let obs = eng.observe(Seat::Opponent);
    assert_eq!(obs.seat, Seat::Opponent);
    assert_eq!(obs.hand, Some([c("Kc"), c("Kd")]));
    assert_eq!(obs.stacks, [98, 99]);
    assert_eq!(obs.bets, [2, 1]);
    assert_eq!(obs.to_call, 0);
    assert_eq!(obs.last_actions, [LastAction::None, LastAction::None]);
    // the player holds both aces
    let json = serde_json::to_string(&obs).unwrap();
    assert!(!json.contains("Ace"));
}

#[test]
fn pure_step_leaves_engine_untouched() {
    let eng = seeded([100, 100], 9);
    let (next, out) = eng.step(Seat::Player, Action::MinRaise).unwrap();
    assert_eq!(out.label, "MIN_RAISE");
    assert_eq!(eng.pot(), 3);
    assert_eq!(next.pot(), 5);
    assert_eq!(eng.to_act(), Seat::Player);
    assert_eq!(next.to_act(), Seat::Opponent);
}

#[test]
fn same_seed_same_session() {
    let a = Engine::with_seed(11).unwrap();
    let b = Engine::with_seed(11).unwrap();
    assert_eq!(a.observe(Seat::Player), b.observe(Seat::Player));
    assert_eq!(a.observe(Seat::Opponent), b.observe(Seat::Opponent));
    let p = a.player(Seat::Player).stack() + a.player(Seat::Player).total_bet();
    assert!((4..=196).contains(&p));
}

#[test]
fn random_play_conserves_chips() {
    let mut eng = Engine::with_seed(3).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut hands = 0;
    for _ in 0..5_000 {
        let seat = eng.to_act();
        let action = *eng.valid_actions(seat).choose(&mut rng).unwrap();
        let out = eng.execute_action(seat, action).unwrap();
        assert!(out.action.is_some(), "seat to act was gated");
        assert_eq!(eng.total_chips(), 200);
        if out.done {
            hands += 1;
            let record = out.settlement.unwrap().record;
            assert!(!record.actions.is_empty());
        }
        if eng.is_session_over() {
            eng.reset_session().unwrap();
        }
    }
    assert!(hands > 100, "only {hands} hands finished");
}
