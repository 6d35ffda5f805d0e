//! Simulation command handler.
//!
//! Plays two policies against each other until the requested number of
//! hands has settled, optionally writing each hand as a JSONL record. A
//! session that runs out of chips is re-split and play continues.

use crate::config;
use crate::error::CliError;
use crate::ui;
use headsup_ai::{Policy, create_policy};
use headsup_engine::engine::{Engine, Seat, Settlement};
use headsup_engine::logger::HandLogger;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Default)]
struct SimStats {
    hands: u64,
    wins: [u64; 2],
    showdowns: u64,
    sessions: u64,
    /// Chips won by the player seat across all hands
    player_net: i64,
}

impl SimStats {
    fn record(&mut self, settlement: &Settlement, player_delta: i64) {
        self.hands += 1;
        self.wins[settlement.winner.index()] += 1;
        if settlement.showdown {
            self.showdowns += 1;
        }
        self.player_net += player_delta;
    }
}

pub fn handle_sim_command(
    hands: u64,
    seed: Option<u64>,
    output: Option<PathBuf>,
    player: &str,
    opponent: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let opponent = opponent.unwrap_or(cfg.opponent.clone());

    let mut policies: [Box<dyn Policy>; 2] = [
        create_policy(player, base_seed)?,
        create_policy(&opponent, base_seed.wrapping_add(1))?,
    ];
    let mut engine = Engine::with_config(cfg.engine_config(), base_seed)?;
    let mut logger = match &output {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    let mut stats = SimStats {
        sessions: 1,
        ..SimStats::default()
    };
    let mut owned_at_start = owned(&engine, Seat::Player);

    while stats.hands < hands {
        let seat = engine.to_act();
        let observation = engine.observe(seat);
        let action = policies[seat.index()].choose(&observation, engine.valid_actions(seat));
        let outcome = engine.execute_action(seat, action)?;

        let Some(settlement) = outcome.settlement else {
            continue;
        };
        let owned_now = owned(&engine, Seat::Player);
        stats.record(&settlement, i64::from(owned_now) - i64::from(owned_at_start));
        if let Some(logger) = logger.as_mut() {
            logger.write(&settlement.record)?;
        }

        if engine.is_session_over() {
            debug!(hands = stats.hands, "session over, re-splitting stacks");
            engine.reset_session()?;
            stats.sessions += 1;
        }
        owned_at_start = owned(&engine, Seat::Player);
    }

    writeln!(out, "Simulated: {} hands", stats.hands)?;
    writeln!(out, "Seed: {}", base_seed)?;
    for seat in Seat::BOTH {
        writeln!(
            out,
            "Wins {} ({}): {}",
            seat,
            policies[seat.index()].name(),
            stats.wins[seat.index()]
        )?;
    }
    writeln!(out, "Showdowns: {}", stats.showdowns)?;
    writeln!(out, "Sessions: {}", stats.sessions)?;
    writeln!(out, "Player net: {}", ui::signed(stats.player_net))?;
    if let Some(path) = &output {
        writeln!(out, "Hands written to {}", path.display())?;
    }
    Ok(())
}

/// Chips a seat controls, counting what it has already put in this hand.
fn owned(engine: &Engine, seat: Seat) -> u32 {
    let p = engine.player(seat);
    p.stack() + p.total_bet()
}
