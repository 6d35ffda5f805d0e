//! Deal command handler: starts one hand and shows the table.

use crate::config;
use crate::error::CliError;
use crate::ui;
use headsup_engine::engine::{Engine, Seat};
use headsup_engine::player::SeatRole;
use std::io::Write;

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let engine = Engine::with_config(cfg.engine_config(), seed)?;

    writeln!(out, "Seed: {}", seed)?;
    for seat in Seat::BOTH {
        let p = engine.player(seat);
        let cards = p.hand().map(|h| ui::format_cards(&h)).unwrap_or_else(|| "-".into());
        writeln!(
            out,
            "{:<8} {} stack {:>4}  bet {:>3}  hole {}",
            seat.to_string(),
            role_tag(p.seat_role()),
            p.stack(),
            p.total_bet(),
            cards
        )?;
    }
    let blinds = engine.config().blinds;
    writeln!(out, "Blinds: {}/{}", blinds.small, blinds.big)?;
    writeln!(out, "Pot: {}", engine.pot())?;
    writeln!(out, "To act: {}", engine.to_act())?;
    Ok(())
}

fn role_tag(role: SeatRole) -> &'static str {
    match role {
        SeatRole::SmallBlind => "SB",
        SeatRole::BigBlind => "BB",
    }
}
