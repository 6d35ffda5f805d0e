//! UI helper functions for terminal output formatting.

use headsup_engine::cards::Card;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Cards with suit symbols, space separated. `-` for none.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards.iter().map(Card::pretty).collect::<Vec<_>>().join(" ")
}

/// Chip delta with an explicit sign.
pub fn signed(n: i64) -> String {
    format!("{:+}", n)
}
