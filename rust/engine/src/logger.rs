use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::cards::Card;
use crate::engine::Seat;
use crate::game::Street;
use crate::player::SeatRole;

/// One applied action. `requested` differs from `action` when the request
/// was degraded.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: Seat,
    pub street: Street,
    pub requested: Action,
    pub action: Action,
    /// Chips actually committed by this action
    pub amount: u32,
}

/// Scores seen at showdown (lower is stronger), ordered `[player, opponent]`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub scores: [u32; 2],
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of one hand, serialised as a JSONL line.
///
/// Pairs are ordered `[player, opponent]`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`, assigned by [`HandLogger`] when missing
    #[serde(default)]
    pub hand_id: Option<String>,
    /// Sequence number of the hand within its engine
    pub hand_no: u64,
    /// RNG seed the engine was built from, when known
    pub seed: Option<u64>,
    /// Stacks right after the blinds were posted
    pub starting_stacks: [u32; 2],
    pub roles: [SeatRole; 2],
    pub hole_cards: [Option<[Card; 2]>; 2],
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub winner: Seat,
    pub pot: u32,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// RFC3339 timestamp, assigned by [`HandLogger`] when missing
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.hand_id.is_none() {
            rec.hand_id = Some(self.next_id());
        }
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
