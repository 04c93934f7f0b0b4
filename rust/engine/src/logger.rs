use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::RoundSummary;
use crate::game::GameVariant;
use crate::hand::CARDS_PER_HAND;
use crate::rules::Bet;

/// Final state of one hand in a settled round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// 0 is the primary hand
    pub hand: usize,
    pub cards: [Card; CARDS_PER_HAND],
    pub held: [bool; CARDS_PER_HAND],
    /// Paytable label, empty for a losing hand
    pub label: String,
    pub payout: u32,
}

/// One settled round, serialized as a JSONL line in the play history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    pub variant: GameVariant,
    /// Credits bet per hand
    pub bet: Bet,
    /// Deck seed when the session was built with one (enables replay)
    #[serde(default)]
    pub seed: Option<u64>,
    pub hands: Vec<HandRecord>,
    pub total_payout: u32,
    /// Ledger balance after settlement
    pub balance: u32,
    /// Timestamp when the round settled (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_summary(
        round_id: String,
        variant: GameVariant,
        seed: Option<u64>,
        summary: &RoundSummary,
    ) -> Self {
        Self {
            round_id,
            variant,
            bet: summary.bet,
            seed,
            hands: summary
                .hands
                .iter()
                .map(|h| HandRecord {
                    hand: h.hand,
                    cards: h.cards,
                    held: h.held,
                    label: h.outcome.label.clone(),
                    payout: h.outcome.payout,
                })
                .collect(),
            total_payout: summary.total_payout,
            balance: summary.balance,
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends settled rounds to a JSONL file.
#[derive(Debug)]
pub struct RoundLogger {
    writer: BufWriter<std::fs::File>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
