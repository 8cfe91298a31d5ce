use std::io::Write;

use crate::{
    common::wire,
    domain::{ranking::RankingEntry, transaction::TransactionRecord},
};

#[derive(serde::Serialize)]
/// History export row.
///
/// Headers written (in this order): `timestamp,id,type,amount,balance,games,dealer`.
struct HistoryRow<'a> {
    timestamp: String,
    id: &'a str,
    #[serde(rename = "type")]
    tx_type: &'static str,
    amount: i64,
    balance: i64,
    games: &'a str,
    dealer: &'a str,
}

#[derive(serde::Serialize)]
/// Ranking export row. `rank` is 1-based position in the stored order.
struct RankingRow<'a> {
    rank: usize,
    id: &'a str,
    balance: i64,
}

/// Writes history entries as CSV, in the order given (newest first when
/// passed the stored history).
///
/// # Examples
///
/// ```
/// use chip_ledger::io::writer::write_history;
///
/// let mut out = Vec::new();
/// write_history(&mut out, &[]).unwrap();
/// assert!(out.is_empty());
/// ```
pub fn write_history<W: Write>(
    writer: W,
    history: &[TransactionRecord],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for rec in history {
        wtr.serialize(HistoryRow {
            timestamp: rec
                .timestamp
                .as_ref()
                .map(wire::format_timestamp)
                .unwrap_or_default(),
            id: &rec.id,
            tx_type: rec.tx_type.as_str(),
            amount: rec.amount.as_i64(),
            balance: rec.balance.as_i64(),
            games: &rec.games,
            dealer: &rec.dealer,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the leaderboard as CSV with a `rank,id,balance` header.
pub fn write_ranking<W: Write>(writer: W, ranking: &[RankingEntry]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for (i, entry) in ranking.iter().enumerate() {
        wtr.serialize(RankingRow {
            rank: i + 1,
            id: &entry.id,
            balance: entry.balance.as_i64(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
