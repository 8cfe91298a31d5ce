//! Chip balances, an append-only transaction ledger and a leaderboard
//! derived from current balances, persisted as whole JSON collections.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod store;
pub mod worker;
