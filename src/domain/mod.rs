pub mod account;
pub mod ledger;
pub mod ranking;
pub mod stats;
pub mod transaction;
