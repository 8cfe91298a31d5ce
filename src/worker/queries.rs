use crate::{
    common::error::LedgerError,
    domain::{account::Account, ranking::RankingEntry, transaction::TransactionRecord},
    store::{self, Collection, LedgerStore},
};

pub fn balance<S: LedgerStore + ?Sized>(store: &S, id: &str) -> Result<Account, LedgerError> {
    let accounts: Vec<Account> = store::load(store, Collection::Accounts);
    accounts
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| LedgerError::NotFound(id.to_string()))
}

/// Newest first, as stored.
pub fn history<S: LedgerStore + ?Sized>(store: &S) -> Vec<TransactionRecord> {
    store::load(store, Collection::Transactions)
}

/// The stored ranking as of the last rebuild.
pub fn ranking<S: LedgerStore + ?Sized>(store: &S) -> Vec<RankingEntry> {
    store::load(store, Collection::Ranking)
}
