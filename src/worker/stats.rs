use crate::{
    common::error::LedgerError,
    domain::{account::Account, stats::Stats, transaction::TransactionRecord},
    store::{self, Collection, LedgerStore},
};

/// Dashboard summary over accounts and history.
///
/// Unlike the mutation paths this does not fall back to empty collections:
/// a collection that exists but cannot be read is an error here.
pub fn compute<S: LedgerStore + ?Sized>(store: &S) -> Result<Stats, LedgerError> {
    let accounts: Vec<Account> = store::try_load(store, Collection::Accounts)
        .map_err(|e| LedgerError::Computation(format!("accounts: {e}")))?;
    let history: Vec<TransactionRecord> = store::try_load(store, Collection::Transactions)
        .map_err(|e| LedgerError::Computation(format!("history: {e}")))?;

    let total_balance = accounts
        .iter()
        .try_fold(0i64, |sum, a| sum.checked_add(a.balance.as_i64()))
        .ok_or_else(|| LedgerError::Computation("total balance overflow".into()))?;

    Ok(Stats {
        active_ids: accounts.len(),
        total_balance,
        total_transactions: history.len(),
    })
}
