use crate::{
    common::error::LedgerError,
    domain::{account::Account, transaction::TransactionRecord},
    store::{self, Collection, LedgerStore},
};

/// Working copy of the accounts and history collections for one mutation.
///
/// Loaded leniently, changed in memory, then written back whole.
#[derive(Debug, Default)]
pub struct Ledger {
    pub accounts: Vec<Account>,
    /// Newest entry first.
    pub history: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn load<S: LedgerStore + ?Sized>(store: &S) -> Self {
        Self {
            accounts: store::load(store, Collection::Accounts),
            history: store::load(store, Collection::Transactions),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.iter().any(|a| a.id == id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Prepends an entry so history stays newest first.
    pub fn record(&mut self, entry: TransactionRecord) {
        self.history.insert(0, entry);
    }

    pub fn save_accounts<S: LedgerStore + ?Sized>(&self, store: &S) -> Result<(), LedgerError> {
        store::save(store, Collection::Accounts, &self.accounts)
    }

    pub fn save_history<S: LedgerStore + ?Sized>(&self, store: &S) -> Result<(), LedgerError> {
        store::save(store, Collection::Transactions, &self.history)
    }
}
