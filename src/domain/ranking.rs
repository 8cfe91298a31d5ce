use serde::{Deserialize, Serialize};

use crate::{common::chips::Chips, domain::account::Account};

/// Leaderboard row. Always derived from the accounts collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub id: String,
    pub balance: Chips,
}

impl From<&Account> for RankingEntry {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            balance: account.balance,
        }
    }
}
