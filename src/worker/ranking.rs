use crate::{
    common::error::LedgerError,
    domain::{account::Account, ranking::RankingEntry},
    store::{self, Collection, LedgerStore},
};

/// Recomputes the leaderboard from the accounts collection and replaces the
/// stored ranking with it.
///
/// Never incremental: the output depends only on the saved accounts, so
/// running it twice without a mutation in between writes identical bytes.
pub fn rebuild<S: LedgerStore + ?Sized>(store: &S) -> Result<Vec<RankingEntry>, LedgerError> {
    let accounts: Vec<Account> = store::load(store, Collection::Accounts);
    let ranking = rank(&accounts);
    store::save(store, Collection::Ranking, &ranking)?;
    Ok(ranking)
}

/// Rebuild run after a mutation has already been persisted. A failure only
/// leaves the ranking stale until the next mutation, so it is logged rather
/// than reported to the caller.
pub fn refresh<S: LedgerStore + ?Sized>(store: &S) {
    if let Err(err) = rebuild(store) {
        tracing::error!(error = %err, "ranking rebuild failed; ranking is stale");
    }
}

/// Highest balance first. Equal balances keep their account order.
fn rank(accounts: &[Account]) -> Vec<RankingEntry> {
    let mut ranking: Vec<RankingEntry> = accounts.iter().map(RankingEntry::from).collect();
    // `sort_by` is stable.
    ranking.sort_by(|a, b| b.balance.cmp(&a.balance));
    ranking
}
