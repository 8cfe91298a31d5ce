use bigdecimal::BigDecimal;
use chrono::{Datelike, Utc};
use rand::Rng;

use crate::{
    common::{chips::Chips, error::LedgerError},
    domain::{
        account::Account,
        ledger::Ledger,
        transaction::{TransactionRecord, TxType},
    },
    store::LedgerStore,
    worker::ranking,
};

/// Id draws before account creation gives up.
pub const MAX_ID_ATTEMPTS: usize = 1024;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_SUFFIX_LEN: usize = 6;

pub fn handle<S, R>(
    store: &S,
    rng: &mut R,
    requested_id: Option<&str>,
    requested_balance: Option<&BigDecimal>,
) -> Result<Account, LedgerError>
where
    S: LedgerStore + ?Sized,
    R: Rng,
{
    let mut ledger = Ledger::load(store);
    let now = Utc::now();

    let requested_id = requested_id.map(str::trim).unwrap_or_default();
    let id = if requested_id.is_empty() {
        let year = now.year();
        generate_unique_id(&ledger, || generate_id(rng, year))?
    } else if ledger.contains(requested_id) {
        return Err(LedgerError::Conflict(requested_id.to_string()));
    } else {
        requested_id.to_string()
    };
    let balance = opening_balance(requested_balance)?;

    let account = Account::new(id, balance, now);
    ledger.accounts.push(account.clone());
    ledger.save_accounts(store)?;

    ledger.record(TransactionRecord::new(
        now,
        account.id.clone(),
        TxType::Generate,
        balance,
        balance,
    ));
    ledger.save_history(store)?;

    ranking::refresh(store);

    tracing::info!(id = %account.id, %balance, "account created");
    Ok(account)
}

/// Negative or non-numeric input opens at zero; fractions are floored.
fn opening_balance(requested: Option<&BigDecimal>) -> Result<Chips, LedgerError> {
    match requested {
        Some(n) if *n >= BigDecimal::from(0) => Chips::floor_from(n)
            .ok_or_else(|| LedgerError::InvalidRequest(format!("balance {n} out of range"))),
        _ => Ok(Chips::zero()),
    }
}

/// Draws ids from `next` until one is not taken by `ledger`.
pub fn generate_unique_id<F>(ledger: &Ledger, mut next: F) -> Result<String, LedgerError>
where
    F: FnMut() -> String,
{
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let candidate = next();
        if !ledger.contains(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(%candidate, attempt, "generated id already in use");
    }
    Err(LedgerError::IdSpaceExhausted {
        attempts: MAX_ID_ATTEMPTS,
    })
}

/// `CC-<year>-` followed by six characters from `[A-Z0-9]`.
pub fn generate_id<R: Rng>(rng: &mut R, year: i32) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("CC-{year}-{suffix}")
}
