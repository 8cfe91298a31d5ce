use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::{
    common::{chips::Chips, error::LedgerError},
    domain::{
        ledger::Ledger,
        transaction::{TransactionRecord, TxType},
    },
    store::LedgerStore,
    worker::ranking,
};

/// Credits (`Add`) or debits (`Subtract`) an account and returns the new
/// balance. Balances are not floored at zero.
pub fn handle<S: LedgerStore + ?Sized>(
    store: &S,
    id: &str,
    amount: Option<&BigDecimal>,
    tx_type: TxType,
    games: &str,
    dealer: &str,
) -> Result<Chips, LedgerError> {
    if id.is_empty() {
        return Err(LedgerError::InvalidRequest("missing account id".into()));
    }
    let amount = validate_amount(amount)?;

    let mut ledger = Ledger::load(store);
    let account = ledger
        .account_mut(id)
        .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

    let balance = match tx_type {
        TxType::Add => account.balance.checked_add(amount),
        TxType::Subtract => account.balance.checked_sub(amount),
        TxType::Generate => {
            return Err(LedgerError::InvalidRequest(
                "generate entries are only written on account creation".into(),
            ));
        }
    }
    .ok_or_else(|| LedgerError::InvalidRequest(format!("balance of {id} would overflow")))?;
    account.balance = balance;

    ledger.record(
        TransactionRecord::new(Utc::now(), id, tx_type, amount, balance)
            .with_context(games, dealer),
    );
    ledger.save_accounts(store)?;
    ledger.save_history(store)?;

    ranking::refresh(store);

    tracing::info!(%id, %tx_type, %amount, %balance, "transaction applied");
    Ok(balance)
}

/// Amounts must be positive and are floored to whole chips; anything that
/// floors to zero is rejected.
pub(crate) fn validate_amount(amount: Option<&BigDecimal>) -> Result<Chips, LedgerError> {
    let amount = amount.ok_or_else(|| LedgerError::InvalidRequest("amount is not a number".into()))?;
    if *amount <= BigDecimal::from(0) {
        return Err(LedgerError::InvalidRequest(format!("amount {amount} is not positive")));
    }
    let chips = Chips::floor_from(amount)
        .ok_or_else(|| LedgerError::InvalidRequest(format!("amount {amount} out of range")))?;
    if chips == Chips::zero() {
        return Err(LedgerError::InvalidRequest(format!("amount {amount} is less than one chip")));
    }
    Ok(chips)
}
