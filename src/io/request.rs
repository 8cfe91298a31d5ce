use serde_json::Value;

use crate::{
    common::{chips::coerce_number, error::LedgerError, event::LedgerEvent, wire},
    domain::transaction::TxType,
    worker::handlers::transaction,
};

/// Decodes a `POST /api/add` or `POST /api/subtract` body:
/// `{id, amount, games?, dealer?}`.
///
/// Only the shape is checked here. Range checks on the amount belong to the
/// transaction handler, so a missing or non-numeric amount decodes to `None`.
/// A present id that is not a string can never match a stored account: once
/// the amount checks out, it is reported as not found.
///
/// # Examples
///
/// ```
/// use chip_ledger::io::request::decode_transaction;
/// use chip_ledger::common::event::LedgerEvent;
/// use chip_ledger::domain::transaction::TxType;
/// use serde_json::json;
///
/// let event = decode_transaction(TxType::Add, &json!({"id": "A", "amount": "25"})).unwrap();
/// assert!(matches!(event, LedgerEvent::Transaction { ref id, amount: Some(_), .. } if id == "A"));
/// ```
pub fn decode_transaction(tx_type: TxType, body: &Value) -> Result<LedgerEvent, LedgerError> {
    let amount = field(body, "amount").and_then(coerce_number);
    let id = match field(body, "id") {
        Some(Value::String(s)) => s.clone(),
        Some(value) if is_truthy(value) => {
            transaction::validate_amount(amount.as_ref())?;
            return Err(LedgerError::NotFound(wire::value_to_text(value)));
        }
        _ => String::new(),
    };

    Ok(LedgerEvent::Transaction {
        id,
        amount,
        tx_type,
        games: text_field(body, "games"),
        dealer: text_field(body, "dealer"),
    })
}

/// Decodes a `POST /api/users` body: `{id?, balance?}`.
pub fn decode_create_account(body: &Value) -> Result<LedgerEvent, LedgerError> {
    let id = match field(body, "id") {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(other) => {
            return Err(LedgerError::InvalidRequest(format!(
                "account id must be a string, got {other}"
            )));
        }
    };

    Ok(LedgerEvent::CreateAccount {
        id,
        balance: field(body, "balance").and_then(coerce_number),
    })
}

// Non-object bodies behave like `{}`.
fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.as_object().and_then(|o| o.get(name))
}

fn text_field(body: &Value, name: &str) -> String {
    field(body, name).map(wire::value_to_text).unwrap_or_default()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
