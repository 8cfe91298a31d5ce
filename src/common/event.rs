use bigdecimal::BigDecimal;

use crate::domain::transaction::TxType;

/// A mutating request, decoded from the API body and handed to the processor.
///
/// Numeric fields have already been coerced; `None` means the input was not
/// a number at all.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    CreateAccount {
        id: Option<String>,
        balance: Option<BigDecimal>,
    },
    Transaction {
        id: String,
        amount: Option<BigDecimal>,
        tx_type: TxType,
        games: String,
        dealer: String,
    },
}
