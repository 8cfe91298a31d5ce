use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A whole number of chips: an account balance or a transaction amount.
///
/// Balances are allowed to go negative, amounts never are. Persisted as a
/// bare JSON integer.
///
/// # Examples
/// ```
/// use chip_ledger::common::chips::Chips;
///
/// let balance = Chips::new(50);
/// let after = balance.checked_sub(Chips::new(100)).unwrap();
/// assert_eq!(after.as_i64(), -50);
/// ```
pub struct Chips(i64);

impl Chips {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Chips(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn checked_add(self, rhs: Chips) -> Option<Chips> {
        self.0.checked_add(rhs.0).map(Chips)
    }

    pub fn checked_sub(self, rhs: Chips) -> Option<Chips> {
        self.0.checked_sub(rhs.0).map(Chips)
    }

    /// Floors a decimal to whole chips. `None` when it does not fit in `i64`.
    pub fn floor_from(value: &BigDecimal) -> Option<Chips> {
        value
            .with_scale_round(0, RoundingMode::Floor)
            .to_i64()
            .map(Chips)
    }

    /// Reads a persisted balance the way the stored data has always been
    /// interpreted: numbers are floored, numeric strings parsed, anything
    /// else counts as zero.
    pub fn lenient(value: &Value) -> Chips {
        coerce_number(value)
            .and_then(|n| Chips::floor_from(&n))
            .unwrap_or_default()
    }
}

/// Coerces a JSON value to a number with the same leniency the UI clients
/// rely on: `null`, `false` and blank strings are zero, `true` is one,
/// strings are trimmed and parsed. Returns `None` for anything non-numeric
/// (including a missing field, which callers pass as `None` upstream).
pub fn coerce_number(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Null => Some(BigDecimal::from(0)),
        Value::Bool(b) => Some(BigDecimal::from(u8::from(*b))),
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                Some(BigDecimal::from(0))
            } else {
                t.parse().ok()
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Chips {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Chips {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Chips::lenient(&value))
    }
}
