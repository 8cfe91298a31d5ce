#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("account not found: {0}")]
    NotFound(String),
    #[error("account id already exists: {0}")]
    Conflict(String),
    #[error("failed to compute stats: {0}")]
    Computation(String),
    #[error("no unused account id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("json error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    /// HTTP status code the API layer answers with for this error.
    pub fn status(&self) -> u16 {
        match self {
            LedgerError::InvalidRequest(_) => 400,
            LedgerError::NotFound(_) => 404,
            LedgerError::Conflict(_) => 409,
            LedgerError::Computation(_)
            | LedgerError::IdSpaceExhausted { .. }
            | LedgerError::Storage(_)
            | LedgerError::Serialization(_)
            | LedgerError::Csv(_) => 500,
        }
    }

    /// Message placed in the `error` field of a JSON error body.
    ///
    /// Internal faults collapse to a generic message; the API layer
    /// substitutes route specific wording where the clients expect it.
    pub fn public_message(&self) -> &'static str {
        match self {
            LedgerError::InvalidRequest(_) => "invalid request",
            LedgerError::NotFound(_) => "ID not found",
            LedgerError::Conflict(_) => "id exists",
            LedgerError::Computation(_) => "Failed to compute stats",
            _ => "internal error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(LedgerError::InvalidRequest("x".into()).status(), 400);
        assert_eq!(LedgerError::NotFound("x".into()).status(), 404);
        assert_eq!(LedgerError::Conflict("x".into()).status(), 409);
    }

    #[test]
    fn internal_errors_map_to_500_with_generic_message() {
        let err = LedgerError::from(std::io::Error::other("disk gone"));
        assert_eq!(err.status(), 500);
        assert_eq!(err.public_message(), "internal error");

        let err = LedgerError::IdSpaceExhausted { attempts: 3 };
        assert_eq!(err.status(), 500);
        assert_eq!(
            err.to_string(),
            "no unused account id found after 3 attempts"
        );
    }
}
