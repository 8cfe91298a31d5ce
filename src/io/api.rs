//! JSON API consumed by the dealer and player pages.
//!
//! Each handler turns a request into an [`ApiResponse`] carrying the status
//! code and JSON body the pages expect. Serving them over HTTP is left to
//! whatever server embeds this crate; [`Api::route`] maps method and path
//! to the right handler for it.

use rand::{Rng, rngs::StdRng};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    common::error::LedgerError,
    domain::transaction::TxType,
    io::request,
    store::LedgerStore,
    worker::{
        processor::{Outcome, Processor},
        queries, stats,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self::ok(body),
            Err(err) => {
                tracing::error!(error = %err, "response serialization failed");
                Self::error(500, "internal error")
            }
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    fn from_error(err: &LedgerError) -> Self {
        if err.status() >= 500 {
            tracing::error!(error = %err, "request failed");
        }
        Self::error(err.status(), err.public_message())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct Api<S, R = StdRng> {
    store: S,
    processor: Processor<R>,
}

impl<S: LedgerStore> Api<S> {
    pub fn new(store: S) -> Self {
        Self::with_processor(store, Processor::new())
    }
}

impl<S: LedgerStore, R: Rng> Api<S, R> {
    pub fn with_processor(store: S, processor: Processor<R>) -> Self {
        Self { store, processor }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `GET /api/balance/:id`
    pub fn get_balance(&self, id: &str) -> ApiResponse {
        match queries::balance(&self.store, id) {
            Ok(account) => ApiResponse::ok(json!({ "id": account.id, "balance": account.balance })),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `POST /api/add`
    pub fn post_add(&mut self, body: &Value) -> ApiResponse {
        self.transact(TxType::Add, body)
    }

    /// `POST /api/subtract`
    pub fn post_subtract(&mut self, body: &Value) -> ApiResponse {
        self.transact(TxType::Subtract, body)
    }

    fn transact(&mut self, tx_type: TxType, body: &Value) -> ApiResponse {
        let result = request::decode_transaction(tx_type, body)
            .and_then(|event| self.processor.process(&self.store, event));
        match result {
            Ok(Outcome::Applied { balance }) => {
                ApiResponse::ok(json!({ "success": true, "balance": balance }))
            }
            Ok(Outcome::Created(_)) => ApiResponse::error(500, "internal error"),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `GET /api/history`
    pub fn get_history(&self) -> ApiResponse {
        ApiResponse::json(&queries::history(&self.store))
    }

    /// `GET /api/ranking`
    pub fn get_ranking(&self) -> ApiResponse {
        ApiResponse::json(&queries::ranking(&self.store))
    }

    /// `POST /api/users`. Apart from a taken id (409), every failure is
    /// reported as a generic 500.
    pub fn post_users(&mut self, body: &Value) -> ApiResponse {
        let result = request::decode_create_account(body)
            .and_then(|event| self.processor.process(&self.store, event));
        match result {
            Ok(Outcome::Created(user)) => ApiResponse::json(&json!({ "success": true, "user": user })),
            Err(err @ LedgerError::Conflict(_)) => ApiResponse::from_error(&err),
            Ok(Outcome::Applied { .. }) => ApiResponse::error(500, "failed to create user"),
            Err(err) => {
                tracing::error!(error = %err, "account creation failed");
                ApiResponse::error(500, "failed to create user")
            }
        }
    }

    /// `GET /api/dashboard-stats`
    pub fn get_dashboard_stats(&self) -> ApiResponse {
        match stats::compute(&self.store) {
            Ok(stats) => ApiResponse::json(&stats),
            Err(err) => {
                tracing::error!(error = %err, "stats computation failed");
                ApiResponse::error(500, "Failed to compute stats")
            }
        }
    }

    /// Dispatches a request by method and path. A body that is not valid
    /// JSON is handled as an empty one.
    pub fn route(&mut self, method: &str, path: &str, body: &str) -> ApiResponse {
        let path = path.split('?').next().unwrap_or_default();
        let body: Value = serde_json::from_str(body).unwrap_or(Value::Null);

        match (method.to_ascii_uppercase().as_str(), path) {
            ("GET", "/api/history") => self.get_history(),
            ("GET", "/api/ranking") => self.get_ranking(),
            ("GET", "/api/dashboard-stats") => self.get_dashboard_stats(),
            ("POST", "/api/add") => self.post_add(&body),
            ("POST", "/api/subtract") => self.post_subtract(&body),
            ("POST", "/api/users") => self.post_users(&body),
            ("GET", p) => match p.strip_prefix("/api/balance/") {
                Some(id) if !id.is_empty() && !id.contains('/') => self.get_balance(id),
                _ => ApiResponse::error(404, "not found"),
            },
            _ => ApiResponse::error(404, "not found"),
        }
    }
}
