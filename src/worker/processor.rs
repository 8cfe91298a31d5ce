use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    common::{chips::Chips, error::LedgerError, event::LedgerEvent},
    domain::account::Account,
    store::LedgerStore,
    worker::handlers::{create_account, transaction},
};

/// Result of a successfully applied event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(Account),
    Applied { balance: Chips },
}

/// Routes mutating events to their handlers. Owns the random source used for
/// account ids.
#[derive(Debug)]
pub struct Processor<R = StdRng> {
    rng: R,
}

impl Processor<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for Processor<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Processor<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn process<S: LedgerStore + ?Sized>(
        &mut self,
        store: &S,
        event: LedgerEvent,
    ) -> Result<Outcome, LedgerError> {
        match event {
            LedgerEvent::CreateAccount { id, balance } => {
                let account =
                    create_account::handle(store, &mut self.rng, id.as_deref(), balance.as_ref())?;
                Ok(Outcome::Created(account))
            }
            LedgerEvent::Transaction {
                id,
                amount,
                tx_type,
                games,
                dealer,
            } => {
                let balance =
                    transaction::handle(store, &id, amount.as_ref(), tx_type, &games, &dealer)?;
                Ok(Outcome::Applied { balance })
            }
        }
    }
}
