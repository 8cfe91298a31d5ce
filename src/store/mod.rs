//! Whole-collection persistence.
//!
//! Every collection is read and replaced as a unit: there is no partial
//! update, no locking and no versioning. Two writers racing on the same
//! collection resolve as last-save-wins.

pub mod json_file;
pub mod memory;

use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

use crate::common::error::LedgerError;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    Transactions,
    Ranking,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Accounts,
        Collection::Transactions,
        Collection::Ranking,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Accounts => "users.json",
            Collection::Transactions => "history.json",
            Collection::Ranking => "ranking.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Accounts => "accounts",
            Collection::Transactions => "transactions",
            Collection::Ranking => "ranking",
        };
        f.write_str(name)
    }
}

/// Raw storage for the three collections.
pub trait LedgerStore {
    /// Returns `Ok(None)` when the collection has never been written.
    fn read(&self, collection: Collection) -> std::io::Result<Option<String>>;

    /// Replaces the whole collection with `contents`.
    fn write(&self, collection: Collection, contents: &str) -> std::io::Result<()>;
}

/// Loads a collection, failing on unreadable or malformed contents.
///
/// Missing and blank storage both yield an empty collection.
pub fn try_load<T, S>(store: &S, collection: Collection) -> Result<Vec<T>, LedgerError>
where
    T: DeserializeOwned,
    S: LedgerStore + ?Sized,
{
    match store.read(collection)? {
        Some(text) if !text.trim().is_empty() => Ok(serde_json::from_str(&text)?),
        _ => Ok(Vec::new()),
    }
}

/// Loads a collection, treating any failure as "no data".
///
/// This keeps a fresh or damaged data directory usable, at the price of
/// hiding corruption: the next save of the same collection overwrites it.
pub fn load<T, S>(store: &S, collection: Collection) -> Vec<T>
where
    T: DeserializeOwned,
    S: LedgerStore + ?Sized,
{
    try_load(store, collection).unwrap_or_else(|err| {
        tracing::warn!(%collection, error = %err, "unreadable collection treated as empty");
        Vec::new()
    })
}

pub fn save<T, S>(store: &S, collection: Collection, records: &[T]) -> Result<(), LedgerError>
where
    T: Serialize,
    S: LedgerStore + ?Sized,
{
    let text = serde_json::to_string_pretty(records)?;
    store.write(collection, &text)?;
    Ok(())
}
