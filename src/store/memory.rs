use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    io,
};

use crate::store::{Collection, LedgerStore};

/// In-memory store for tests. Holds the serialized text of each collection
/// so reads go through the same decoding path as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<Collection, String>>,
    failing_write: Cell<Option<Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts raw contents in place, bypassing serialization.
    pub fn seed(&self, collection: Collection, contents: &str) {
        self.collections
            .borrow_mut()
            .insert(collection, contents.to_string());
    }

    /// Raw contents as last written, if any.
    pub fn raw(&self, collection: Collection) -> Option<String> {
        self.collections.borrow().get(&collection).cloned()
    }

    /// Makes every later write to `collection` fail.
    pub fn fail_writes_to(&self, collection: Collection) {
        self.failing_write.set(Some(collection));
    }
}

impl LedgerStore for MemoryStore {
    fn read(&self, collection: Collection) -> io::Result<Option<String>> {
        Ok(self.raw(collection))
    }

    fn write(&self, collection: Collection, contents: &str) -> io::Result<()> {
        if self.failing_write.get() == Some(collection) {
            return Err(io::Error::other(format!("write to {collection} refused")));
        }
        self.seed(collection, contents);
        Ok(())
    }
}
