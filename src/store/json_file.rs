use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::store::{Collection, LedgerStore};

/// Keeps each collection as a pretty-printed JSON array in `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }
}

impl LedgerStore for JsonFileStore {
    fn read(&self, collection: Collection) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_of(collection)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, collection: Collection, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_of(collection), contents)
    }
}
