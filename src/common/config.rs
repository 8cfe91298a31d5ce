use std::path::PathBuf;

/// Environment variable consulted when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "CHIP_LEDGER_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `users.json`, `history.json` and `ranking.json`.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}
