use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Directory created under the per-user data directory
pub const APP_DIR_NAME: &str = "PasteNotes";

/// History file name inside `APP_DIR_NAME`
pub const DATA_FILE_NAME: &str = "pastenotes.json";

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub poll_interval: Duration,
    pub debounce: Duration,
}

impl Settings {
    pub fn new(data_file: Option<PathBuf>, poll_interval_ms: u64, debounce_ms: u64) -> Result<Self> {
        let data_file = match data_file {
            Some(path) => path,
            None => default_data_file()?,
        };
        Ok(Self {
            data_file,
            poll_interval: Duration::from_millis(poll_interval_ms.max(1)),
            debounce: Duration::from_millis(debounce_ms),
        })
    }
}

/// `<data dir>/PasteNotes/pastenotes.json`; on macOS the data dir is
/// `~/Library/Application Support`
pub fn default_data_file() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or(Error::NoDataDir)?;
    Ok(data_file_in(&base))
}

pub fn data_file_in(base: &Path) -> PathBuf {
    base.join(APP_DIR_NAME).join(DATA_FILE_NAME)
}
