use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::note::Note;

/// Durable copy of the clipboard history
pub trait NoteRepository {
    /// Read the stored notes. A missing file is an empty history.
    fn load(&self) -> Result<Vec<Note>>;

    /// Overwrite the stored notes with `notes`
    fn save(&self, notes: &[Note]) -> Result<()>;
}

/// Stores the whole history as one JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Note>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let data = serde_json::to_vec(notes)?;
        fs::write(&self.path, data).map_err(|e| Error::io(&self.path, e))
    }
}

/// Load notes, treating any failure as an empty history
pub fn load_or_empty(repository: &impl NoteRepository) -> Vec<Note> {
    match repository.load() {
        Ok(notes) => {
            tracing::info!(count = notes.len(), "loaded clipboard history");
            notes
        }
        Err(e) => {
            tracing::warn!("could not load clipboard history, starting empty: {}", e);
            Vec::new()
        }
    }
}
