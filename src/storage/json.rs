//! History kept in a single JSON document.
//!
//! ```json
//! { "version": 1, "calculations": [ { "expression": "2+3×4", "result": "14", "created_at": 1760688000 } ] }
//! ```
//!
//! The document is read once when the storage opens and rewritten after each
//! change through a sibling `.tmp` file and a rename, so the file on disk is
//! always either the old or the new history.

use crate::domain::error::{CalcError, Result};
use crate::storage::backend::Storage;
use crate::storage::models::CalculationRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Records kept when no explicit limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    /// Oldest first.
    #[serde(default)]
    calculations: Vec<CalculationRecord>,
}

/// JSON file storage backend.
///
/// Owned by the runtime that executes history effects. A write that fails
/// leaves the storage dirty and is retried on the next change or on drop.
#[derive(Debug)]
pub struct JsonStorage {
    file_path: PathBuf,
    document: Document,
    limit: usize,
    dirty: bool,
}

impl JsonStorage {
    /// Opens `file_path` with [`DEFAULT_HISTORY_LIMIT`].
    ///
    /// # Errors
    ///
    /// See [`JsonStorage::with_limit`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rpncalc::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/history.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        Self::with_limit(file_path, DEFAULT_HISTORY_LIMIT)
    }

    /// Opens `file_path`, keeping at most `limit` records (zero counts as
    /// one). A missing file is an empty history; parent directories are
    /// created.
    ///
    /// # Errors
    ///
    /// [`CalcError::Io`] when the directory or file cannot be accessed,
    /// [`CalcError::Storage`] when the file is not a history document.
    pub fn with_limit(file_path: PathBuf, limit: usize) -> Result<Self> {
        let _span = tracing::debug_span!("json_open", path = %file_path.display(), limit).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let document = read_document(&file_path)?;
        tracing::debug!(
            version = document.version,
            count = document.calculations.len(),
            "history opened"
        );

        Ok(Self {
            file_path,
            document,
            limit: limit.max(1),
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Marks the document changed and writes it out.
    fn commit(&mut self) -> Result<()> {
        self.dirty = true;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let tmp_path = self.file_path.with_extension("tmp");
        write_document(&tmp_path, &self.document)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(count = self.document.calculations.len(), "history written");
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Document> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(Document {
                version: FORMAT_VERSION,
                calculations: Vec::new(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CalcError::Storage(format!("{} is not a history file: {e}", path.display())))
}

fn write_document(path: &Path, document: &Document) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, document)
        .map_err(|e| CalcError::Storage(format!("failed to encode history: {e}")))?;
    out.flush()?;
    Ok(())
}

impl Storage for JsonStorage {
    fn save_calculation(&mut self, record: &CalculationRecord) -> Result<usize> {
        let _span = tracing::debug_span!("json_save_calculation", expression = %record.expression).entered();

        let calculations = &mut self.document.calculations;
        calculations.push(record.clone());
        let excess = calculations.len().saturating_sub(self.limit);
        calculations.drain(..excess);

        self.commit()?;
        Ok(self.document.calculations.len())
    }

    fn load_calculations(&self) -> Result<Vec<CalculationRecord>> {
        Ok(self.document.calculations.clone())
    }

    fn delete_calculation(&mut self, index: usize) -> Result<CalculationRecord> {
        let _span = tracing::debug_span!("json_delete_calculation", index).entered();

        if index >= self.document.calculations.len() {
            return Err(CalcError::Storage(format!("no calculation at index {index}")));
        }
        let removed = self.document.calculations.remove(index);
        self.commit()?;
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear").entered();

        self.document.calculations.clear();
        self.commit()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::error!(error = %e, "history lost on close");
        }
    }
}
