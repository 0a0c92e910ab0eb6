//! Storage backend abstraction.
//!
//! The [`Storage`] trait is the save/load hook pair the calculator exposes to
//! its persistence collaborator. The engine never calls it directly; it emits
//! [`Effect::SaveCalculation`](crate::app::Effect::SaveCalculation) and the
//! runtime forwards the record here.

use crate::domain::error::Result;
use crate::storage::models::CalculationRecord;

/// Abstraction over persistent history backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use rpncalc::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/rpncalc-history.json"))?;
/// let history = storage.load_calculations()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Appends a finished calculation.
    ///
    /// Returns the number of stored records afterwards. Backends with a
    /// retention limit drop the oldest records first.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    fn save_calculation(&mut self, record: &CalculationRecord) -> Result<usize>;

    /// Returns every stored calculation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn load_calculations(&self) -> Result<Vec<CalculationRecord>>;

    /// Removes the record at `index` (oldest is 0).
    ///
    /// # Errors
    ///
    /// Returns an error if no record exists at `index` or the write fails.
    fn delete_calculation(&mut self, index: usize) -> Result<CalculationRecord>;

    /// Removes all records.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&mut self) -> Result<()>;
}
