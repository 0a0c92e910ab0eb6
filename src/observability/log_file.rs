//! Size-rotated span log.
//!
//! Lines are appended to `traces.json`. When the next line would push the
//! file past [`Rotation::max_bytes`], the file is shifted to `traces.json.1`,
//! older backups move up by one and anything past
//! [`Rotation::max_backups`] is deleted.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
#[cfg(test)]
use std::path::Path;
use std::sync::Mutex;

/// Size threshold and backup retention for the span log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    /// Rotate before the file would exceed this many bytes.
    pub max_bytes: u64,
    /// Numbered backups kept next to the live file.
    pub max_backups: usize,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

#[derive(Debug)]
struct Open {
    out: BufWriter<File>,
    len: u64,
}

/// Append-only line log with numbered backups.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    rotation: Rotation,
    open: Mutex<Option<Open>>,
}

impl LogFile {
    /// Nothing touches the disk until the first line is written.
    pub const fn new(path: PathBuf, rotation: Rotation) -> Self {
        Self {
            path,
            rotation,
            open: Mutex::new(None),
        }
    }

    #[cfg(test)]
    fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` and a newline, flushing immediately.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened, rotated or written, or when a
    /// previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut open = self
            .open
            .lock()
            .map_err(|_| io::Error::other("span log lock poisoned"))?;

        let incoming = line.len() as u64 + 1;
        if open
            .as_ref()
            .is_some_and(|o| o.len > 0 && o.len + incoming > self.rotation.max_bytes)
        {
            *open = None;
            self.shift_backups()?;
        }

        if open.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            let len = file.metadata()?.len();
            *open = Some(Open {
                out: BufWriter::new(file),
                len,
            });
        }
        let Some(current) = open.as_mut() else {
            return Err(io::Error::other("span log not open"));
        };

        writeln!(current.out, "{line}")?;
        current.out.flush()?;
        current.len += incoming;
        Ok(())
    }

    /// `traces.json` becomes `traces.json.1`, `.1` becomes `.2`, and so on.
    fn shift_backups(&self) -> io::Result<()> {
        if self.rotation.max_backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup(self.rotation.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.rotation.max_backups).rev() {
            let from = self.backup(n);
            if from.exists() {
                fs::rename(&from, self.backup(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup(1))
    }

    fn backup(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }
}
