//! Bounded, append-only JSON history log.
//!
//! The log is a single pretty-printed JSON array of [`CanonicalQuote`]
//! values, oldest first. It is reloaded at the start of every run and
//! rewritten wholesale at the end, keeping at most `capacity` entries.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::{CanonicalQuote, HistoryError};

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// File-backed sliding window of the most recent quotes.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<CanonicalQuote>,
}

impl HistoryStore {
    /// Creates an empty store bound to `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: DEFAULT_HISTORY_CAPACITY,
            entries: Vec::new(),
        }
    }

    /// Sets the window size; zero is raised to one.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[CanonicalQuote] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strictly reads a history file.
    pub fn read(path: &Path) -> Result<Vec<CanonicalQuote>, HistoryError> {
        let raw = fs::read_to_string(path).map_err(|e| HistoryError::io(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replaces the in-memory log with the persisted one.
    ///
    /// A missing or unreadable file yields an empty log; this never fails.
    pub fn load(&mut self) -> &[CanonicalQuote] {
        self.entries = match Self::read(&self.path) {
            Ok(entries) => {
                debug!(path = %self.path.display(), entries = entries.len(), "history loaded");
                entries
            }
            Err(HistoryError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file yet");
                Vec::new()
            }
            Err(error) => {
                warn!(path = %self.path.display(), error = %error, "history unreadable, starting empty");
                Vec::new()
            }
        };
        &self.entries
    }

    pub fn append(&mut self, quote: CanonicalQuote) {
        self.entries.push(quote);
    }

    /// Drops the oldest entries beyond capacity.
    pub fn trim(&mut self) {
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
    }

    /// Appends then trims.
    pub fn record(&mut self, quote: CanonicalQuote) {
        self.append(quote);
        self.trim();
    }

    /// Atomically replaces the history file with the in-memory log.
    ///
    /// The JSON is written to a temporary file next to the destination and
    /// renamed over it, so a failed write leaves the previous file intact.
    /// Permissions of an existing file are carried over to the new one.
    pub fn save(&self) -> Result<(), HistoryError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&directory).map_err(|e| HistoryError::io(&directory, e))?;

        let mut body = serde_json::to_vec_pretty(&self.entries)?;
        body.push(b'\n');

        let mut file = NamedTempFile::new_in(&directory).map_err(|e| HistoryError::io(&directory, e))?;
        file.write_all(&body)
            .and_then(|()| file.flush())
            .map_err(|e| HistoryError::io(file.path(), e))?;

        // The temporary file starts owner-only; an existing log keeps its mode.
        match fs::metadata(&self.path) {
            Ok(existing) => file
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| HistoryError::io(file.path(), e))?,
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => return Err(HistoryError::io(&self.path, error)),
        }

        file.persist(&self.path).map_err(|e| HistoryError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "history saved");
        Ok(())
    }
}
