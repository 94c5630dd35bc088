//! Persistence capability for the bankroll ledger.

use std::io;
use std::path::PathBuf;

use tracing::warn;

/// Narrow storage surface: read or write the serialized ledger record.
///
/// Implementations are best-effort. Failures are reported by return
/// value, never by panic, and the caller keeps its in-memory state
/// authoritative.
pub trait Storage {
    /// Read the stored payload, if any.
    fn read(&self) -> Option<String>;

    /// Write the payload, returning whether it was accepted.
    fn write(&mut self, payload: &str) -> bool;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    payload: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.payload.clone()
    }

    fn write(&mut self, payload: &str) -> bool {
        self.payload = Some(payload.to_string());
        true
    }
}

/// Ledger record persisted as a JSON file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Some(payload),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read ledger record");
                None
            }
        }
    }

    fn write(&mut self, payload: &str) -> bool {
        match std::fs::write(&self.path, payload) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to write ledger record");
                false
            }
        }
    }
}
