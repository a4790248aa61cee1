//! # Submission Queue
//!
//! Durable, append-only list of [`PendingSubmission`] entries backed by a
//! single JSON array file. The file is the queue: moderation tooling reads
//! and rewrites it out of band, this service only appends.
//!
//! ## Append protocol
//!
//! Every append re-reads the file, pushes the new entry, serializes the
//! whole list to a uniquely named temp file in the same directory, and
//! renames it over the final path. The rename is the only persistence
//! boundary: a crash before it leaves the previous file untouched, a crash
//! after it leaves the new file fully intact. A `Mutex` linearizes writers
//! so concurrent appends cannot lose entries; readers need no lock because
//! they only ever see a pre- or post-rename file.
//!
//! Unparsable file content fails the append instead of being discarded;
//! the damaged file stays on disk for inspection.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::error::{FrasesError, Result};
use crate::model::{NewSubmission, PendingSubmission};

/// Outcome of a successful append.
#[derive(Debug, Clone, Copy)]
pub struct AppendReceipt {
    pub id: Uuid,
    pub pending: usize,
}

pub struct SubmissionQueue {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SubmissionQueue {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one validated submission and persist the updated list.
    /// Returns the assigned id and the new queue length.
    pub fn append(&self, submission: NewSubmission) -> Result<AppendReceipt> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut pending = self.entries()?;
        let entry = PendingSubmission::accept(submission);
        let id = entry.id;
        pending.push(entry);

        self.persist(&pending)?;

        Ok(AppendReceipt {
            id,
            pending: pending.len(),
        })
    }

    /// All queued entries, in append order. A missing file is an empty
    /// queue; an unparsable file is a queue error.
    pub fn entries(&self) -> Result<Vec<PendingSubmission>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FrasesError::Io(e)),
        };
        serde_json::from_str(&raw).map_err(|e| {
            FrasesError::Queue(format!(
                "{} is not a valid submission list: {}",
                self.path.display(),
                e
            ))
        })
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.entries()?.is_empty())
    }

    fn persist(&self, pending: &[PendingSubmission]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = serde_json::to_string_pretty(pending)?;

        // Atomic write: temp file in the same directory, then rename
        let tmp_path = dir.join(format!(".pending-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
