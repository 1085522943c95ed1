use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::CacheError;
use crate::faq_data::{FaqSnapshot, RawFaqRecord};
use crate::utilities::normalize_records::normalize_records;

/// Keeps the last good snapshot in a single JSON file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot next to the cache file, then renames it into place
    /// so readers never see a half-written file.
    pub fn save(&self, snapshot: &FaqSnapshot) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| self.io_error(source))?;

        let json = serde_json::to_string_pretty(snapshot)?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|source| self.io_error(source))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|source| self.io_error(source))?;
        file.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        info!(
            path = %self.path.display(),
            records = snapshot.records.len(),
            "Saved FAQ snapshot"
        );
        Ok(())
    }

    /// Returns the stored snapshot, or `None` when there is none or it cannot be read.
    ///
    /// Records are cleaned again on the way in, so a hand-edited file cannot
    /// bring back empty or duplicate rows. A file left with no records is no data.
    pub fn load(&self) -> Option<FaqSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cache file is unreadable");
                return None;
            }
        };

        let mut snapshot = match serde_json::from_str::<FaqSnapshot>(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cache file is corrupt");
                return None;
            }
        };

        let stored = snapshot.records.len();
        snapshot.records = normalize_records(snapshot.records.into_iter().map(|r| RawFaqRecord {
            category: r.category,
            question: r.question,
            answer: r.answer,
        }));

        if snapshot.records.len() != stored {
            warn!(
                path = %self.path.display(),
                stored,
                kept = snapshot.records.len(),
                "Cache file held empty or duplicate records"
            );
        }
        if snapshot.records.is_empty() {
            return None;
        }
        Some(snapshot)
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
