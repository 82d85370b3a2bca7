//! Flat-file persistence of analysis records.
//!
//! Each save writes a fresh JSON file named
//! `<sanitized url>_<approved|pending>_<YYYYMMDD_HHMMSS>.json` under the
//! results directory. Files are never rewritten: when two saves land on the
//! same name within one second, `_1`, `_2`... is appended before `.json`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::record::AnalysisRecord;
use crate::{AuditError, Result};

/// Default results directory, relative to the working directory.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Replaces every character that is not a word character, `-` or `.` with `_`.
pub fn sanitize_filename(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') { c } else { '_' })
        .collect()
}

/// Approval tag baked into the file name.
pub fn status_label(approved: bool) -> &'static str {
    if approved { "approved" } else { "pending" }
}

/// A directory of saved analysis records.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    dir: PathBuf,
}

impl ResultsStore {
    /// Opens the store, creating the directory (and parents) if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `record` to a new file and returns its path.
    pub fn save(&self, record: &AnalysisRecord, approved: bool) -> Result<PathBuf> {
        let stem = format!(
            "{}_{}_{}",
            sanitize_filename(&record.url),
            status_label(approved),
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let json = record.to_json_pretty()?;

        let mut attempt = 0usize;
        loop {
            let name = if attempt == 0 { format!("{}.json", stem) } else { format!("{}_{}.json", stem, attempt) };
            let path = self.dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    tracing::info!(path = %path.display(), approved, "analysis saved");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "name taken, trying next suffix");
                    attempt += 1;
                }
                Err(e) => return Err(AuditError::WriteError(e)),
            }
        }
    }

    /// Reads a saved record back.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<AnalysisRecord> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AuditError::FileNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Paths of every saved record, sorted by file name.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}
