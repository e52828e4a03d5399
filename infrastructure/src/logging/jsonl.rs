//! JSONL transcript log
//!
//! One JSON object per line, one line per turn, appended with a buffered
//! writer and flushed after every record so a crash loses at most the line
//! being written. Also serves reads by scanning the file back, which is fine
//! at transcript sizes (a debate is a few dozen turns).

use async_trait::async_trait;
use cabinet_application::ports::StoreError;
use cabinet_application::ports::transcript_store::TranscriptStore;
use cabinet_domain::{BriefId, TurnRecord};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only JSONL store for transcript records
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Duplicate appends of the same
/// (brief, index) are acknowledged without writing a second line.
pub struct JsonlTranscriptLog {
    writer: Mutex<BufWriter<File>>,
    seen: Mutex<HashSet<(String, u64)>>,
    path: PathBuf,
}

impl JsonlTranscriptLog {
    /// Open (or create) the log at the given path, creating parent
    /// directories as needed. Existing lines are scanned so idempotency
    /// holds across process restarts.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            return Err(StoreError::WriteFailed(format!(
                "could not create {}: {}",
                parent.display(),
                e
            )));
        }

        let mut seen = HashSet::new();
        if path.exists() {
            for record in Self::scan(path)? {
                seen.insert((record.brief_id.as_str().to_string(), record.turn_index));
            }
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                StoreError::WriteFailed(format!("could not open {}: {}", path.display(), e))
            })?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            seen: Mutex::new(seen),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scan(path: &Path) -> Result<Vec<TurnRecord>, StoreError> {
        let file = File::open(path).map_err(|e| {
            StoreError::WriteFailed(format!("could not read {}: {}", path.display(), e))
        })?;
        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line =
                line.map_err(|e| StoreError::WriteFailed(format!("read failed: {e}")))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TurnRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable transcript line: {}", e),
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl TranscriptStore for JsonlTranscriptLog {
    async fn append(&self, turn: &TurnRecord) -> Result<(), StoreError> {
        let key = (turn.brief_id.as_str().to_string(), turn.turn_index);
        {
            let mut seen = self.seen.lock().expect("transcript lock poisoned");
            if seen.contains(&key) {
                return Ok(());
            }
            seen.insert(key);
        }

        // Stamp the line so the file is useful on its own
        let mut value =
            serde_json::to_value(turn).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        if let Value::Object(map) = &mut value {
            map.insert(
                "timestamp".to_string(),
                Value::String(
                    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                ),
            );
        }
        let line =
            serde_json::to_string(&value).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let mut writer = self.writer.lock().expect("transcript lock poisoned");
        writeln!(writer, "{line}").map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }

    async fn list(&self, brief_id: &BriefId) -> Result<Vec<TurnRecord>, StoreError> {
        // Surface anything still buffered before reading back
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
        let mut turns: Vec<TurnRecord> = Self::scan(&self.path)?
            .into_iter()
            .filter(|t| &t.brief_id == brief_id)
            .collect();
        turns.sort_by_key(|t| t.turn_index);
        Ok(turns)
    }
}

impl Drop for JsonlTranscriptLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
