//! Append-only session log.
//!
//! The log is a CSV table with a fixed header
//! (`timestamp,T_arith,E_arith,RT,...`). Rows are only ever appended; existing
//! rows are never rewritten or repaired. [`SessionStore`] is the seam the
//! evaluator reads through, so tests can swap in [`MemorySessionLog`].

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::{Result, StorageError, ValidationError};
use crate::session::{iso_timestamp, HistorySet, SessionRecord};

/// Storage backend for session records.
pub trait SessionStore {
    /// Append one record, creating the table if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the record is invalid, more than
    /// [`CLOCK_SHIFT_TOLERANCE_MINUTES`] older than the last stored session,
    /// or the write fails.
    fn append(&mut self, record: &SessionRecord) -> Result<()>;

    /// Load every stored record in order, or `None` if no table exists yet.
    ///
    /// # Errors
    /// Returns an error if the table exists but cannot be read or parsed.
    fn load_all(&self) -> Result<Option<HistorySet>>;
}

/// How far (in minutes) a record may predate the last one, for a wall clock
/// set back by a daylight-saving change.
pub const CLOCK_SHIFT_TOLERANCE_MINUTES: i64 = 60;

fn check_append(record: &SessionRecord, last: Option<NaiveDateTime>) -> Result<()> {
    record.validate()?;
    if let Some(last) = last {
        if record.timestamp + Duration::minutes(CLOCK_SHIFT_TOLERANCE_MINUTES) < last {
            return Err(ValidationError::OutOfOrder {
                timestamp: record.timestamp,
                last,
            }
            .into());
        }
    }
    Ok(())
}

/// CSV-backed session log at an explicit path.
#[derive(Debug, Clone)]
pub struct CsvSessionLog {
    path: PathBuf,
}

impl CsvSessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// The last `n` sessions, or `None` if the log does not exist.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read.
    pub fn tail(&self, n: usize) -> Result<Option<Vec<SessionRecord>>> {
        Ok(self.load_all()?.map(|history| history.tail(n).to_vec()))
    }

    /// Delete the log file. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session log cleared");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::RemoveFailed {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    fn open_failed(&self, source: std::io::Error) -> StorageError {
        StorageError::OpenFailed {
            path: self.path.clone(),
            source,
        }
    }

    fn write_failed(&self, message: impl ToString) -> StorageError {
        StorageError::WriteFailed {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    /// Timestamp of the last row, read without parsing the rows before it.
    ///
    /// A last row whose timestamp cannot be read is skipped with a warning;
    /// earlier malformed rows are left for [`SessionStore::load_all`] to report.
    fn last_timestamp(&self) -> Result<Option<NaiveDateTime>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.open_failed(source).into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(file);
        let headers = reader.headers().map_err(|e| self.malformed(0, e))?;
        if headers.is_empty() {
            return Ok(None);
        }
        let Some(column) = headers.iter().position(|name| name == "timestamp") else {
            return Err(self.malformed(0, "missing timestamp column").into());
        };

        let mut last = None;
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| self.malformed(index as u64 + 1, e))?;
            last = Some((index, row));
        }

        let Some((index, row)) = last else {
            return Ok(None);
        };
        match row.get(column).map(iso_timestamp::parse) {
            Some(Ok(timestamp)) => Ok(Some(timestamp)),
            _ => {
                warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    "last session has no readable timestamp, skipping order check"
                );
                Ok(None)
            }
        }
    }

    fn malformed(&self, line: u64, message: impl ToString) -> StorageError {
        StorageError::MalformedRow {
            path: self.path.clone(),
            line,
            message: message.to_string(),
        }
    }

    fn needs_header(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(source) => Err(self.open_failed(source).into()),
        }
    }
}

impl SessionStore for CsvSessionLog {
    fn append(&mut self, record: &SessionRecord) -> Result<()> {
        check_append(record, self.last_timestamp()?)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.open_failed(e))?;
            }
        }

        let needs_header = self.needs_header()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.open_failed(e))?;

        // The row is buffered and flushed once so a failed write never leaves
        // half a record behind the header.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| self.write_failed(e))?;
        writer.flush().map_err(|e| self.write_failed(e))?;

        debug!(
            path = %self.path.display(),
            timestamp = %record.timestamp,
            header = needs_header,
            "session appended"
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Option<HistorySet>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "session log not found");
                return Ok(None);
            }
            Err(source) => return Err(self.open_failed(source).into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<SessionRecord>().enumerate() {
            let record = row.map_err(|e| self.malformed(index as u64 + 1, e))?;
            records.push(record);
        }

        debug!(path = %self.path.display(), sessions = records.len(), "session log loaded");
        Ok(Some(HistorySet::new(records)))
    }
}

/// In-memory session log. `None` until the first append, like a missing file.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionLog {
    records: Option<Vec<SessionRecord>>,
}

impl MemorySessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that already holds `records`, bypassing validation.
    pub fn with_records(records: Vec<SessionRecord>) -> Self {
        Self {
            records: Some(records),
        }
    }
}

impl SessionStore for MemorySessionLog {
    fn append(&mut self, record: &SessionRecord) -> Result<()> {
        let records = self.records.get_or_insert_with(Vec::new);
        check_append(record, records.last().map(|r| r.timestamp))?;
        records.push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Option<HistorySet>> {
        Ok(self.records.clone().map(HistorySet::new))
    }
}
