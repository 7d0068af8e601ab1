//! Structured JSON-lines logging.
//!
//! Records are serialized one-per-line through a [`LogSink`]. The engine
//! logs through an optional [`Logger`] handle so hosts that do not care pay
//! nothing.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub type FieldMap = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "FieldMap::is_empty")]
    pub fields: FieldMap,
}

impl LogRecord {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: FieldMap::new(),
        }
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.fields.extend(fields);
        self
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Build one structured field.
pub fn field(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait LogSink: Send + Sync {
    fn write(&self, record: &LogRecord) -> LoggingResult<()>;
}

/// Cloneable logging handle with a minimum-level filter.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
            min_level: LogLevel::Trace,
        }
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn record(&self, record: LogRecord) -> LoggingResult<()> {
        if record.level < self.min_level {
            return Ok(());
        }
        self.sink.write(&record)
    }

    pub fn emit(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> LoggingResult<()> {
        self.record(LogRecord::new(level, target, message).with_fields(fields))
    }
}

/// Appends JSON lines to a file.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> LoggingResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, record: &LogRecord) -> LoggingResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut guard = self.writer.lock().expect("log writer mutex poisoned");
        guard.write_all(line.as_bytes())?;
        guard.flush()?;
        Ok(())
    }
}

/// Buffers records in memory for assertions.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|record| record.message)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) -> LoggingResult<()> {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(record.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn records_serialize_as_single_lines() {
        let record = LogRecord::new(LogLevel::Info, "gridnav::test", "hello")
            .with_fields([field("index", json!(3))]);
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"level\":\"info\""));
        assert!(line.contains("\"index\":3"));
    }

    #[test]
    fn empty_fields_are_omitted() {
        let record = LogRecord::new(LogLevel::Debug, "gridnav::test", "bare");
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains("fields"));
    }

    #[test]
    fn min_level_filters_records() {
        let sink = MemorySink::new();
        let logger = Logger::new(sink.clone()).with_min_level(LogLevel::Info);
        logger
            .emit(LogLevel::Debug, "gridnav::test", "dropped", [])
            .unwrap();
        logger
            .emit(LogLevel::Warn, "gridnav::test", "kept", [])
            .unwrap();
        assert_eq!(sink.messages(), vec!["kept".to_string()]);
    }
}
