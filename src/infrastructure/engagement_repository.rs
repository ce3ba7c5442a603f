use crate::domain::models::EngagementRecord;
use crate::infrastructure::error::InfraError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

const STORAGE_FILE: &str = "engagements.json";
const STORAGE_LOG: &str = "storage.log";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_record_id() -> String {
    let sequence = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("eng-{}-{sequence}", Utc::now().timestamp_micros())
}

/// Ordered collection of finalized engagement records. Insertion order is
/// display order; `delete_at` positions come from a freshly listed sequence.
pub trait EngagementRecordRepository: Send + Sync {
    fn list(&self) -> Result<Vec<EngagementRecord>, InfraError>;
    fn append(&self, record: &EngagementRecord) -> Result<(), InfraError>;
    fn delete_at(&self, position: usize) -> Result<(), InfraError>;
    fn clear(&self) -> Result<(), InfraError>;
}

/// Lenient read-side shape: records written by older writers may lack `id`
/// or `createdAt`; both are backfilled at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(default)]
    id: Option<String>,
    owner: String,
    speaker: String,
    caterer: String,
    cohost: String,
    #[serde(default)]
    primary: Option<DateTime<Utc>>,
    #[serde(default)]
    secondary: Option<DateTime<Utc>>,
    #[serde(default)]
    tertiary: Option<DateTime<Utc>>,
    timezone: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Stores the whole collection as one pretty-printed JSON entry under the
/// state directory. Unreadable or wrong-shaped contents degrade to an empty
/// collection with a line in the storage log; they are never surfaced as an
/// error to the caller.
#[derive(Debug)]
pub struct JsonFileEngagementRepository {
    storage_path: PathBuf,
    logs_dir: PathBuf,
    log_guard: Mutex<()>,
}

impl JsonFileEngagementRepository {
    pub fn new(state_dir: impl AsRef<Path>, logs_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_path: state_dir.as_ref().join(STORAGE_FILE),
            logs_dir: logs_dir.as_ref().to_path_buf(),
            log_guard: Mutex::new(()),
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn load(&self) -> Result<Vec<EngagementRecord>, InfraError> {
        let raw = match fs::read_to_string(&self.storage_path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                self.log_error("list", &format!("unparsable storage entry: {error}"));
                return Ok(Vec::new());
            }
        };

        let stored: Vec<StoredRecord> = match value {
            Value::Array(_) => match serde_json::from_value(value) {
                Ok(records) => records,
                Err(error) => {
                    self.log_error("list", &format!("malformed record collection: {error}"));
                    return Ok(Vec::new());
                }
            },
            // Older writers persisted a single record object.
            Value::Object(_) => match serde_json::from_value::<StoredRecord>(value) {
                Ok(record) => vec![record],
                Err(error) => {
                    self.log_error("list", &format!("malformed record object: {error}"));
                    return Ok(Vec::new());
                }
            },
            other => {
                self.log_error(
                    "list",
                    &format!("unexpected storage shape: {}", shape_name(&other)),
                );
                return Ok(Vec::new());
            }
        };

        let mut needs_rewrite = false;
        let records: Vec<EngagementRecord> = stored
            .into_iter()
            .map(|record| {
                if record.id.is_none() || record.created_at.is_none() {
                    needs_rewrite = true;
                }
                EngagementRecord {
                    id: record.id.unwrap_or_else(next_record_id),
                    owner: record.owner,
                    speaker: record.speaker,
                    caterer: record.caterer,
                    cohost: record.cohost,
                    primary: record.primary,
                    secondary: record.secondary,
                    tertiary: record.tertiary,
                    timezone: record.timezone,
                    created_at: record.created_at.unwrap_or_else(Utc::now),
                }
            })
            .collect();

        if needs_rewrite {
            self.persist(&records)?;
        }
        Ok(records)
    }

    fn persist(&self, records: &[EngagementRecord]) -> Result<(), InfraError> {
        let formatted = serde_json::to_string_pretty(records)?;
        fs::write(&self.storage_path, format!("{formatted}\n"))?;
        Ok(())
    }

    fn log_error(&self, operation: &str, message: &str) {
        let Ok(_guard) = self.log_guard.lock() else {
            return;
        };
        let path = self.logs_dir.join(STORAGE_LOG);
        let payload = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": "error",
            "operation": operation,
            "message": message,
        });

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{payload}");
        }
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl EngagementRecordRepository for JsonFileEngagementRepository {
    fn list(&self) -> Result<Vec<EngagementRecord>, InfraError> {
        self.load()
    }

    fn append(&self, record: &EngagementRecord) -> Result<(), InfraError> {
        let mut records = self.load()?;
        records.push(record.clone());
        self.persist(&records)
    }

    fn delete_at(&self, position: usize) -> Result<(), InfraError> {
        let mut records = self.load()?;
        if position >= records.len() {
            return Ok(());
        }
        records.remove(position);
        self.persist(&records)
    }

    fn clear(&self) -> Result<(), InfraError> {
        match fs::remove_file(&self.storage_path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEngagementRepository {
    records: Mutex<Vec<EngagementRecord>>,
}

impl InMemoryEngagementRepository {
    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Vec<EngagementRecord>>, InfraError> {
        self.records
            .lock()
            .map_err(|error| InfraError::InvalidConfig(format!("record lock poisoned: {error}")))
    }
}

impl EngagementRecordRepository for InMemoryEngagementRepository {
    fn list(&self) -> Result<Vec<EngagementRecord>, InfraError> {
        Ok(self.locked()?.clone())
    }

    fn append(&self, record: &EngagementRecord) -> Result<(), InfraError> {
        self.locked()?.push(record.clone());
        Ok(())
    }

    fn delete_at(&self, position: usize) -> Result<(), InfraError> {
        let mut records = self.locked()?;
        if position < records.len() {
            records.remove(position);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), InfraError> {
        self.locked()?.clear();
        Ok(())
    }
}
