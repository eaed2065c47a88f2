// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-session override persistence.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tap_core::SessionOverrideRecord;
use tap_error::{EngineError, ErrorCode};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

const OVERRIDE_FIELDS: [&str; 4] = [
    "toolsProfileOverride",
    "toolsAllowOverride",
    "toolsDenyOverride",
    "toolsPromptListingOverride",
];

/// File-based store for per-session tool overrides.
///
/// Holds one `tokio::sync::Mutex` per session key behind a
/// `tokio::sync::RwLock` guarding the key map itself, so updates to
/// different sessions proceed in parallel while updates to the same
/// session serialize.
pub struct SessionStore {
    root: PathBuf,
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: RwLock::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, session_key: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(session_key) {
            return lock.clone();
        }
        let mut locks = self.locks.write().await;
        locks
            .entry(session_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn record_path(&self, session_key: &str) -> PathBuf {
        self.root.join(format!("{}.json", session_key_digest(session_key)))
    }

    fn load_raw(
        &self,
        session_key: &str,
    ) -> Result<serde_json::Map<String, serde_json::Value>, EngineError> {
        let path = self.record_path(session_key);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
                    EngineError::new(
                        ErrorCode::StoreCorrupt,
                        "session override record is not valid JSON",
                    )
                    .with_source(e)
                })?;
                match value {
                    serde_json::Value::Object(map) => Ok(map),
                    _ => Err(EngineError::new(
                        ErrorCode::StoreCorrupt,
                        "session override record is not a JSON object",
                    )),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(serde_json::Map::new()),
            Err(e) => Err(EngineError::new(
                ErrorCode::StorePersistFailed,
                "failed to read session override record",
            )
            .with_source(e)),
        }
    }

    fn write_raw(
        &self,
        session_key: &str,
        raw: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), EngineError> {
        let path = self.record_path(session_key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EngineError::new(
                    ErrorCode::StorePersistFailed,
                    "failed to create session override store directory",
                )
                .with_source(e)
            })?;
        }
        let json = serde_json::to_string_pretty(raw).map_err(|e| {
            EngineError::new(
                ErrorCode::StorePersistFailed,
                "failed to serialize session override record",
            )
            .with_source(e)
        })?;
        std::fs::write(&path, json).map_err(|e| {
            EngineError::new(
                ErrorCode::StorePersistFailed,
                "failed to write session override record",
            )
            .with_source(e)
        })
    }

    /// Apply `mutator` to the session's current record and persist the
    /// result atomically. The mutator runs against a freshly-read value
    /// while the per-session lock is held.
    ///
    /// # Errors
    /// Returns `SessionNotFound` if `session_key` is empty, or a storage
    /// error if the record cannot be read or written. No partial state is
    /// written on failure.
    pub async fn update(
        &self,
        session_key: &str,
        mutator: impl FnOnce(&mut SessionOverrideRecord) + Send,
    ) -> Result<SessionOverrideRecord, EngineError> {
        if session_key.trim().is_empty() {
            return Err(EngineError::new(ErrorCode::SessionNotFound, "no active session"));
        }
        let lock = self.lock_for(session_key).await;
        let _guard = lock.lock().await;
        let prefix = log_prefix(session_key);

        let mut raw = self.load_raw(session_key)?;
        let mut record = record_from_raw(&raw)?;
        mutator(&mut record);
        merge_record_into_raw(&mut raw, &record);

        match self.write_raw(session_key, &raw) {
            Ok(()) => {
                info!(session_key_prefix = %prefix, "session override record updated");
                Ok(record)
            }
            Err(err) => {
                error!(session_key_prefix = %prefix, error = ?err, "failed to persist session override record");
                Err(err)
            }
        }
    }

    /// Clear all four override fields for a session.
    ///
    /// Returns whether any were previously set.
    ///
    /// # Errors
    /// Returns `SessionNotFound` if `session_key` is empty, or a storage
    /// error if the record cannot be read or written.
    pub async fn reset(&self, session_key: &str) -> Result<bool, EngineError> {
        if session_key.trim().is_empty() {
            return Err(EngineError::new(ErrorCode::SessionNotFound, "no active session"));
        }
        let lock = self.lock_for(session_key).await;
        let _guard = lock.lock().await;
        let prefix = log_prefix(session_key);

        let mut raw = self.load_raw(session_key)?;
        let had_overrides = record_from_raw(&raw)?.has_overrides();
        merge_record_into_raw(&mut raw, &SessionOverrideRecord::default());

        match self.write_raw(session_key, &raw) {
            Ok(()) => {
                info!(session_key_prefix = %prefix, had_overrides, "session overrides reset");
                Ok(had_overrides)
            }
            Err(err) => {
                error!(session_key_prefix = %prefix, error = ?err, "failed to persist session override reset");
                Err(err)
            }
        }
    }

    /// Read the current record for a session without mutating it. Absent
    /// records read back as `SessionOverrideRecord::default()`.
    ///
    /// # Errors
    /// Returns a storage error if the record exists but cannot be parsed.
    pub fn read(&self, session_key: &str) -> Result<SessionOverrideRecord, EngineError> {
        let raw = self.load_raw(session_key)?;
        record_from_raw(&raw)
    }
}

fn session_key_digest(session_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(session_key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// First 8 hex characters of the session key's digest, safe to log.
fn log_prefix(session_key: &str) -> String {
    session_key_digest(session_key)[..8].to_string()
}

fn record_from_raw(
    raw: &serde_json::Map<String, serde_json::Value>,
) -> Result<SessionOverrideRecord, EngineError> {
    serde_json::from_value(serde_json::Value::Object(raw.clone())).map_err(|e| {
        EngineError::new(
            ErrorCode::StoreCorrupt,
            "session override record has invalid field shapes",
        )
        .with_source(e)
    })
}

/// Write `record`'s four known fields into `raw`, removing a key entirely
/// when its field is absent rather than writing `null`, and leaving any
/// other key in `raw` untouched.
fn merge_record_into_raw(
    raw: &mut serde_json::Map<String, serde_json::Value>,
    record: &SessionOverrideRecord,
) {
    let patch = serde_json::to_value(record).expect("SessionOverrideRecord always serializes");
    let serde_json::Value::Object(patch_map) = patch else {
        unreachable!("SessionOverrideRecord serializes to a JSON object")
    };
    for key in OVERRIDE_FIELDS {
        match patch_map.get(key) {
            Some(v) => {
                raw.insert(key.to_string(), v.clone());
            }
            None => {
                raw.remove(key);
            }
        }
    }
}
