//! Rollout history: append-only record of canary outcomes, persisted to a
//! JSON file. Recording happens in the HTTP handler; the simulator itself
//! stays stateless.

use chrono::{DateTime, Utc};
use mh_core::{Result, WorkbenchError};
use mh_engine::RolloutOutcome;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloutRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub current_model: String,
    pub new_model: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at_phase: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    entries: Vec<RolloutRecord>,
}

pub struct RolloutHistory {
    path: PathBuf,
    inner: RwLock<HistoryFile>,
}

impl RolloutHistory {
    /// Open the history, loading any existing file at `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| WorkbenchError::Store(e.to_string()))?;
            if raw.trim().is_empty() {
                HistoryFile::default()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HistoryFile::default()
        };
        Ok(Self {
            path,
            inner: RwLock::new(file),
        })
    }

    /// Record one canary outcome and persist.
    pub fn append(
        &self,
        current_model: &str,
        new_model: &str,
        outcome: &RolloutOutcome,
    ) -> Result<RolloutRecord> {
        let record = RolloutRecord {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            current_model: current_model.into(),
            new_model: new_model.into(),
            status: outcome.status().into(),
            failed_at_phase: outcome.failed_at_phase().map(str::to_string),
        };
        let mut file = self.inner.write().unwrap();
        file.entries.push(record.clone());
        self.persist(&file)?;
        Ok(record)
    }

    pub fn entries(&self) -> Vec<RolloutRecord> {
        self.inner.read().unwrap().entries.clone()
    }

    pub fn find(&self, id: Uuid) -> Option<RolloutRecord> {
        self.inner
            .read()
            .unwrap()
            .entries
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    fn persist(&self, file: &HistoryFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WorkbenchError::Store(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.path, raw).map_err(|e| WorkbenchError::Store(e.to_string()))?;
        Ok(())
    }
}
