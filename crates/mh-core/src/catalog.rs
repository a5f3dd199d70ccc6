//! Model catalog: built-in profiles merged with user-added custom models,
//! persisted to a JSON file alongside the active selection.

use crate::error::{Result, WorkbenchError};
use crate::model::{builtin_models, ModelProfile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// Read-only, order-preserving view of model records. The engine consumes
/// this per request and never mutates it.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelProfile>,
}

impl ModelCatalog {
    /// Build a catalog, enforcing key uniqueness.
    pub fn new(models: Vec<ModelProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.key.clone()) {
                return Err(WorkbenchError::DuplicateModel {
                    key: model.key.clone(),
                });
            }
        }
        Ok(Self { models })
    }

    /// Catalog of the built-in rate card only.
    pub fn builtin() -> Self {
        Self {
            models: builtin_models(),
        }
    }

    pub fn models(&self) -> &[ModelProfile] {
        &self.models
    }

    pub fn keys(&self) -> Vec<String> {
        self.models.iter().map(|m| m.key.clone()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.iter().any(|m| m.key == key)
    }

    pub fn get(&self, key: &str) -> Result<&ModelProfile> {
        self.models
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| WorkbenchError::ModelNotFound { key: key.into() })
    }

    /// Resolve a list of keys to profiles, preserving request order.
    pub fn resolve(&self, keys: &[String]) -> Result<Vec<ModelProfile>> {
        keys.iter()
            .map(|key| self.get(key).cloned())
            .collect()
    }
}

/// Payload for adding a custom model. Absent numeric fields fall back to
/// mid-range defaults so a sparse form still yields a usable profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomModelInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub input_cost_per_1k: f64,
    #[serde(default)]
    pub output_cost_per_1k: f64,
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u32,
    #[serde(default = "default_quality_score")]
    pub quality_score: f64,
    #[serde(default = "default_hallucination_rate")]
    pub hallucination_rate: f64,
    #[serde(default = "default_context_window")]
    pub context_window: u32,
    #[serde(default = "default_best_for")]
    pub best_for: String,
    #[serde(default)]
    pub infrastructure_cost_monthly: f64,
    #[serde(default)]
    pub ops_cost_monthly: f64,
}

fn default_provider() -> String {
    "Custom".into()
}

fn default_speed_ms() -> u32 {
    500
}

fn default_quality_score() -> f64 {
    0.8
}

fn default_hallucination_rate() -> f64 {
    0.05
}

fn default_context_window() -> u32 {
    16_000
}

fn default_best_for() -> String {
    "Custom use case".into()
}

/// Lower-case a display name into a stable catalog key.
pub fn slugify(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else {
            out.push('_');
        }
    }
    while out.contains("__") {
        out = out.replace("__", "_");
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() {
        "custom_model".into()
    } else {
        out
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    custom_models: BTreeMap<String, ModelProfile>,
    #[serde(default)]
    selected_models: Vec<String>,
}

/// File-backed store for custom models and the active selection. The
/// built-in profiles are merged in on every snapshot; the file holds only
/// user additions.
pub struct CatalogStore {
    path: PathBuf,
    inner: RwLock<StoreFile>,
}

impl CatalogStore {
    /// Open the store, loading any existing file at `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| WorkbenchError::Store(e.to_string()))?;
            if raw.trim().is_empty() {
                StoreFile::default()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            StoreFile::default()
        };
        Ok(Self {
            path,
            inner: RwLock::new(file),
        })
    }

    /// Merged catalog plus the active selection. Selection entries that no
    /// longer resolve are dropped; an empty selection falls back to the
    /// built-in keys.
    pub fn snapshot(&self) -> Result<(ModelCatalog, Vec<String>)> {
        let file = self.inner.read().unwrap();
        let mut models = builtin_models();
        models.extend(file.custom_models.values().cloned());
        let catalog = ModelCatalog::new(models)?;
        let mut selected: Vec<String> = file
            .selected_models
            .iter()
            .filter(|key| catalog.contains(key))
            .cloned()
            .collect();
        if selected.is_empty() {
            selected = ModelCatalog::builtin().keys();
        }
        Ok((catalog, selected))
    }

    /// Add a custom model, slugifying its key and suffixing on collision.
    /// The new model joins the active selection. Returns the assigned key.
    pub fn add_custom(&self, input: CustomModelInput) -> Result<String> {
        if input.name.trim().is_empty() {
            return Err(WorkbenchError::InvalidRequirement(
                "model name is required".into(),
            ));
        }
        let mut file = self.inner.write().unwrap();
        let base_key = if input.key.trim().is_empty() {
            slugify(&input.name)
        } else {
            slugify(&input.key)
        };
        let builtin_keys: HashSet<String> = ModelCatalog::builtin().keys().into_iter().collect();
        let mut key = base_key.clone();
        let mut suffix = 2;
        while builtin_keys.contains(&key) || file.custom_models.contains_key(&key) {
            key = format!("{base_key}_{suffix}");
            suffix += 1;
        }

        let profile = ModelProfile {
            key: key.clone(),
            name: input.name.trim().to_string(),
            provider: input.provider,
            input_cost_per_1k: input.input_cost_per_1k,
            output_cost_per_1k: input.output_cost_per_1k,
            speed_ms: input.speed_ms,
            quality_score: input.quality_score,
            hallucination_rate: input.hallucination_rate,
            context_window: input.context_window,
            best_for: input.best_for,
            infrastructure_cost_monthly: input.infrastructure_cost_monthly,
            ops_cost_monthly: input.ops_cost_monthly,
        };
        file.custom_models.insert(key.clone(), profile);

        if file.selected_models.is_empty() {
            file.selected_models = ModelCatalog::builtin().keys();
        }
        if !file.selected_models.iter().any(|k| k == &key) {
            file.selected_models.push(key.clone());
        }
        self.persist(&file)?;
        Ok(key)
    }

    /// Replace the active selection, keeping only keys that resolve. An
    /// empty result falls back to the built-in keys.
    pub fn select(&self, requested: Vec<String>) -> Result<Vec<String>> {
        let mut file = self.inner.write().unwrap();
        let known: HashSet<String> = {
            let mut keys: HashSet<String> = ModelCatalog::builtin().keys().into_iter().collect();
            keys.extend(file.custom_models.keys().cloned());
            keys
        };
        let mut selected: Vec<String> = requested
            .into_iter()
            .filter(|key| known.contains(key))
            .collect();
        if selected.is_empty() {
            selected = ModelCatalog::builtin().keys();
        }
        file.selected_models = selected.clone();
        self.persist(&file)?;
        Ok(selected)
    }

    fn persist(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WorkbenchError::Store(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.path, raw).map_err(|e| WorkbenchError::Store(e.to_string()))?;
        debug!(path = %self.path.display(), "catalog store persisted");
        Ok(())
    }
}
