//! Shared data model for the model-selection workbench: model records,
//! workload profiles, scenario records, the model catalog and its
//! custom-model persistence, configuration, and the error taxonomy.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod scenario;
pub mod workload;

pub use catalog::{CatalogStore, CustomModelInput, ModelCatalog};
pub use config::WorkbenchConfig;
pub use error::{Result, WorkbenchError};
pub use model::{builtin_models, ModelProfile};
pub use scenario::{default_scenarios, PassCriteria, Scenario};
pub use workload::WorkloadProfile;

#[cfg(test)]
mod tests;
