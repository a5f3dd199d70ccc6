use crate::catalog::{slugify, CatalogStore, CustomModelInput, ModelCatalog};
use crate::error::WorkbenchError;
use crate::model::builtin_models;
use crate::scenario::{default_scenarios, PassCriteria, Scenario};
use crate::workload::WorkloadProfile;
use std::collections::HashSet;

// ========== Catalog ==========

#[test]
fn builtin_catalog_has_five_unique_models() {
    let catalog = ModelCatalog::builtin();
    assert_eq!(catalog.models().len(), 5);
    let keys: HashSet<_> = catalog.keys().into_iter().collect();
    assert_eq!(keys.len(), 5);
    assert!(keys.contains("claude_sonnet"));
}

#[test]
fn catalog_rejects_duplicate_keys() {
    let mut models = builtin_models();
    models.push(models[0].clone());
    let err = ModelCatalog::new(models).unwrap_err();
    assert!(matches!(err, WorkbenchError::DuplicateModel { .. }));
}

#[test]
fn catalog_get_unknown_is_not_found() {
    let catalog = ModelCatalog::builtin();
    let err = catalog.get("nope").unwrap_err();
    assert!(matches!(err, WorkbenchError::ModelNotFound { key } if key == "nope"));
}

#[test]
fn resolve_preserves_request_order() {
    let catalog = ModelCatalog::builtin();
    let keys = vec!["gpt_4o".to_string(), "claude_haiku".to_string()];
    let models = catalog.resolve(&keys).unwrap();
    assert_eq!(models[0].key, "gpt_4o");
    assert_eq!(models[1].key, "claude_haiku");
}

#[test]
fn resolve_fails_on_unknown_key() {
    let catalog = ModelCatalog::builtin();
    let keys = vec!["claude_opus".to_string(), "missing".to_string()];
    assert!(catalog.resolve(&keys).is_err());
}

// ========== Slugify ==========

#[test]
fn slugify_returns_safe_key() {
    assert_eq!(slugify(" My Fancy/Model "), "my_fancy_model");
}

#[test]
fn slugify_collapses_runs_of_separators() {
    assert_eq!(slugify("a  --  b"), "a_b");
}

#[test]
fn slugify_falls_back_for_empty_input() {
    assert_eq!(slugify("!!!"), "custom_model");
    assert_eq!(slugify(""), "custom_model");
}

// ========== Catalog store ==========

fn temp_store() -> (CatalogStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = CatalogStore::open(dir.path().join("user_models.json")).unwrap();
    (store, dir)
}

fn custom_input(name: &str) -> CustomModelInput {
    CustomModelInput {
        name: name.into(),
        key: String::new(),
        provider: "Acme".into(),
        input_cost_per_1k: 0.001,
        output_cost_per_1k: 0.002,
        speed_ms: 123,
        quality_score: 0.91,
        hallucination_rate: 0.03,
        context_window: 64_000,
        best_for: "internal support".into(),
        infrastructure_cost_monthly: 0.0,
        ops_cost_monthly: 0.0,
    }
}

#[test]
fn store_snapshot_defaults_to_builtins() {
    let (store, _dir) = temp_store();
    let (catalog, selected) = store.snapshot().unwrap();
    assert_eq!(catalog.models().len(), 5);
    assert_eq!(selected, ModelCatalog::builtin().keys());
}

#[test]
fn store_round_trips_custom_model_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user_models.json");

    let store = CatalogStore::open(path.clone()).unwrap();
    let key = store.add_custom(custom_input("Acme Reasoner")).unwrap();
    assert_eq!(key, "acme_reasoner");

    let reopened = CatalogStore::open(path).unwrap();
    let (catalog, selected) = reopened.snapshot().unwrap();
    assert_eq!(catalog.models().len(), 6);
    assert_eq!(catalog.get("acme_reasoner").unwrap().name, "Acme Reasoner");
    assert!(selected.contains(&"acme_reasoner".to_string()));
}

#[test]
fn add_custom_suffixes_colliding_keys() {
    let (store, _dir) = temp_store();
    let mut input = custom_input("Shadow Opus");
    input.key = "claude_opus".into();
    let key = store.add_custom(input).unwrap();
    assert_eq!(key, "claude_opus_2");

    let mut again = custom_input("Shadow Opus II");
    again.key = "claude_opus".into();
    assert_eq!(store.add_custom(again).unwrap(), "claude_opus_3");
}

#[test]
fn add_custom_rejects_empty_name() {
    let (store, _dir) = temp_store();
    let input = CustomModelInput {
        name: "   ".into(),
        ..custom_input("x")
    };
    assert!(store.add_custom(input).is_err());
}

#[test]
fn select_filters_unknown_keys() {
    let (store, _dir) = temp_store();
    let selected = store
        .select(vec!["claude_haiku".into(), "nope".into()])
        .unwrap();
    assert_eq!(selected, vec!["claude_haiku".to_string()]);
}

#[test]
fn select_empty_falls_back_to_builtins() {
    let (store, _dir) = temp_store();
    let selected = store.select(vec!["nope".into()]).unwrap();
    assert_eq!(selected, ModelCatalog::builtin().keys());
}

// ========== Workload ==========

#[test]
fn workload_default_is_valid() {
    let workload = WorkloadProfile::default();
    assert!(workload.validate().is_ok());
    assert_eq!(workload.monthly_requests(), 300_000);
}

#[test]
fn workload_rejects_zero_volume() {
    let workload = WorkloadProfile {
        requests_per_day: 0,
        ..Default::default()
    };
    assert!(matches!(
        workload.validate().unwrap_err(),
        WorkbenchError::InvalidWorkload(_)
    ));
}

#[test]
fn workload_rejects_zero_tokens() {
    let workload = WorkloadProfile {
        avg_output_tokens: 0,
        ..Default::default()
    };
    assert!(workload.validate().is_err());
}

// ========== Scenarios ==========

#[test]
fn default_scenarios_are_valid() {
    let scenarios = default_scenarios();
    assert_eq!(scenarios.len(), 3);
    for scenario in &scenarios {
        scenario.validate().unwrap();
    }
}

#[test]
fn scenario_rejects_non_positive_weight() {
    let scenario = Scenario {
        name: "bad".into(),
        input: "x".into(),
        expected: "y".into(),
        weight: 0.0,
        pass_criteria: PassCriteria::default(),
    };
    assert!(scenario.validate().is_err());
}

#[test]
fn scenario_rejects_threshold_out_of_range() {
    let scenario = Scenario {
        name: "bad".into(),
        input: "x".into(),
        expected: "y".into(),
        weight: 1.0,
        pass_criteria: PassCriteria { min_accuracy: 1.5 },
    };
    assert!(scenario.validate().is_err());
}
