use crate::app;
use crate::history::RolloutHistory;
use crate::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mh_core::CatalogStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_state() -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = CatalogStore::open(dir.path().join("user_models.json")).unwrap();
    let history = RolloutHistory::open(dir.path().join("rollout_history.json")).unwrap();
    (
        AppState {
            store: Arc::new(store),
            history: Arc::new(history),
        },
        dir,
    )
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let response = app(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ========== Catalog ==========

#[tokio::test]
async fn get_models_returns_builtin_catalog() {
    let (state, _dir) = test_state();
    let (status, body) = get(&state, "/api/models").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"].as_array().unwrap().len(), 5);
    assert_eq!(body["selected_models"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn custom_model_is_added_and_selected() {
    let (state, _dir) = test_state();
    let (status, body) = post(
        &state,
        "/api/models/custom",
        json!({
            "name": "Acme Reasoner",
            "provider": "Acme",
            "input_cost_per_1k": 0.001,
            "output_cost_per_1k": 0.002,
            "speed_ms": 123,
            "quality_score": 0.91,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"].as_array().unwrap().len(), 6);
    assert!(body["selected_models"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "acme_reasoner"));
}

#[tokio::test]
async fn custom_model_requires_a_name() {
    let (state, _dir) = test_state();
    let (status, body) = post(&state, "/api/models/custom", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn model_selection_filters_unknown_keys() {
    let (state, _dir) = test_state();
    let (status, body) = post(
        &state,
        "/api/models/select",
        json!({ "selected_models": ["claude_haiku", "bogus"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected_models"], json!(["claude_haiku"]));
}

// ========== Analysis ==========

#[tokio::test]
async fn cost_results_come_back_sorted() {
    let (state, _dir) = test_state();
    let (status, body) = post(&state, "/api/cost", json!({ "requests_per_day": 100000 })).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    let totals: Vec<f64> = results
        .iter()
        .map(|r| r["total_monthly"].as_f64().unwrap())
        .collect();
    for pair in totals.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[tokio::test]
async fn cost_with_unknown_model_is_not_found() {
    let (state, _dir) = test_state();
    let (status, body) = post(
        &state,
        "/api/cost",
        json!({ "models": ["nope"], "requests_per_day": 1000 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn cost_rejects_zero_volume() {
    let (state, _dir) = test_state();
    let (status, _) = post(&state, "/api/cost", json!({ "requests_per_day": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn select_evaluates_default_scenarios() {
    let (state, _dir) = test_state();
    let (status, body) = post(&state, "/api/select", json!({ "model": "claude_sonnet" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "claude_sonnet");
    assert_eq!(body["total"], 3);
    assert_eq!(body["test_results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn select_with_unknown_model_is_not_found() {
    let (state, _dir) = test_state();
    let (status, _) = post(&state, "/api/select", json!({ "model": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn benchmark_returns_three_rankings() {
    let (state, _dir) = test_state();
    let (status, body) = post(&state, "/api/benchmark", json!({ "iterations": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    for ranking in ["by_accuracy", "by_speed", "by_cost"] {
        assert_eq!(
            body["rankings"][ranking].as_array().unwrap().len(),
            5,
            "missing entries in {ranking}"
        );
    }
}

#[tokio::test]
async fn decision_reports_no_match_for_tiny_budget() {
    let (state, _dir) = test_state();
    let (status, body) = post(
        &state,
        "/api/decision",
        json!({
            "accuracy_requirement": 0.85,
            "latency_requirement_ms": 1000,
            "budget_per_month": 1.0,
            "use_case": "customer_support",
            "requests_per_day": 100000,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"], "no exact match");
    assert!(!body["options"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn canary_outcome_lands_in_history() {
    let (state, _dir) = test_state();
    let (status, body) = post(
        &state,
        "/api/canary",
        json!({ "current_model": "claude_opus", "new_model": "claude_sonnet" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["new_model_now_in_production"], "claude_sonnet");

    let (status, body) = get(&state, "/api/canary/history").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "completed");
}

#[tokio::test]
async fn history_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rollout_history.json");
    let models = mh_core::builtin_models();
    let outcome = mh_engine::canary::rollout(&models[0], &models[1], 100).unwrap();

    let history = RolloutHistory::open(path.clone()).unwrap();
    let record = history
        .append("claude_opus", "claude_sonnet", &outcome)
        .unwrap();
    assert_eq!(history.find(record.id).unwrap().status, "completed");

    let reopened = RolloutHistory::open(path).unwrap();
    assert_eq!(reopened.entries().len(), 1);
    assert_eq!(reopened.find(record.id).unwrap().new_model, "claude_sonnet");
}

#[tokio::test]
async fn canary_rejects_zero_final_traffic() {
    let (state, _dir) = test_state();
    let (status, _) = post(
        &state,
        "/api/canary",
        json!({
            "current_model": "claude_opus",
            "new_model": "claude_sonnet",
            "final_traffic_percent": 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ========== Guidance ==========

#[tokio::test]
async fn guidance_endpoints_answer_with_expected_shapes() {
    let (state, _dir) = test_state();

    let (status, body) = get(&state, "/api/scenarios").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = get(&state, "/api/mistakes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mistakes"].as_array().unwrap().len(), 5);

    let (status, body) = get(&state, "/api/reevaluation-triggers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["triggers"].as_array().unwrap().len(), 6);

    let (status, body) = get(&state, "/api/example-output").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("comparison").is_some());
    assert!(body.get("recommendation").is_some());
}

#[tokio::test]
async fn ecommerce_example_chains_decision_and_canary() {
    let (state, _dir) = test_state();
    let (status, body) = get(&state, "/api/ecommerce-example").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"]["recommended_model"], "claude_sonnet");
    assert_eq!(body["canary"]["status"], "completed");
    assert!(body["cost_comparison"]["monthly_savings"].as_f64().unwrap() > 0.0);
}
