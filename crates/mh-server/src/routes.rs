//! Endpoint handlers, grouped by area: catalog, analysis, guidance.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use mh_core::{default_scenarios, CustomModelInput, Scenario, WorkloadProfile};
use mh_engine::decision::DecisionRequest;
use mh_engine::{benchmark, canary, cost, guide, scoring};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/models", get(list_models))
        .route("/api/models/select", post(select_models))
        .route("/api/models/custom", post(add_custom_model))
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cost", post(estimate_cost))
        .route("/api/select", post(evaluate_model))
        .route("/api/benchmark", post(run_benchmark))
        .route("/api/decision", post(resolve_decision))
        .route("/api/canary", post(run_canary))
        .route("/api/canary/history", get(canary_history))
}

pub fn guidance_routes() -> Router<AppState> {
    Router::new()
        .route("/api/scenarios", get(list_scenarios))
        .route("/api/example-output", get(example_output))
        .route("/api/ecommerce-example", get(ecommerce_example))
        .route("/api/mistakes", get(list_mistakes))
        .route("/api/reevaluation-triggers", get(list_reevaluation_triggers))
}

// ========== Catalog ==========

async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let (catalog, selected) = state.store.snapshot()?;
    Ok(Json(json!({
        "models": catalog.models(),
        "selected_models": selected,
    })))
}

#[derive(Debug, Deserialize)]
struct SelectModelsRequest {
    #[serde(default)]
    selected_models: Vec<String>,
}

async fn select_models(
    State(state): State<AppState>,
    Json(request): Json<SelectModelsRequest>,
) -> Result<Json<Value>, ApiError> {
    let selected = state.store.select(request.selected_models)?;
    Ok(Json(json!({ "selected_models": selected })))
}

async fn add_custom_model(
    State(state): State<AppState>,
    Json(input): Json<CustomModelInput>,
) -> Result<Json<Value>, ApiError> {
    state.store.add_custom(input)?;
    let (catalog, selected) = state.store.snapshot()?;
    Ok(Json(json!({
        "models": catalog.models(),
        "selected_models": selected,
    })))
}

// ========== Analysis ==========

#[derive(Debug, Deserialize)]
struct CostRequest {
    #[serde(default)]
    models: Vec<String>,
    #[serde(flatten)]
    workload: WorkloadProfile,
}

async fn estimate_cost(
    State(state): State<AppState>,
    Json(request): Json<CostRequest>,
) -> Result<Json<Value>, ApiError> {
    let (catalog, selected) = state.store.snapshot()?;
    let keys = if request.models.is_empty() {
        selected
    } else {
        request.models
    };
    let models = catalog.resolve(&keys)?;
    let results = cost::estimate_all(&models, &request.workload)?;
    Ok(Json(json!({ "results": results })))
}

#[derive(Debug, Deserialize)]
struct EvaluateRequest {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

async fn evaluate_model(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Value>, ApiError> {
    let (catalog, selected) = state.store.snapshot()?;
    let key = match request.model {
        Some(key) => key,
        None => selected
            .first()
            .cloned()
            .ok_or_else(|| ApiError::bad_request("no model selected"))?,
    };
    let model = catalog.get(&key)?;
    let report = scoring::evaluate(model, &request.scenarios)?;
    Ok(Json(serde_json::to_value(report).map_err(|e| ApiError::internal(e.to_string()))?))
}

#[derive(Debug, Deserialize)]
struct BenchmarkRequest {
    #[serde(default)]
    models: Vec<String>,
    #[serde(default)]
    test_cases: Vec<Scenario>,
    #[serde(default = "default_iterations")]
    iterations: u32,
}

fn default_iterations() -> u32 {
    3
}

async fn run_benchmark(
    State(state): State<AppState>,
    Json(request): Json<BenchmarkRequest>,
) -> Result<Json<Value>, ApiError> {
    let (catalog, selected) = state.store.snapshot()?;
    let keys = if request.models.is_empty() {
        selected
    } else {
        request.models
    };
    let models = catalog.resolve(&keys)?;
    let report = benchmark::run(&models, &request.test_cases, request.iterations)?;
    Ok(Json(serde_json::to_value(report).map_err(|e| ApiError::internal(e.to_string()))?))
}

async fn resolve_decision(
    State(state): State<AppState>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<Value>, ApiError> {
    let (catalog, _) = state.store.snapshot()?;
    let decision = mh_engine::decision::decide(catalog.models(), &request)?;
    Ok(Json(serde_json::to_value(decision).map_err(|e| ApiError::internal(e.to_string()))?))
}

#[derive(Debug, Deserialize)]
struct CanaryRequest {
    current_model: String,
    new_model: String,
    #[serde(default = "default_final_traffic")]
    final_traffic_percent: u8,
}

fn default_final_traffic() -> u8 {
    100
}

async fn run_canary(
    State(state): State<AppState>,
    Json(request): Json<CanaryRequest>,
) -> Result<Json<Value>, ApiError> {
    let (catalog, _) = state.store.snapshot()?;
    let current = catalog.get(&request.current_model)?;
    let new = catalog.get(&request.new_model)?;
    let outcome = canary::rollout(current, new, request.final_traffic_percent)?;
    state
        .history
        .append(&request.current_model, &request.new_model, &outcome)?;
    Ok(Json(serde_json::to_value(outcome).map_err(|e| ApiError::internal(e.to_string()))?))
}

async fn canary_history(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "entries": state.history.entries() }))
}

// ========== Guidance ==========

async fn list_scenarios() -> Json<Vec<Scenario>> {
    Json(default_scenarios())
}

async fn example_output() -> Json<Value> {
    Json(guide::example_output())
}

async fn ecommerce_example(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let (catalog, _) = state.store.snapshot()?;
    let example = guide::ecommerce_example(catalog.models())?;
    Ok(Json(serde_json::to_value(example).map_err(|e| ApiError::internal(e.to_string()))?))
}

async fn list_mistakes() -> Json<Value> {
    Json(json!({ "mistakes": guide::common_mistakes() }))
}

async fn list_reevaluation_triggers() -> Json<Value> {
    Json(json!({ "triggers": guide::reevaluation_triggers() }))
}
