use axum::body::Body;
use axum::http::Request;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mh_core::CatalogStore;
use mh_server::history::RolloutHistory;
use mh_server::{app, state::AppState};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn bench_state(dir: &tempfile::TempDir) -> AppState {
    AppState {
        store: Arc::new(CatalogStore::open(dir.path().join("user_models.json")).unwrap()),
        history: Arc::new(RolloutHistory::open(dir.path().join("rollout_history.json")).unwrap()),
    }
}

fn bench_http_models(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let state = bench_state(&dir);

    c.bench_function("http_list_models_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..100 {
                    let response = app(state.clone())
                        .oneshot(
                            Request::builder()
                                .uri("/api/models")
                                .body(Body::empty())
                                .unwrap(),
                        )
                        .await
                        .unwrap();
                    black_box(response.status());
                }
            })
        })
    });

    c.bench_function("http_decision_100", |b| {
        let payload = serde_json::json!({
            "accuracy_requirement": 0.85,
            "latency_requirement_ms": 1000,
            "budget_per_month": 25000.0,
            "use_case": "customer_support",
            "requests_per_day": 100000,
        })
        .to_string();
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..100 {
                    let response = app(state.clone())
                        .oneshot(
                            Request::builder()
                                .method("POST")
                                .uri("/api/decision")
                                .header("content-type", "application/json")
                                .body(Body::from(payload.clone()))
                                .unwrap(),
                        )
                        .await
                        .unwrap();
                    black_box(response.status());
                }
            })
        })
    });
}

criterion_group!(benches, bench_http_models);
criterion_main!(benches);
