//! Scenario evaluator: scores one model against a scenario set with
//! simulated accuracy and latency figures.

use crate::simulate::{clamp01, round2, round4, unit};
use mh_core::{default_scenarios, ModelProfile, Result, Scenario};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub accuracy: f64,
    pub latency_ms: f64,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub model: String,
    pub model_name: String,
    pub test_results: Vec<ScenarioOutcome>,
    pub overall_score: f64,
    pub passed: usize,
    pub total: usize,
}

/// Evaluate a model against a scenario set. An empty set falls back to the
/// default scenarios rather than failing.
pub fn evaluate(model: &ModelProfile, scenarios: &[Scenario]) -> Result<EvaluationReport> {
    let fallback;
    let scenarios = if scenarios.is_empty() {
        fallback = default_scenarios();
        &fallback[..]
    } else {
        scenarios
    };
    for scenario in scenarios {
        scenario.validate()?;
    }

    let results: Vec<ScenarioOutcome> = scenarios
        .iter()
        .map(|scenario| run_scenario(model, scenario))
        .collect();

    let weight_sum: f64 = scenarios.iter().map(|s| s.weight).sum();
    let overall_score = round4(
        results
            .iter()
            .zip(scenarios)
            .map(|(result, scenario)| result.accuracy * scenario.weight)
            .sum::<f64>()
            / weight_sum,
    );
    let passed = results.iter().filter(|r| r.passed).count();

    Ok(EvaluationReport {
        model: model.key.clone(),
        model_name: model.name.clone(),
        total: results.len(),
        test_results: results,
        overall_score,
        passed,
    })
}

fn run_scenario(model: &ModelProfile, scenario: &Scenario) -> ScenarioOutcome {
    let base = clamp01(model.quality_score - model.hallucination_rate * 0.2);
    let drift = unit(&[&model.key, &scenario.name]) * 0.08;
    let accuracy = round4(clamp01(base - drift));
    let latency_ms = round2(
        f64::from(model.speed_ms) + unit(&[&model.key, &scenario.name, "latency"]) * 40.0,
    );
    // Ceiling is generous: twice the model's own baseline.
    let latency_ceiling = f64::from(model.speed_ms) * 2.0;
    let passed = accuracy >= scenario.pass_criteria.min_accuracy && latency_ms <= latency_ceiling;

    ScenarioOutcome {
        scenario: scenario.name.clone(),
        accuracy,
        latency_ms,
        expected: scenario.expected.clone(),
        actual: format!("[{}] response to: {}", model.name, head(&scenario.input, 80)),
        passed,
    }
}

fn head(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
