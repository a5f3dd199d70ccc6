//! Decision matrix: filter the catalog on explicit numeric requirements,
//! then pick the best survivor — or report the nearest misses.

use crate::cost;
use crate::simulate::{round2, round4};
use mh_core::{ModelProfile, Result, WorkbenchError, WorkloadProfile};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub accuracy_requirement: f64,
    pub latency_requirement_ms: u32,
    pub budget_per_month: f64,
    #[serde(default = "default_use_case")]
    pub use_case: String,
    #[serde(default = "default_requests_per_day")]
    pub requests_per_day: u64,
}

fn default_use_case() -> String {
    "customer_support".into()
}

fn default_requests_per_day() -> u64 {
    100_000
}

impl DecisionRequest {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.accuracy_requirement) {
            return Err(WorkbenchError::InvalidRequirement(
                "accuracy_requirement must be in [0, 1]".into(),
            ));
        }
        if self.latency_requirement_ms == 0 {
            return Err(WorkbenchError::InvalidRequirement(
                "latency_requirement_ms must be positive".into(),
            ));
        }
        if !self.budget_per_month.is_finite() || self.budget_per_month <= 0.0 {
            return Err(WorkbenchError::InvalidRequirement(
                "budget_per_month must be positive".into(),
            ));
        }
        if self.requests_per_day == 0 {
            return Err(WorkbenchError::InvalidRequirement(
                "requests_per_day must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub recommended_model: String,
    pub recommended_model_name: String,
    pub reasoning: String,
    pub monthly_cost: f64,
    pub savings_vs_budget: f64,
    pub use_case: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearMiss {
    pub model_key: String,
    pub model_name: String,
    pub violated: Vec<String>,
    pub violation_count: usize,
    pub violation_magnitude: f64,
    pub estimated_monthly_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoMatchReport {
    pub recommendation: String,
    pub use_case: String,
    pub options: Vec<NearMiss>,
}

/// A decision is a valid outcome either way: a recommendation, or a
/// no-match report listing the closest alternatives.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Decision {
    Recommended(Recommendation),
    NoMatch(NoMatchReport),
}

impl Decision {
    pub fn recommended(&self) -> Option<&Recommendation> {
        match self {
            Self::Recommended(r) => Some(r),
            Self::NoMatch(_) => None,
        }
    }

    pub fn no_match(&self) -> Option<&NoMatchReport> {
        match self {
            Self::Recommended(_) => None,
            Self::NoMatch(r) => Some(r),
        }
    }
}

/// Resolve the decision: keep models meeting the accuracy floor, latency
/// limit, and budget ceiling; among survivors pick by accuracy first, cost
/// second, latency third, key last.
pub fn decide(models: &[ModelProfile], request: &DecisionRequest) -> Result<Decision> {
    request.validate()?;
    let workload = WorkloadProfile {
        requests_per_day: request.requests_per_day,
        ..Default::default()
    };

    let mut survivors: Vec<(&ModelProfile, f64)> = Vec::new();
    let mut misses: Vec<NearMiss> = Vec::new();

    for model in models {
        let breakdown = cost::estimate(model, &workload)?;
        let monthly = breakdown.total_monthly;

        let mut violated = Vec::new();
        let mut magnitude = 0.0;
        if model.quality_score < request.accuracy_requirement {
            violated.push(format!(
                "accuracy {:.3} below required {:.3}",
                model.quality_score, request.accuracy_requirement
            ));
            magnitude += (request.accuracy_requirement - model.quality_score)
                / request.accuracy_requirement;
        }
        if model.speed_ms > request.latency_requirement_ms {
            violated.push(format!(
                "latency {}ms above limit {}ms",
                model.speed_ms, request.latency_requirement_ms
            ));
            magnitude += f64::from(model.speed_ms - request.latency_requirement_ms)
                / f64::from(request.latency_requirement_ms);
        }
        if monthly > request.budget_per_month {
            violated.push(format!(
                "cost ${monthly:.2}/month above budget ${:.2}",
                request.budget_per_month
            ));
            magnitude += (monthly - request.budget_per_month) / request.budget_per_month;
        }

        if violated.is_empty() {
            survivors.push((model, monthly));
        } else {
            misses.push(NearMiss {
                model_key: model.key.clone(),
                model_name: model.name.clone(),
                violation_count: violated.len(),
                violated,
                violation_magnitude: round4(magnitude),
                estimated_monthly_cost: monthly,
            });
        }
    }

    if survivors.is_empty() {
        misses.sort_by(|a, b| {
            a.violation_count
                .cmp(&b.violation_count)
                .then_with(|| a.violation_magnitude.total_cmp(&b.violation_magnitude))
                .then_with(|| a.model_key.cmp(&b.model_key))
        });
        misses.truncate(3);
        return Ok(Decision::NoMatch(NoMatchReport {
            recommendation: "no exact match".into(),
            use_case: request.use_case.clone(),
            options: misses,
        }));
    }

    survivors.sort_by(|a, b| compare_survivors(a, b));
    let (best, monthly) = (survivors[0].0, survivors[0].1);

    Ok(Decision::Recommended(Recommendation {
        recommended_model: best.key.clone(),
        recommended_model_name: best.name.clone(),
        reasoning: reasoning(best, monthly, request, survivors.len()),
        monthly_cost: monthly,
        savings_vs_budget: round2(request.budget_per_month - monthly),
        use_case: request.use_case.clone(),
    }))
}

fn compare_survivors(a: &(&ModelProfile, f64), b: &(&ModelProfile, f64)) -> Ordering {
    b.0.quality_score
        .total_cmp(&a.0.quality_score)
        .then_with(|| a.1.total_cmp(&b.1))
        .then_with(|| a.0.speed_ms.cmp(&b.0.speed_ms))
        .then_with(|| a.0.key.cmp(&b.0.key))
}

fn reasoning(
    model: &ModelProfile,
    monthly: f64,
    request: &DecisionRequest,
    qualifying: usize,
) -> String {
    // Name the constraint with the least headroom; that is what drove the
    // choice among alternatives.
    let accuracy_slack =
        (model.quality_score - request.accuracy_requirement) / request.accuracy_requirement.max(f64::EPSILON);
    let latency_slack = f64::from(request.latency_requirement_ms - model.speed_ms)
        / f64::from(request.latency_requirement_ms);
    let budget_slack = (request.budget_per_month - monthly) / request.budget_per_month;
    let binding = if accuracy_slack <= latency_slack && accuracy_slack <= budget_slack {
        format!(
            "accuracy ({:.1}% against a {:.1}% floor)",
            model.quality_score * 100.0,
            request.accuracy_requirement * 100.0
        )
    } else if budget_slack <= latency_slack {
        format!(
            "budget (${monthly:.2} of ${:.2}/month)",
            request.budget_per_month
        )
    } else {
        format!(
            "latency ({}ms against a {}ms limit)",
            model.speed_ms, request.latency_requirement_ms
        )
    };
    format!(
        "Highest accuracy of {qualifying} model(s) meeting every requirement for {}; tightest margin is {binding}",
        request.use_case
    )
}
