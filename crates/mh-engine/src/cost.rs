//! Monthly cost modeling: token pricing plus the hidden costs (hallucination
//! correction, infrastructure, operations) that dominate at volume.

use crate::simulate::{round2, round4};
use mh_core::{ModelProfile, Result, WorkloadProfile};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default cost charged per hallucination-corrected request.
pub const DEFAULT_ERROR_FIX_COST: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub model_key: String,
    pub model_name: String,
    pub api_cost: f64,
    pub error_correction: f64,
    pub infrastructure: f64,
    pub operations: f64,
    pub total_monthly: f64,
    pub cost_per_request: f64,
    pub quality_score: f64,
    pub hallucination_rate: f64,
    pub speed_ms: u32,
}

/// Estimate one model's monthly cost with the default correction economics.
pub fn estimate(model: &ModelProfile, workload: &WorkloadProfile) -> Result<CostBreakdown> {
    estimate_with(model, workload, DEFAULT_ERROR_FIX_COST)
}

/// Estimate with an explicit per-correction cost.
///
/// `total_monthly` is the sum of the four rounded components, so the
/// breakdown always adds up exactly as displayed.
pub fn estimate_with(
    model: &ModelProfile,
    workload: &WorkloadProfile,
    error_fix_cost: f64,
) -> Result<CostBreakdown> {
    workload.validate()?;
    let monthly_requests = workload.monthly_requests() as f64;

    let api_cost = round2(
        monthly_requests * f64::from(workload.avg_input_tokens) / 1000.0
            * model.input_cost_per_1k
            + monthly_requests * f64::from(workload.avg_output_tokens) / 1000.0
                * model.output_cost_per_1k,
    );
    let error_correction = round2(monthly_requests * model.hallucination_rate * error_fix_cost);
    let infrastructure = round2(model.infrastructure_cost_monthly);
    let operations = round2(model.ops_cost_monthly);
    let total_monthly = round2(api_cost + error_correction + infrastructure + operations);

    Ok(CostBreakdown {
        model_key: model.key.clone(),
        model_name: model.name.clone(),
        api_cost,
        error_correction,
        infrastructure,
        operations,
        total_monthly,
        cost_per_request: round4(total_monthly / monthly_requests),
        quality_score: model.quality_score,
        hallucination_rate: model.hallucination_rate,
        speed_ms: model.speed_ms,
    })
}

/// Estimate a set of models, sorted ascending by total monthly cost. Ties go
/// to the higher quality score, then to key order, so output is stable.
pub fn estimate_all(
    models: &[ModelProfile],
    workload: &WorkloadProfile,
) -> Result<Vec<CostBreakdown>> {
    let mut rows = models
        .iter()
        .map(|model| estimate(model, workload))
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by(compare_rows);
    Ok(rows)
}

fn compare_rows(a: &CostBreakdown, b: &CostBreakdown) -> Ordering {
    a.total_monthly
        .total_cmp(&b.total_monthly)
        .then_with(|| b.quality_score.total_cmp(&a.quality_score))
        .then_with(|| a.model_key.cmp(&b.model_key))
}
