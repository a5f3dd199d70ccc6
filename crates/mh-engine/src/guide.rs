//! Static guidance content and the worked end-to-end example. These feed
//! the collaborator endpoints; nothing here is consumed by the engine
//! itself.

use crate::canary::RolloutOutcome;
use crate::cost::CostBreakdown;
use crate::decision::{Decision, DecisionRequest};
use crate::simulate::round2;
use crate::{canary, cost, decision};
use mh_core::{ModelProfile, Result, WorkloadProfile};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct Mistake {
    pub title: String,
    pub anti_pattern: String,
    pub recommended: String,
}

/// Five mistakes teams make when picking a backend, each with the corrected
/// practice.
pub fn common_mistakes() -> Vec<Mistake> {
    let entries = [
        (
            "Choosing based on marketing, not testing",
            "The premium model is the 'best' model, so use it everywhere",
            "A mid-tier model meeting your requirements at 40% lower cost wins",
        ),
        (
            "Not measuring hidden costs",
            "The cheapest per-token model is the cheapest model",
            "Add correction, infrastructure, and operations costs before comparing",
        ),
        (
            "Not testing on your actual use cases",
            "Benchmark models on public datasets only",
            "Benchmark on your own customer requests",
        ),
        (
            "Not measuring consistency",
            "Run a test once, see 90% accuracy, deploy",
            "Run it repeatedly and inspect min/max/average before trusting it",
        ),
        (
            "Not having a rollback plan",
            "Deploy to 100% of traffic at once",
            "Canary rollout: 5% -> 25% -> 50% -> 100% with quality gates",
        ),
    ];
    entries
        .into_iter()
        .map(|(title, anti, rec)| Mistake {
            title: title.into(),
            anti_pattern: anti.into(),
            recommended: rec.into(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ReevaluationTrigger {
    pub trigger: String,
    pub description: String,
}

/// Conditions that should send a team back to this workbench.
pub fn reevaluation_triggers() -> Vec<ReevaluationTrigger> {
    let entries = [
        ("accuracy_regression", "Accuracy drops >5% compared to baseline"),
        ("cost_increase", "Request volume increased, cost now exceeds budget"),
        ("new_model_released", "Better model available at similar cost"),
        ("latency_issue", "Users reporting slow responses"),
        (
            "business_requirement_change",
            "Need higher accuracy or faster response",
        ),
        ("annual_review", "Every 12 months, benchmark all models again"),
    ];
    entries
        .into_iter()
        .map(|(trigger, description)| ReevaluationTrigger {
            trigger: trigger.into(),
            description: description.into(),
        })
        .collect()
}

/// Canned comparison/recommendation payload for the front-end walkthrough.
pub fn example_output() -> Value {
    json!({
        "comparison": [
            {
                "model": "Claude Opus",
                "accuracy": "95.3% (best)",
                "speed": "820ms",
                "consistency": "98% (very reliable)",
                "monthly_cost": "$66,000",
            },
            {
                "model": "Claude Sonnet",
                "accuracy": "88.1%",
                "speed": "420ms (fast)",
                "consistency": "95%",
                "monthly_cost": "$24,000 (best value)",
            },
            {
                "model": "Claude Haiku",
                "accuracy": "76.2% (weak on complex cases)",
                "speed": "110ms (fastest)",
                "consistency": "82%",
                "monthly_cost": "$13,800",
            },
        ],
        "recommendation": {
            "model": "Claude Sonnet",
            "reasoning": [
                "88% accuracy is sufficient for your requirements",
                "420ms latency doesn't impact user experience",
                "Save $42,000/month vs Opus",
            ],
        },
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CostComparison {
    pub old_model: String,
    pub old_monthly: f64,
    pub new_model: String,
    pub new_monthly: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EcommerceExample {
    pub requirements: Value,
    pub decision: Decision,
    pub canary: RolloutOutcome,
    pub cost_comparison: CostComparison,
}

const EXAMPLE_VOLUME: u64 = 100_000;
const EXAMPLE_BUDGET: f64 = 25_000.0;

/// End-to-end walkthrough: decide for a support workload, canary the winner
/// in behind the incumbent, and compare the monthly bills.
pub fn ecommerce_example(models: &[ModelProfile]) -> Result<EcommerceExample> {
    let request = DecisionRequest {
        accuracy_requirement: 0.85,
        latency_requirement_ms: 1000,
        budget_per_month: EXAMPLE_BUDGET,
        use_case: "customer_support".into(),
        requests_per_day: EXAMPLE_VOLUME,
    };
    let decision = decision::decide(models, &request)?;

    let incumbent = find(models, "claude_opus")?;
    let candidate = find(models, "claude_sonnet")?;
    let canary = canary::rollout(incumbent, candidate, 100)?;

    let workload = WorkloadProfile {
        requests_per_day: EXAMPLE_VOLUME,
        ..Default::default()
    };
    let old: CostBreakdown = cost::estimate(incumbent, &workload)?;
    let new: CostBreakdown = cost::estimate(candidate, &workload)?;
    let monthly_savings = round2(old.total_monthly - new.total_monthly);

    Ok(EcommerceExample {
        requirements: json!({
            "requests_per_day": EXAMPLE_VOLUME,
            "accuracy_needed": "85%+",
            "latency": "<1s",
            "budget": EXAMPLE_BUDGET,
        }),
        decision,
        canary,
        cost_comparison: CostComparison {
            old_model: incumbent.key.clone(),
            old_monthly: old.total_monthly,
            new_model: candidate.key.clone(),
            new_monthly: new.total_monthly,
            monthly_savings,
            annual_savings: round2(monthly_savings * 12.0),
        },
    })
}

fn find<'a>(models: &'a [ModelProfile], key: &str) -> Result<&'a ModelProfile> {
    models
        .iter()
        .find(|m| m.key == key)
        .ok_or_else(|| mh_core::WorkbenchError::ModelNotFound { key: key.into() })
}
