//! Canary simulator: staged traffic shift from an incumbent model to a
//! candidate, gated on simulated quality metrics at every phase. Forward-only
//! and append-only; rollback is a normal early return, not an error.

use crate::simulate::{clamp01, round2, round4};
use mh_core::{ModelProfile, Result, WorkbenchError};
use serde::Serialize;

/// Hard ceiling on the candidate's simulated error rate.
pub const ERROR_RATE_CEILING: f64 = 0.05;
/// Allowed p99 regression over the incumbent's baseline latency.
pub const LATENCY_HEADROOM_MS: f64 = 500.0;
/// Allowed accuracy drop below the incumbent's baseline quality.
pub const ACCURACY_TOLERANCE: f64 = 0.10;

const TRAFFIC_LADDER: [(u8, &str); 3] = [(5, "canary"), (25, "early_adopters"), (50, "half")];

#[derive(Debug, Clone, Serialize)]
pub struct PhaseMetrics {
    pub accuracy: f64,
    pub error_rate: f64,
    pub latency_p99: f64,
    pub baseline_latency_p99: f64,
    pub accuracy_floor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase: String,
    pub traffic_percent: u8,
    pub metrics: PhaseMetrics,
    pub gate_passed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RolloutOutcome {
    Completed {
        new_model_now_in_production: String,
        phases_completed: Vec<PhaseReport>,
    },
    RolledBack {
        failed_at_phase: String,
        reason: String,
        failed_phase: PhaseReport,
        phases_completed: Vec<PhaseReport>,
    },
}

impl RolloutOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::RolledBack { .. } => "rolled_back",
        }
    }

    pub fn phases_completed(&self) -> &[PhaseReport] {
        match self {
            Self::Completed {
                phases_completed, ..
            }
            | Self::RolledBack {
                phases_completed, ..
            } => phases_completed,
        }
    }

    pub fn failed_at_phase(&self) -> Option<&str> {
        match self {
            Self::Completed { .. } => None,
            Self::RolledBack {
                failed_at_phase, ..
            } => Some(failed_at_phase),
        }
    }
}

/// Drive the staged rollout. The phase ladder climbs through 5/25/50 percent
/// and ends exactly at `final_traffic_percent`; the first gate breach stops
/// the shift and rolls back with the breaching metric recorded.
pub fn rollout(
    current: &ModelProfile,
    new: &ModelProfile,
    final_traffic_percent: u8,
) -> Result<RolloutOutcome> {
    if final_traffic_percent == 0 || final_traffic_percent > 100 {
        return Err(WorkbenchError::InvalidRollout(format!(
            "final_traffic_percent must be in (0, 100], got {final_traffic_percent}"
        )));
    }

    let plan = plan_phases(final_traffic_percent);
    debug_assert!(
        plan.windows(2).all(|w| w[0].0 < w[1].0),
        "traffic ladder must be strictly increasing"
    );

    let mut phases_completed = Vec::with_capacity(plan.len());
    for (traffic_percent, label) in plan {
        let metrics = simulate_phase(current, new, traffic_percent);
        if let Some(reason) = gate_breach(&metrics) {
            let failed_phase = PhaseReport {
                phase: label,
                traffic_percent,
                metrics,
                gate_passed: false,
            };
            return Ok(RolloutOutcome::RolledBack {
                failed_at_phase: failed_phase.phase.clone(),
                reason,
                failed_phase,
                phases_completed,
            });
        }
        phases_completed.push(PhaseReport {
            phase: label,
            traffic_percent,
            metrics,
            gate_passed: true,
        });
    }

    Ok(RolloutOutcome::Completed {
        new_model_now_in_production: new.key.clone(),
        phases_completed,
    })
}

fn plan_phases(final_traffic_percent: u8) -> Vec<(u8, String)> {
    let mut plan: Vec<(u8, String)> = TRAFFIC_LADDER
        .iter()
        .filter(|(percent, _)| *percent < final_traffic_percent)
        .map(|(percent, label)| (*percent, (*label).to_string()))
        .collect();
    plan.push((final_traffic_percent, "full".into()));
    plan
}

/// Candidate metrics at a traffic share. Accuracy degrades with load,
/// amplified by the candidate's hallucination rate; error rate and p99
/// latency climb linearly. Pure in (incumbent, candidate, traffic).
fn simulate_phase(current: &ModelProfile, new: &ModelProfile, traffic_percent: u8) -> PhaseMetrics {
    let traffic = f64::from(traffic_percent) / 100.0;
    PhaseMetrics {
        accuracy: round4(clamp01(
            new.quality_score - traffic * (0.01 + 0.4 * new.hallucination_rate),
        )),
        error_rate: round4(new.hallucination_rate * 0.1 + traffic * 0.003),
        latency_p99: round2(f64::from(new.speed_ms) + traffic * 60.0),
        baseline_latency_p99: f64::from(current.speed_ms),
        accuracy_floor: round4(clamp01(current.quality_score - ACCURACY_TOLERANCE)),
    }
}

/// Gate checks in fixed order: error rate, latency, accuracy. Returns the
/// first breach, naming the metric and the threshold it crossed.
fn gate_breach(metrics: &PhaseMetrics) -> Option<String> {
    if metrics.error_rate >= ERROR_RATE_CEILING {
        return Some(format!(
            "error rate {:.4} breached the {ERROR_RATE_CEILING:.2} ceiling",
            metrics.error_rate
        ));
    }
    let latency_ceiling = metrics.baseline_latency_p99 + LATENCY_HEADROOM_MS;
    if metrics.latency_p99 >= latency_ceiling {
        return Some(format!(
            "p99 latency {:.2}ms exceeded baseline {:.2}ms plus {LATENCY_HEADROOM_MS:.0}ms headroom",
            metrics.latency_p99, metrics.baseline_latency_p99
        ));
    }
    if metrics.accuracy < metrics.accuracy_floor {
        return Some(format!(
            "accuracy {:.4} fell below the {:.4} floor",
            metrics.accuracy, metrics.accuracy_floor
        ));
    }
    None
}
