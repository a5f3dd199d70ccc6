//! Decision/rollout engine: cost modeling, scenario scoring, multi-run
//! benchmarking, constraint-based decision resolution, and the canary
//! rollout state machine. All simulated figures come from the deterministic
//! kernel in [`simulate`]; given identical inputs and an identical catalog
//! snapshot, every function here returns identical structured output.

pub mod benchmark;
pub mod canary;
pub mod cost;
pub mod decision;
pub mod guide;
pub mod scoring;
pub mod simulate;

pub use benchmark::{BenchmarkReport, ModelMetrics, Rankings};
pub use canary::{rollout, PhaseReport, RolloutOutcome};
pub use cost::{estimate, estimate_all, estimate_with, CostBreakdown};
pub use decision::{decide, Decision, DecisionRequest};
pub use scoring::{evaluate, EvaluationReport, ScenarioOutcome};
