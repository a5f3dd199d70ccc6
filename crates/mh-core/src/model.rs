use serde::{Deserialize, Serialize};

/// Static profile of one model backend: rate card plus quality and latency
/// baselines. Immutable once it enters a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub key: String,
    pub name: String,
    pub provider: String,
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    pub speed_ms: u32,
    pub quality_score: f64,
    pub hallucination_rate: f64,
    pub context_window: u32,
    pub best_for: String,
    #[serde(default)]
    pub infrastructure_cost_monthly: f64,
    #[serde(default)]
    pub ops_cost_monthly: f64,
}

/// The built-in rate card. Keys are stable identifiers used across every
/// component; custom models are layered on top by the catalog store.
pub fn builtin_models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            key: "claude_opus".into(),
            name: "Claude Opus 4.5".into(),
            provider: "Anthropic".into(),
            input_cost_per_1k: 0.015,
            output_cost_per_1k: 0.045,
            speed_ms: 820,
            quality_score: 0.953,
            hallucination_rate: 0.02,
            context_window: 200_000,
            best_for: "Complex reasoning, high-stakes decisions".into(),
            infrastructure_cost_monthly: 0.0,
            ops_cost_monthly: 0.0,
        },
        ModelProfile {
            key: "claude_sonnet".into(),
            name: "Claude Sonnet 4.5".into(),
            provider: "Anthropic".into(),
            input_cost_per_1k: 0.003,
            output_cost_per_1k: 0.015,
            speed_ms: 420,
            quality_score: 0.881,
            hallucination_rate: 0.04,
            context_window: 200_000,
            best_for: "Balanced performance, most use cases".into(),
            infrastructure_cost_monthly: 0.0,
            ops_cost_monthly: 0.0,
        },
        ModelProfile {
            key: "claude_haiku".into(),
            name: "Claude Haiku 4.5".into(),
            provider: "Anthropic".into(),
            input_cost_per_1k: 0.0008,
            output_cost_per_1k: 0.004,
            speed_ms: 110,
            quality_score: 0.762,
            hallucination_rate: 0.06,
            context_window: 200_000,
            best_for: "Simple tasks, routing, classification".into(),
            infrastructure_cost_monthly: 0.0,
            ops_cost_monthly: 0.0,
        },
        ModelProfile {
            key: "gpt_4o".into(),
            name: "GPT-4o".into(),
            provider: "OpenAI".into(),
            input_cost_per_1k: 0.005,
            output_cost_per_1k: 0.015,
            speed_ms: 600,
            quality_score: 0.92,
            hallucination_rate: 0.03,
            context_window: 128_000,
            best_for: "Good all-around, vision capabilities".into(),
            infrastructure_cost_monthly: 0.0,
            ops_cost_monthly: 0.0,
        },
        ModelProfile {
            key: "llama3_self_hosted".into(),
            name: "Llama 3 (Self-hosted)".into(),
            provider: "Meta".into(),
            input_cost_per_1k: 0.0005,
            output_cost_per_1k: 0.0005,
            speed_ms: 250,
            quality_score: 0.72,
            hallucination_rate: 0.10,
            context_window: 8_000,
            best_for: "High volume with custom training".into(),
            infrastructure_cost_monthly: 8_000.0,
            ops_cost_monthly: 3_000.0,
        },
    ]
}
