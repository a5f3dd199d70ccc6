use crate::error::{Result, WorkbenchError};
use serde::{Deserialize, Serialize};

/// Per-request traffic profile. Transient: constructed per call, no
/// identity beyond the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadProfile {
    #[serde(default = "default_requests_per_day")]
    pub requests_per_day: u64,
    #[serde(default = "default_input_tokens")]
    pub avg_input_tokens: u32,
    #[serde(default = "default_output_tokens")]
    pub avg_output_tokens: u32,
}

fn default_requests_per_day() -> u64 {
    10_000
}

fn default_input_tokens() -> u32 {
    500
}

fn default_output_tokens() -> u32 {
    300
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            requests_per_day: default_requests_per_day(),
            avg_input_tokens: default_input_tokens(),
            avg_output_tokens: default_output_tokens(),
        }
    }
}

impl WorkloadProfile {
    pub fn validate(&self) -> Result<()> {
        if self.requests_per_day == 0 {
            return Err(WorkbenchError::InvalidWorkload(
                "requests_per_day must be positive".into(),
            ));
        }
        if self.avg_input_tokens == 0 || self.avg_output_tokens == 0 {
            return Err(WorkbenchError::InvalidWorkload(
                "token counts must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Billing-month volume: 30 days of traffic.
    pub fn monthly_requests(&self) -> u64 {
        self.requests_per_day * 30
    }
}
