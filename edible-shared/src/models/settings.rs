use serde::{Deserialize, Serialize};

/// The single global switch that gates order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSetting {
    pub submit_enabled: bool,
}

impl Default for SubmissionSetting {
    fn default() -> Self {
        Self { submit_enabled: true }
    }
}
