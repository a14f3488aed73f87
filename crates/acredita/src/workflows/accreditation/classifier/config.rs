use serde::{Deserialize, Serialize};

/// Temporal dials for the status rules.
///
/// `grace_months` bounds how long an expired certificate still counts
/// toward re-accreditation; `default_process_months` sizes the
/// evaluation window opened when a caller supplies none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub grace_months: u32,
    pub default_process_months: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            grace_months: 24,
            default_process_months: 6,
        }
    }
}
