mod config;
mod flags;
mod policy;

pub use config::ClassifierConfig;
pub use flags::{AggregateFlags, PeriodFlags};

use chrono::NaiveDate;

use super::domain::{AccreditationPeriod, StatusLabel, StatusResult};
use super::selector;

/// Stateless classifier applying the temporal rules to period snapshots.
///
/// Every entry point takes the reference date explicitly; nothing here
/// reads the wall clock, so histories can be classified "as of" any day.
pub struct StatusClassifier {
    config: ClassifierConfig,
}

impl StatusClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Career-level label over every period in the snapshot.
    pub fn classify(&self, periods: &[AccreditationPeriod], reference: NaiveDate) -> StatusLabel {
        let aggregate = flags::AggregateFlags::collect(periods, reference, &self.config);
        policy::career_label(aggregate)
    }

    /// Label for one period in isolation; unlike `classify` this can
    /// yield `Expired`.
    pub fn classify_period(&self, period: &AccreditationPeriod, reference: NaiveDate) -> StatusLabel {
        policy::period_label(PeriodFlags::evaluate(period, reference, &self.config))
    }

    /// Career label plus the governing period, if any.
    pub fn status(&self, periods: &[AccreditationPeriod], reference: NaiveDate) -> StatusResult {
        let label = self.classify(periods, reference);
        let active_period =
            selector::select_active(periods, reference, None).map(|selection| selection.period);

        StatusResult {
            label,
            active_period,
        }
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
