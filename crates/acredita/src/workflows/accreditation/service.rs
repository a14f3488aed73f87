use std::sync::Arc;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::classifier::{ClassifierConfig, StatusClassifier};
use super::domain::{
    AccreditationPeriod, CareerId, DateWindow, ModalityId, NewPeriod, PeriodId, StatusResult,
    WindowError,
};
use super::report::{AccreditationReport, CareerPeriods, FacultyPeriods, PeriodStatus};
use super::repository::{PeriodStore, StoreError};
use super::selector::{self, ActiveSelection, ActiveTag};

/// Service composing the period store with the status classifier.
pub struct AccreditationService<S> {
    store: Arc<S>,
    classifier: Arc<StatusClassifier>,
}

impl<S> AccreditationService<S>
where
    S: PeriodStore + 'static,
{
    pub fn new(store: Arc<S>, config: ClassifierConfig) -> Self {
        Self {
            store,
            classifier: Arc::new(StatusClassifier::new(config)),
        }
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    /// Career-level status across the career's whole modality history.
    pub fn career_status(
        &self,
        career: CareerId,
        reference: NaiveDate,
    ) -> Result<StatusResult, ServiceError> {
        let periods = self.store.career_periods(career, None)?;
        Ok(self.classifier.status(&periods, reference))
    }

    /// Status restricted to modalities whose name matches `standard`.
    pub fn standard_status(
        &self,
        career: CareerId,
        standard: &str,
        reference: NaiveDate,
    ) -> Result<StatusResult, ServiceError> {
        let periods = self.store.career_periods(career, Some(standard))?;
        Ok(self.classifier.status(&periods, reference))
    }

    /// Per-period labels for a career; unlike the career label these
    /// rows can read `Vencida`.
    pub fn career_breakdown(
        &self,
        career: CareerId,
        reference: NaiveDate,
    ) -> Result<Vec<PeriodStatus>, ServiceError> {
        let periods = self.store.career_periods(career, None)?;
        Ok(periods
            .into_iter()
            .map(|period| {
                let label = self.classifier.classify_period(&period, reference);
                PeriodStatus { period, label }
            })
            .collect())
    }

    /// Governing period for one (career, modality) pair, if any.
    pub fn select_active(
        &self,
        career: CareerId,
        modality: ModalityId,
        reference: NaiveDate,
        desired: Option<DateWindow>,
    ) -> Result<Option<ActiveSelection>, ServiceError> {
        let periods = self.store.pair_periods(career, modality)?;
        Ok(selector::select_active(&periods, reference, desired))
    }

    /// Locate the governing period for the pair or open a new cycle.
    ///
    /// Without a desired window the new cycle runs from `today` for the
    /// configured default span. A desired window that overlaps any
    /// stored process window is rejected rather than silently merged.
    pub fn find_or_create(
        &self,
        career: CareerId,
        modality: ModalityId,
        desired: Option<DateWindow>,
        today: NaiveDate,
    ) -> Result<FindOrCreateOutcome, ServiceError> {
        let desired = match desired {
            Some(window) => window,
            None => self.default_window(today)?,
        };

        let periods = self.store.pair_periods(career, modality)?;

        if let Some(selection) = selector::select_active(&periods, today, Some(desired)) {
            return Ok(FindOrCreateOutcome {
                period: selection.period,
                action: PeriodAction::Found,
                tag: Some(selection.tag),
            });
        }

        for existing in &periods {
            if let Some((start, end)) = existing.process_bounds() {
                let disjoint = desired.end() < start || desired.start() > end;
                if !disjoint {
                    return Err(ServiceError::WindowConflict {
                        requested: desired,
                        existing: existing.id,
                    });
                }
            }
        }

        let period = self.store.insert(NewPeriod {
            career,
            modality,
            process: desired,
        })?;

        Ok(FindOrCreateOutcome {
            period,
            action: PeriodAction::Created,
            tag: None,
        })
    }

    /// Record a granted certificate window and mark the period accredited.
    pub fn record_approval(
        &self,
        id: PeriodId,
        approval: DateWindow,
    ) -> Result<AccreditationPeriod, ServiceError> {
        let mut period = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;

        period.approval_start = Some(approval.start());
        period.approval_end = Some(approval.end());
        period.accredited = true;

        self.store.update(period.clone())?;
        Ok(period)
    }

    /// Institution-wide rollup over the faculty directory.
    pub fn faculty_report(
        &self,
        reference: NaiveDate,
    ) -> Result<AccreditationReport, ServiceError> {
        let mut groups = Vec::new();

        for faculty in self.store.faculties()? {
            let mut careers = Vec::with_capacity(faculty.careers.len());
            for career in &faculty.careers {
                let periods = self.store.career_periods(career.id, None)?;
                careers.push(CareerPeriods {
                    career: career.clone(),
                    periods,
                });
            }
            groups.push(FacultyPeriods {
                faculty: faculty.id,
                name: faculty.name,
                careers,
            });
        }

        Ok(AccreditationReport::build(
            &groups,
            reference,
            self.classifier.config(),
        ))
    }

    fn default_window(&self, today: NaiveDate) -> Result<DateWindow, ServiceError> {
        let span = Months::new(self.classifier.config().default_process_months);
        let end = today.checked_add_months(span).unwrap_or(NaiveDate::MAX);
        Ok(DateWindow::new(today, end)?)
    }
}

/// Whether find-or-create reused a stored period or opened a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodAction {
    Found,
    Created,
}

impl PeriodAction {
    pub const fn label(self) -> &'static str {
        match self {
            PeriodAction::Found => "found",
            PeriodAction::Created => "created",
        }
    }
}

/// Answer from the find-or-create workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindOrCreateOutcome {
    pub period: AccreditationPeriod,
    pub action: PeriodAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<ActiveTag>,
}

/// Error raised by the accreditation service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("requested process window {requested:?} overlaps stored period {existing:?}")]
    WindowConflict {
        requested: DateWindow,
        existing: PeriodId,
    },
    #[error(transparent)]
    InvalidWindow(#[from] WindowError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
