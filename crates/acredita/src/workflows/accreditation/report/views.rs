use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{
    AccreditationPeriod, CareerId, FacultyId, StatusLabel, StatusResult,
};
use super::super::selector::ActiveTag;
use super::super::service::{FindOrCreateOutcome, PeriodAction};
use super::StatusCounts;

/// Serialized answer for the career status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResultView {
    pub status: StatusLabel,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_period: Option<AccreditationPeriod>,
}

impl StatusResult {
    pub fn to_view(&self) -> StatusResultView {
        StatusResultView {
            status: self.label,
            status_label: self.label.label(),
            active_period: self.active_period.clone(),
        }
    }
}

/// One period with its isolated label, for breakdown listings.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodBreakdownView {
    pub period: AccreditationPeriod,
    pub status: StatusLabel,
    pub status_label: &'static str,
}

/// Breakdown listing for one career at a reference date.
#[derive(Debug, Clone, Serialize)]
pub struct CareerBreakdownView {
    pub career: CareerId,
    pub reference: NaiveDate,
    pub periods: Vec<PeriodBreakdownView>,
}

/// Classified career row inside a faculty rollup view.
#[derive(Debug, Clone, Serialize)]
pub struct CareerStatusRow {
    pub career: CareerId,
    pub name: String,
    pub status: StatusLabel,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_period: Option<AccreditationPeriod>,
}

/// Faculty rollup with counts and per-career rows.
#[derive(Debug, Clone, Serialize)]
pub struct FacultyRollupView {
    pub faculty: FacultyId,
    pub name: String,
    pub counts: StatusCounts,
    pub careers: Vec<CareerStatusRow>,
}

/// Institution-wide report payload.
#[derive(Debug, Clone, Serialize)]
pub struct AccreditationReportView {
    pub generated_for: NaiveDate,
    pub faculties: Vec<FacultyRollupView>,
    pub totals: StatusCounts,
}

/// Serialized answer for the find-or-create endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FindOrCreateView {
    pub action: PeriodAction,
    pub action_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<ActiveTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_label: Option<&'static str>,
    pub period: AccreditationPeriod,
}

impl FindOrCreateOutcome {
    pub fn to_view(&self) -> FindOrCreateView {
        FindOrCreateView {
            action: self.action,
            action_label: self.action.label(),
            tag: self.tag,
            tag_label: self.tag.map(ActiveTag::label),
            period: self.period.clone(),
        }
    }
}
