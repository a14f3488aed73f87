use chrono::NaiveDate;
use serde::Serialize;

use super::super::classifier::{ClassifierConfig, StatusClassifier};
use super::super::domain::{
    AccreditationPeriod, CareerId, CareerSnapshot, FacultyId, StatusLabel,
};
use super::views::{
    AccreditationReportView, CareerStatusRow, FacultyRollupView, PeriodBreakdownView,
};

/// A career's directory entry with its full period history attached.
#[derive(Debug, Clone)]
pub struct CareerPeriods {
    pub career: CareerSnapshot,
    pub periods: Vec<AccreditationPeriod>,
}

/// One faculty's careers grouped for rollup.
#[derive(Debug, Clone)]
pub struct FacultyPeriods {
    pub faculty: FacultyId,
    pub name: String,
    pub careers: Vec<CareerPeriods>,
}

/// Tally of career labels within a faculty or across the institution.
///
/// `record` folds `Expired` into `not_accredited`; career-level
/// classification never emits it, but the tally stays total anyway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub accredited: usize,
    pub in_process: usize,
    pub in_reaccreditation: usize,
    pub not_accredited: usize,
}

impl StatusCounts {
    pub fn record(&mut self, label: StatusLabel) {
        match label {
            StatusLabel::Accredited => self.accredited += 1,
            StatusLabel::InProcess => self.in_process += 1,
            StatusLabel::InReaccreditation => self.in_reaccreditation += 1,
            StatusLabel::Expired | StatusLabel::NotAccredited => self.not_accredited += 1,
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.accredited += other.accredited;
        self.in_process += other.in_process;
        self.in_reaccreditation += other.in_reaccreditation;
        self.not_accredited += other.not_accredited;
    }

    pub fn total(&self) -> usize {
        self.accredited + self.in_process + self.in_reaccreditation + self.not_accredited
    }
}

/// Classified career row inside a faculty rollup.
#[derive(Debug, Clone)]
pub struct CareerStatusEntry {
    pub career: CareerId,
    pub name: String,
    pub label: StatusLabel,
    pub active_period: Option<AccreditationPeriod>,
}

impl CareerStatusEntry {
    pub fn to_view(&self) -> CareerStatusRow {
        CareerStatusRow {
            career: self.career,
            name: self.name.clone(),
            status: self.label,
            status_label: self.label.label(),
            active_period: self.active_period.clone(),
        }
    }
}

/// Faculty-level aggregation of classified careers.
#[derive(Debug, Clone)]
pub struct FacultyRollup {
    pub faculty: FacultyId,
    pub name: String,
    pub counts: StatusCounts,
    pub careers: Vec<CareerStatusEntry>,
}

impl FacultyRollup {
    pub fn to_view(&self) -> FacultyRollupView {
        FacultyRollupView {
            faculty: self.faculty,
            name: self.name.clone(),
            counts: self.counts,
            careers: self.careers.iter().map(CareerStatusEntry::to_view).collect(),
        }
    }
}

/// Institution-wide accreditation report for a reference date.
#[derive(Debug, Clone)]
pub struct AccreditationReport {
    pub generated_for: NaiveDate,
    pub faculties: Vec<FacultyRollup>,
    pub totals: StatusCounts,
}

impl AccreditationReport {
    /// Classify every career in the grouped directory in one pass.
    pub fn build(
        groups: &[FacultyPeriods],
        reference: NaiveDate,
        config: &ClassifierConfig,
    ) -> Self {
        let classifier = StatusClassifier::new(config.clone());
        let mut faculties = Vec::with_capacity(groups.len());
        let mut totals = StatusCounts::default();

        for group in groups {
            let mut counts = StatusCounts::default();
            let mut careers = Vec::with_capacity(group.careers.len());

            for entry in &group.careers {
                let result = classifier.status(&entry.periods, reference);
                counts.record(result.label);
                careers.push(CareerStatusEntry {
                    career: entry.career.id,
                    name: entry.career.name.clone(),
                    label: result.label,
                    active_period: result.active_period,
                });
            }

            totals.merge(&counts);
            faculties.push(FacultyRollup {
                faculty: group.faculty,
                name: group.name.clone(),
                counts,
                careers,
            });
        }

        Self {
            generated_for: reference,
            faculties,
            totals,
        }
    }

    pub fn summary(&self) -> AccreditationReportView {
        AccreditationReportView {
            generated_for: self.generated_for,
            faculties: self.faculties.iter().map(FacultyRollup::to_view).collect(),
            totals: self.totals,
        }
    }
}

/// One period labelled in isolation, for per-career breakdown rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStatus {
    pub period: AccreditationPeriod,
    pub label: StatusLabel,
}

impl PeriodStatus {
    pub fn to_view(&self) -> PeriodBreakdownView {
        PeriodBreakdownView {
            period: self.period.clone(),
            status: self.label,
            status_label: self.label.label(),
        }
    }
}
