use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for faculties in the institutional directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacultyId(pub u64);

/// Identifier wrapper for degree careers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CareerId(pub u64);

/// Identifier wrapper for accreditation modalities (CEUB, ARCUSUR, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalityId(pub u64);

/// Identifier wrapper for stored accreditation periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodId(pub u64);

/// Inclusive date range validated at construction: `end` never precedes `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if end < start {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Two inclusive windows overlap unless one ends before the other starts.
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        !(self.end < other.start || self.start > other.end)
    }
}

/// Raised when a caller supplies an inverted date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    Inverted { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Inverted { start, end } => {
                write!(f, "window end {end} precedes start {start}")
            }
        }
    }
}

impl std::error::Error for WindowError {}

/// One accreditation cycle for a (career, modality) pair.
///
/// Date columns are optional because historical registrar data carries
/// half-filled cycles: an evaluation opened but never closed, a
/// certificate granted before process dates were backfilled. Rows
/// created through the workflow always carry both process bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditationPeriod {
    pub id: PeriodId,
    pub career: CareerId,
    pub modality: ModalityId,
    pub process_start: Option<NaiveDate>,
    pub process_end: Option<NaiveDate>,
    pub approval_start: Option<NaiveDate>,
    pub approval_end: Option<NaiveDate>,
    pub accredited: bool,
}

impl AccreditationPeriod {
    /// Both process bounds, when the row carries a complete evaluation window.
    pub fn process_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.process_start, self.process_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Both approval bounds, when a certificate window was recorded.
    pub fn approval_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.approval_start, self.approval_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Insert payload for a freshly opened cycle; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPeriod {
    pub career: CareerId,
    pub modality: ModalityId,
    pub process: DateWindow,
}

/// Career-level accreditation status labels.
///
/// `Expired` only ever surfaces from per-period classification; the
/// career-level rules absorb it into `InReaccreditation` (within grace)
/// or `NotAccredited` (beyond grace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Accredited,
    InProcess,
    InReaccreditation,
    Expired,
    NotAccredited,
}

impl StatusLabel {
    /// Display label in the registrar's reporting language.
    pub const fn label(self) -> &'static str {
        match self {
            StatusLabel::Accredited => "Acreditada",
            StatusLabel::InProcess => "En Proceso",
            StatusLabel::InReaccreditation => "En Reacreditación",
            StatusLabel::Expired => "Vencida",
            StatusLabel::NotAccredited => "No Acreditada",
        }
    }
}

/// Classification answer for a career: the label plus the governing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResult {
    pub label: StatusLabel,
    pub active_period: Option<AccreditationPeriod>,
}

/// Directory snapshot of a degree career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerSnapshot {
    pub id: CareerId,
    pub name: String,
}

/// Directory snapshot of a faculty with its careers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultySnapshot {
    pub id: FacultyId,
    pub name: String,
    pub careers: Vec<CareerSnapshot>,
}

/// Directory snapshot of an accreditation modality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalitySnapshot {
    pub id: ModalityId,
    pub name: String,
}
