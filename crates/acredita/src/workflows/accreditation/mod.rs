//! Career accreditation tracking: temporal status classification, the
//! find-or-create period workflow, and faculty-level reporting.
//!
//! Every classification entry point takes the reference date as an
//! argument so histories can be evaluated "as of" any day; only the
//! HTTP edge falls back to the wall clock.

pub(crate) mod classifier;
pub mod domain;
pub mod report;
pub mod repository;
pub mod roster;
pub mod router;
pub(crate) mod selector;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{AggregateFlags, ClassifierConfig, PeriodFlags, StatusClassifier};
pub use domain::{
    AccreditationPeriod, CareerId, CareerSnapshot, DateWindow, FacultyId, FacultySnapshot,
    ModalityId, ModalitySnapshot, NewPeriod, PeriodId, StatusLabel, StatusResult, WindowError,
};
pub use report::{AccreditationReport, CareerPeriods, FacultyPeriods, PeriodStatus, StatusCounts};
pub use repository::{PeriodStore, StoreError};
pub use roster::{RosterImportError, RosterImporter, RosterRow};
pub use router::accreditation_router;
pub use selector::{select_active, ActiveSelection, ActiveTag};
pub use service::{
    AccreditationService, FindOrCreateOutcome, PeriodAction, ServiceError,
};
