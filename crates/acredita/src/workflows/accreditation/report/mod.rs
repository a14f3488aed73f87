mod summary;
pub mod views;

pub use summary::{
    AccreditationReport, CareerPeriods, CareerStatusEntry, FacultyPeriods, FacultyRollup,
    PeriodStatus, StatusCounts,
};
