//! Core library for the university accreditation tracker.
//!
//! The `workflows::accreditation` module carries the domain: period
//! records, the temporal status classifier, the find-or-create cycle
//! workflow, and faculty-level reporting. `config`, `telemetry`, and
//! `error` hold the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
