//! Domain logic for the enrollment analytics dashboard: synthetic applicant
//! population generation, per-applicant journey reconstruction, aggregate
//! reporting, roster queries, and CSV export.

pub mod config;
pub mod dashboards;
pub mod error;
pub mod telemetry;
