pub mod domain;
pub mod export;
pub mod generator;
pub mod journey;
pub mod report;
pub mod roster;

pub use domain::{ApplicantRecord, DashboardError, FinalOutcome};
pub use journey::{ApplicantJourney, JourneyStep, StepActor, StepStatus};
pub use report::EnrollmentReport;
pub use roster::{RosterQuery, RosterSort};
