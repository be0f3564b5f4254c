use super::domain::{
    ApplicantRecord, CapacityStatus, FinalOutcome, IdentityStatus, SanctionStatus,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub const INTEGRITY_SLA_DAYS: u32 = 10;
pub const CAPACITY_SLA_DAYS: u32 = 14;
pub const SUBMISSION_SLA_DAYS: u32 = 14;
pub const VALIDATION_SLA_DAYS: u32 = 30;

/// Number of steps in an untruncated journey.
pub const FULL_JOURNEY_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Success,
    Warning,
    Failed,
}

impl StepStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepActor {
    Student,
    University,
    System,
}

impl StepActor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::University => "University",
            Self::System => "System",
        }
    }
}

/// One reconstructed stage of the enrollment process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyStep {
    pub position: usize,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub actor: StepActor,
    pub actor_label: &'static str,
    pub duration_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_days: Option<u32>,
    pub status: StepStatus,
    pub status_label: &'static str,
    pub detail: String,
}

/// The dated, actor-tagged, status-classified step chain for one applicant,
/// truncated at the first hard-failure boundary.
///
/// Reconstruction is a pure function of the record: the same record always
/// yields the same sequence, and every step starts where the previous one
/// ended. The list is rebuilt on demand for each detail view and owns nothing
/// beyond its own allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantJourney {
    applicant_id: String,
    final_outcome: FinalOutcome,
    steps: Vec<JourneyStep>,
}

impl ApplicantJourney {
    pub fn reconstruct(record: &ApplicantRecord) -> Self {
        let integrity_days = whole_days(record.integrity_check_days);
        let waitlist_days = whole_days(record.days_on_waitlist);
        let submission_days = whole_days(record.document_submission_days);
        let validation_days = whole_days(record.institution_validation_days);

        let t0 = record.date_applied;
        let t1 = t0 + Duration::days(i64::from(integrity_days));
        let t2 = t1 + Duration::days(i64::from(waitlist_days));
        let t3 = t2 + Duration::days(i64::from(submission_days));
        let t4 = t3 + Duration::days(i64::from(validation_days));

        let identity_status = match record.identity_status {
            IdentityStatus::Failed => StepStatus::Failed,
            IdentityStatus::Success if record.verification_attempts > 3 => StepStatus::Warning,
            IdentityStatus::Success => StepStatus::Success,
        };
        let sanctions_status = match record.sanction_status {
            SanctionStatus::Blocked => StepStatus::Failed,
            SanctionStatus::Cleared if integrity_days > INTEGRITY_SLA_DAYS => StepStatus::Warning,
            SanctionStatus::Cleared => StepStatus::Success,
        };
        let capacity_status = match record.capacity_status {
            CapacityStatus::Rejected => StepStatus::Failed,
            CapacityStatus::Waitlisted => StepStatus::Warning,
            CapacityStatus::Accepted => StepStatus::Success,
        };
        let submission_status = if submission_days > SUBMISSION_SLA_DAYS {
            StepStatus::Warning
        } else {
            StepStatus::Success
        };
        let validation_status = if validation_days > VALIDATION_SLA_DAYS {
            StepStatus::Warning
        } else {
            StepStatus::Success
        };
        let outcome_status = if record.final_outcome == FinalOutcome::Enrolled {
            StepStatus::Success
        } else {
            StepStatus::Failed
        };

        let outcome_detail = if record.final_outcome == FinalOutcome::Enrolled {
            let scholarship = if record.scholarship_requested.requested() {
                format!("${}", record.scholarship_amount)
            } else {
                "None".to_owned()
            };
            format!(
                "Payment: {}. Scholarship: {}.",
                record.payment_status.label(),
                scholarship
            )
        } else {
            "Enrollment process terminated.".to_owned()
        };

        let mut steps = vec![
            step(
                "Application Received".to_owned(),
                t0,
                t0,
                StepActor::Student,
                0,
                None,
                StepStatus::Success,
                "Initial application submitted via portal.".to_owned(),
            ),
            step(
                "Identity Verification".to_owned(),
                t0,
                t0,
                StepActor::System,
                0,
                None,
                identity_status,
                format!(
                    "Attempts: {}. Status: {}.",
                    record.verification_attempts,
                    record.identity_status.label()
                ),
            ),
            step(
                "Sanctions & Integrity".to_owned(),
                t0,
                t1,
                StepActor::University,
                integrity_days,
                Some(INTEGRITY_SLA_DAYS),
                sanctions_status,
                format!(
                    "Outcome: {}. Check duration: {} days.",
                    record.sanction_status.label(),
                    integrity_days
                ),
            ),
            step(
                "Capacity Check".to_owned(),
                t1,
                t2,
                StepActor::University,
                waitlist_days,
                Some(CAPACITY_SLA_DAYS),
                capacity_status,
                format!(
                    "Status: {}. Waitlist time: {} days.",
                    record.capacity_status.label(),
                    waitlist_days
                ),
            ),
            step(
                "Document Submission".to_owned(),
                t2,
                t3,
                StepActor::Student,
                submission_days,
                Some(SUBMISSION_SLA_DAYS),
                submission_status,
                format!("Time taken to submit docs: {} days.", submission_days),
            ),
            step(
                "Institution Validation".to_owned(),
                t3,
                t4,
                StepActor::University,
                validation_days,
                Some(VALIDATION_SLA_DAYS),
                validation_status,
                format!("Validation process duration: {} days.", validation_days),
            ),
            step(
                format!("Final Outcome: {}", record.final_outcome.label()),
                t4,
                t4,
                StepActor::System,
                0,
                None,
                outcome_status,
                outcome_detail,
            ),
        ];

        // The prefix is chosen by upstream hard failures alone; the summary
        // Final_Outcome field never shortens or extends the chain.
        let visible = if record.identity_status == IdentityStatus::Failed {
            2
        } else if record.sanction_status == SanctionStatus::Blocked {
            3
        } else if record.capacity_status == CapacityStatus::Rejected {
            4
        } else {
            FULL_JOURNEY_LEN
        };
        steps.truncate(visible);

        for (position, step) in steps.iter_mut().enumerate() {
            step.position = position;
        }

        Self {
            applicant_id: record.applicant_id.clone(),
            final_outcome: record.final_outcome,
            steps,
        }
    }

    pub fn applicant_id(&self) -> &str {
        &self.applicant_id
    }

    pub fn final_outcome(&self) -> FinalOutcome {
        self.final_outcome
    }

    pub fn steps(&self) -> &[JourneyStep] {
        &self.steps
    }

    /// Position of the terminal step when it represents a completed
    /// enrollment. Rendering layers give that step special treatment; the
    /// predicate lives here so presentation code never re-derives it.
    pub fn enrolled_completion(&self) -> Option<usize> {
        if self.steps.len() == FULL_JOURNEY_LEN && self.final_outcome == FinalOutcome::Enrolled {
            Some(self.steps.len() - 1)
        } else {
            None
        }
    }
}

/// Fractional day counts round up to the next whole day before any date
/// arithmetic or SLA comparison.
fn whole_days(days: f64) -> u32 {
    days.ceil().max(0.0) as u32
}

#[allow(clippy::too_many_arguments)]
fn step(
    title: String,
    start: NaiveDate,
    end: NaiveDate,
    actor: StepActor,
    duration_days: u32,
    sla_days: Option<u32>,
    status: StepStatus,
    detail: String,
) -> JourneyStep {
    JourneyStep {
        position: 0,
        title,
        start,
        end,
        actor,
        actor_label: actor.label(),
        duration_days,
        sla_days,
        status,
        status_label: status.label(),
        detail,
    }
}
