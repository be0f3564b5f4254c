use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of the automated identity check run at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityStatus {
    Success,
    Failed,
}

impl IdentityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

impl FromStr for IdentityStatus {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Success" | "success" => Ok(Self::Success),
            "Failed" | "failed" => Ok(Self::Failed),
            other => Err(DashboardError::UnknownCategory {
                field: "identity status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Outcome of the sanctions and integrity screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SanctionStatus {
    Cleared,
    Blocked,
}

impl SanctionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cleared => "Cleared",
            Self::Blocked => "Blocked",
        }
    }
}

impl FromStr for SanctionStatus {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Cleared" | "cleared" => Ok(Self::Cleared),
            "Blocked" | "blocked" => Ok(Self::Blocked),
            other => Err(DashboardError::UnknownCategory {
                field: "sanction status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Result of the seat-capacity check, including the waitlist middle ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityStatus {
    Accepted,
    Waitlisted,
    Rejected,
}

impl CapacityStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Accepted, Self::Waitlisted, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Waitlisted => "Waitlisted",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for CapacityStatus {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Accepted" | "accepted" => Ok(Self::Accepted),
            "Waitlisted" | "waitlisted" => Ok(Self::Waitlisted),
            "Rejected" | "rejected" => Ok(Self::Rejected),
            other => Err(DashboardError::UnknownCategory {
                field: "capacity status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Whether the applicant asked for a scholarship. Kept as a closed variant
/// rather than a bare bool so the upstream "Yes"/"No" column decodes strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScholarshipRequested {
    Yes,
    No,
}

impl ScholarshipRequested {
    pub const fn requested(self) -> bool {
        matches!(self, Self::Yes)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl FromStr for ScholarshipRequested {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Yes" | "yes" => Ok(Self::Yes),
            "No" | "no" => Ok(Self::No),
            other => Err(DashboardError::UnknownCategory {
                field: "scholarship requested",
                value: other.to_owned(),
            }),
        }
    }
}

/// Tuition payment standing for enrolled applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Delayed => "Delayed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "On Time" | "OnTime" | "on_time" | "on time" => Ok(Self::OnTime),
            "Delayed" | "delayed" => Ok(Self::Delayed),
            other => Err(DashboardError::UnknownCategory {
                field: "payment status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Terminal outcome recorded on the summary row. Note this is an input label,
/// not something the dashboard derives; the journey reconstruction exposes it
/// verbatim even when it disagrees with the per-stage statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalOutcome {
    Enrolled,
    Rejected,
    #[serde(rename = "Fraud_Blacklist")]
    FraudBlacklist,
    Expired,
}

impl FinalOutcome {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Enrolled,
            Self::Rejected,
            Self::FraudBlacklist,
            Self::Expired,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Enrolled => "Enrolled",
            Self::Rejected => "Rejected",
            Self::FraudBlacklist => "Fraud Blacklist",
            Self::Expired => "Expired",
        }
    }
}

impl FromStr for FinalOutcome {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Enrolled" | "enrolled" => Ok(Self::Enrolled),
            "Rejected" | "rejected" => Ok(Self::Rejected),
            "Fraud_Blacklist" | "Fraud Blacklist" | "fraud_blacklist" => Ok(Self::FraudBlacklist),
            "Expired" | "expired" => Ok(Self::Expired),
            other => Err(DashboardError::UnknownCategory {
                field: "final outcome",
                value: other.to_owned(),
            }),
        }
    }
}

/// One applicant's summary row as supplied by the population generator.
///
/// Field serde names match the upstream dataset columns so the CSV export and
/// JSON payloads line up with what analysts already work with. Stage durations
/// are kept as `f64` days; the journey reconstruction rounds fractional counts
/// up before any date arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    #[serde(rename = "Applicant_ID")]
    pub applicant_id: String,
    #[serde(rename = "Date_Applied")]
    pub date_applied: NaiveDate,
    #[serde(rename = "Identity_Verification_Status")]
    pub identity_status: IdentityStatus,
    #[serde(rename = "Verification_Attempts")]
    pub verification_attempts: u32,
    #[serde(rename = "Sanction_Status")]
    pub sanction_status: SanctionStatus,
    #[serde(rename = "Integrity_Check_Duration")]
    pub integrity_check_days: f64,
    #[serde(rename = "Capacity_Status")]
    pub capacity_status: CapacityStatus,
    #[serde(rename = "Days_On_Waitlist")]
    pub days_on_waitlist: f64,
    #[serde(rename = "Document_Submission_Time")]
    pub document_submission_days: f64,
    #[serde(rename = "Institution_Validation_Time")]
    pub institution_validation_days: f64,
    #[serde(rename = "Scholarship_Requested")]
    pub scholarship_requested: ScholarshipRequested,
    #[serde(rename = "Scholarship_Amount")]
    pub scholarship_amount: u32,
    #[serde(rename = "Scholarship_Approval_Time")]
    pub scholarship_approval_days: u32,
    #[serde(rename = "Payment_Status")]
    pub payment_status: PaymentStatus,
    #[serde(rename = "Months_Delayed")]
    pub months_delayed: u32,
    #[serde(rename = "Final_Outcome")]
    pub final_outcome: FinalOutcome,
}

impl ApplicantRecord {
    /// Combined submission-to-validation duration used for cycle-time views.
    pub fn cycle_time_days(&self) -> f64 {
        self.document_submission_days + self.institution_validation_days
    }

    /// Matches the KPI definition of an identity-fraud flag.
    pub fn fraud_flagged(&self) -> bool {
        self.verification_attempts > 3 || self.identity_status == IdentityStatus::Failed
    }
}

/// Failures raised at the dashboard's API boundary. The core reconstruction
/// itself is total over well-formed records and has no error path.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("applicant '{0}' is not present in the session population")]
    ApplicantNotFound(String),
    #[error("population size must be between 1 and {max}, got {got}")]
    PopulationSize { got: usize, max: usize },
    #[error("unrecognized {field} value '{value}'")]
    UnknownCategory { field: &'static str, value: String },
}
