use super::domain::{
    ApplicantRecord, CapacityStatus, FinalOutcome, IdentityStatus, PaymentStatus, SanctionStatus,
};
use super::journey::{
    CAPACITY_SLA_DAYS, INTEGRITY_SLA_DAYS, SUBMISSION_SLA_DAYS, VALIDATION_SLA_DAYS,
};
use serde::Serialize;

/// Aggregate view over the whole record population: funnel, SLA health,
/// financial standing, and the operational alert feed. Pure reduction over
/// the record list; every ratio is guarded against an empty population.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentReport {
    pub population: usize,
    pub funnel: Vec<FunnelStage>,
    pub outcomes: Vec<OutcomeSlice>,
    pub capacity: Vec<CapacitySlice>,
    pub sla: Vec<SlaSnapshot>,
    pub fraud: FraudSummary,
    pub waitlist: WaitlistSummary,
    pub cycle: CycleSummary,
    pub payments: PaymentSummary,
    pub scholarships: ScholarshipSummary,
    pub alerts: Vec<OperationalAlert>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunnelStage {
    pub stage: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeSlice {
    pub outcome: FinalOutcome,
    pub outcome_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapacitySlice {
    pub status: CapacityStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlaSnapshot {
    pub stage: &'static str,
    pub target_days: u32,
    pub mean_days: f64,
    pub violations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FraudSummary {
    pub flagged: usize,
    pub rate_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaitlistSummary {
    pub waitlisted: usize,
    pub enrolled_from_waitlist: usize,
    pub conversion_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub mean_days: f64,
    pub bins: Vec<CycleBin>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleBin {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummary {
    pub enrolled: usize,
    pub on_time: usize,
    pub delayed: usize,
    /// Two to three months behind.
    pub dunning: usize,
    /// Four or more months behind.
    pub collection: usize,
    pub dunning_rate_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipSummary {
    pub requested: usize,
    pub mean_approval_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PaymentArrears,
    WaitlistExpired,
    IntegrityOverdue,
}

impl AlertKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PaymentArrears => "Payment Arrears",
            Self::WaitlistExpired => "Waitlist Expired",
            Self::IntegrityOverdue => "Integrity Check Overdue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationalAlert {
    pub applicant_id: String,
    pub kind: AlertKind,
    pub kind_label: &'static str,
    pub severity: AlertSeverity,
    pub severity_label: &'static str,
    pub detail: String,
}

impl OperationalAlert {
    fn new(applicant_id: &str, kind: AlertKind, severity: AlertSeverity, detail: String) -> Self {
        Self {
            applicant_id: applicant_id.to_owned(),
            kind,
            kind_label: kind.label(),
            severity,
            severity_label: severity.label(),
            detail,
        }
    }
}

impl EnrollmentReport {
    pub fn from_records(records: &[ApplicantRecord]) -> Self {
        let population = records.len();

        let identity_verified = records
            .iter()
            .filter(|r| r.identity_status == IdentityStatus::Success)
            .count();
        let sanctions_cleared = records
            .iter()
            .filter(|r| {
                r.identity_status == IdentityStatus::Success
                    && r.sanction_status == SanctionStatus::Cleared
            })
            .count();
        let capacity_accepted = records
            .iter()
            .filter(|r| {
                r.identity_status == IdentityStatus::Success
                    && r.sanction_status == SanctionStatus::Cleared
                    && r.capacity_status != CapacityStatus::Rejected
            })
            .count();
        let enrolled_count = records
            .iter()
            .filter(|r| r.final_outcome == FinalOutcome::Enrolled)
            .count();

        let funnel = vec![
            FunnelStage {
                stage: "Applied",
                count: population,
            },
            FunnelStage {
                stage: "Identity Verified",
                count: identity_verified,
            },
            FunnelStage {
                stage: "Sanctions Cleared",
                count: sanctions_cleared,
            },
            FunnelStage {
                stage: "Capacity Accepted",
                count: capacity_accepted,
            },
            FunnelStage {
                stage: "Enrolled",
                count: enrolled_count,
            },
        ];

        let outcomes = FinalOutcome::ordered()
            .into_iter()
            .map(|outcome| OutcomeSlice {
                outcome,
                outcome_label: outcome.label(),
                count: records
                    .iter()
                    .filter(|r| r.final_outcome == outcome)
                    .count(),
            })
            .collect();

        let capacity = CapacityStatus::ordered()
            .into_iter()
            .map(|status| CapacitySlice {
                status,
                status_label: status.label(),
                count: records
                    .iter()
                    .filter(|r| r.capacity_status == status)
                    .count(),
            })
            .collect();

        let sla = vec![
            SlaSnapshot {
                stage: "Sanctions & Integrity",
                target_days: INTEGRITY_SLA_DAYS,
                mean_days: mean(records.iter().map(|r| r.integrity_check_days), population),
                violations: records
                    .iter()
                    .filter(|r| r.integrity_check_days > f64::from(INTEGRITY_SLA_DAYS))
                    .count(),
            },
            SlaSnapshot {
                stage: "Capacity Check",
                target_days: CAPACITY_SLA_DAYS,
                mean_days: mean(records.iter().map(|r| r.days_on_waitlist), population),
                violations: records
                    .iter()
                    .filter(|r| r.days_on_waitlist > f64::from(CAPACITY_SLA_DAYS))
                    .count(),
            },
            SlaSnapshot {
                stage: "Document Submission",
                target_days: SUBMISSION_SLA_DAYS,
                mean_days: mean(
                    records.iter().map(|r| r.document_submission_days),
                    population,
                ),
                violations: records
                    .iter()
                    .filter(|r| r.document_submission_days > f64::from(SUBMISSION_SLA_DAYS))
                    .count(),
            },
            SlaSnapshot {
                stage: "Institution Validation",
                target_days: VALIDATION_SLA_DAYS,
                mean_days: mean(
                    records.iter().map(|r| r.institution_validation_days),
                    population,
                ),
                violations: records
                    .iter()
                    .filter(|r| r.institution_validation_days > f64::from(VALIDATION_SLA_DAYS))
                    .count(),
            },
        ];

        let fraud_flagged = records.iter().filter(|r| r.fraud_flagged()).count();
        let fraud = FraudSummary {
            flagged: fraud_flagged,
            rate_pct: pct(fraud_flagged, population),
        };

        let waitlisted = records.iter().filter(|r| r.days_on_waitlist > 0.0).count();
        let enrolled_from_waitlist = records
            .iter()
            .filter(|r| r.days_on_waitlist > 0.0 && r.final_outcome == FinalOutcome::Enrolled)
            .count();
        let waitlist = WaitlistSummary {
            waitlisted,
            enrolled_from_waitlist,
            conversion_pct: pct(enrolled_from_waitlist, waitlisted),
        };

        let mut bins = [0usize; 4];
        for record in records {
            let cycle_days = record.cycle_time_days();
            let slot = if cycle_days < 20.0 {
                0
            } else if cycle_days < 40.0 {
                1
            } else if cycle_days < 60.0 {
                2
            } else {
                3
            };
            bins[slot] += 1;
        }
        let cycle = CycleSummary {
            mean_days: mean(records.iter().map(ApplicantRecord::cycle_time_days), population),
            bins: vec![
                CycleBin {
                    label: "< 20 days",
                    count: bins[0],
                },
                CycleBin {
                    label: "20-40 days",
                    count: bins[1],
                },
                CycleBin {
                    label: "40-60 days",
                    count: bins[2],
                },
                CycleBin {
                    label: "> 60 days",
                    count: bins[3],
                },
            ],
        };

        let enrolled: Vec<&ApplicantRecord> = records
            .iter()
            .filter(|r| r.final_outcome == FinalOutcome::Enrolled)
            .collect();
        let delayed = enrolled
            .iter()
            .filter(|r| r.payment_status == PaymentStatus::Delayed)
            .count();
        let dunning = enrolled
            .iter()
            .filter(|r| {
                r.payment_status == PaymentStatus::Delayed
                    && (2..=3).contains(&r.months_delayed)
            })
            .count();
        let collection = enrolled
            .iter()
            .filter(|r| r.payment_status == PaymentStatus::Delayed && r.months_delayed >= 4)
            .count();
        let dunning_risk = enrolled
            .iter()
            .filter(|r| r.payment_status == PaymentStatus::Delayed && r.months_delayed > 2)
            .count();
        let payments = PaymentSummary {
            enrolled: enrolled.len(),
            on_time: enrolled.len() - delayed,
            delayed,
            dunning,
            collection,
            dunning_rate_pct: pct(dunning_risk, enrolled.len()),
        };

        let requested: Vec<&ApplicantRecord> = records
            .iter()
            .filter(|r| r.scholarship_requested.requested())
            .collect();
        let scholarships = ScholarshipSummary {
            requested: requested.len(),
            mean_approval_days: mean(
                requested
                    .iter()
                    .map(|r| f64::from(r.scholarship_approval_days)),
                requested.len(),
            ),
        };

        let alerts = collect_alerts(records);

        Self {
            population,
            funnel,
            outcomes,
            capacity,
            sla,
            fraud,
            waitlist,
            cycle,
            payments,
            scholarships,
            alerts,
        }
    }
}

fn collect_alerts(records: &[ApplicantRecord]) -> Vec<OperationalAlert> {
    let mut alerts = Vec::new();

    for record in records {
        if record.payment_status == PaymentStatus::Delayed && record.months_delayed >= 2 {
            let severity = if record.months_delayed >= 4 {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            alerts.push(OperationalAlert::new(
                &record.applicant_id,
                AlertKind::PaymentArrears,
                severity,
                format!("Payment delayed by {} months.", record.months_delayed),
            ));
        }
    }

    for record in records {
        if record.days_on_waitlist > f64::from(CAPACITY_SLA_DAYS) {
            alerts.push(OperationalAlert::new(
                &record.applicant_id,
                AlertKind::WaitlistExpired,
                AlertSeverity::Warning,
                format!("Waitlist expired ({} days).", record.days_on_waitlist),
            ));
        }
    }

    for record in records {
        if record.integrity_check_days > f64::from(INTEGRITY_SLA_DAYS) {
            alerts.push(OperationalAlert::new(
                &record.applicant_id,
                AlertKind::IntegrityOverdue,
                AlertSeverity::Warning,
                format!(
                    "Integrity check exceeded {} days ({}).",
                    INTEGRITY_SLA_DAYS, record.integrity_check_days
                ),
            ));
        }
    }

    alerts
}

fn mean<I: Iterator<Item = f64>>(values: I, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = values.sum();
    round1(sum / count as f64)
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
