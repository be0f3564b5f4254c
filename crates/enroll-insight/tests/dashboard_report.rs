use chrono::NaiveDate;
use enroll_insight::dashboards::enrollment::domain::{
    ApplicantRecord, CapacityStatus, FinalOutcome, IdentityStatus, PaymentStatus, SanctionStatus,
    ScholarshipRequested,
};
use enroll_insight::dashboards::enrollment::report::{AlertKind, AlertSeverity, EnrollmentReport};

fn record(applicant_id: &str) -> ApplicantRecord {
    ApplicantRecord {
        applicant_id: applicant_id.to_owned(),
        date_applied: NaiveDate::from_ymd_opt(2023, 9, 1).expect("valid date"),
        identity_status: IdentityStatus::Success,
        verification_attempts: 1,
        sanction_status: SanctionStatus::Cleared,
        integrity_check_days: 5.0,
        capacity_status: CapacityStatus::Accepted,
        days_on_waitlist: 0.0,
        document_submission_days: 10.0,
        institution_validation_days: 20.0,
        scholarship_requested: ScholarshipRequested::No,
        scholarship_amount: 0,
        scholarship_approval_days: 0,
        payment_status: PaymentStatus::OnTime,
        months_delayed: 0,
        final_outcome: FinalOutcome::Enrolled,
    }
}

fn sample_population() -> Vec<ApplicantRecord> {
    // Waitlisted-then-enrolled applicant with payment trouble and SLA misses.
    let mut late_enrollee = record("APP-1000");
    late_enrollee.integrity_check_days = 12.0;
    late_enrollee.capacity_status = CapacityStatus::Waitlisted;
    late_enrollee.days_on_waitlist = 16.0;
    late_enrollee.payment_status = PaymentStatus::Delayed;
    late_enrollee.months_delayed = 5;
    late_enrollee.scholarship_requested = ScholarshipRequested::Yes;
    late_enrollee.scholarship_amount = 250;
    late_enrollee.scholarship_approval_days = 10;

    let clean_enrollee = record("APP-1001");

    let mut fraud_case = record("APP-1002");
    fraud_case.identity_status = IdentityStatus::Failed;
    fraud_case.verification_attempts = 5;
    fraud_case.document_submission_days = 30.0;
    fraud_case.institution_validation_days = 40.0;
    fraud_case.final_outcome = FinalOutcome::FraudBlacklist;

    let mut sanctioned = record("APP-1003");
    sanctioned.sanction_status = SanctionStatus::Blocked;
    sanctioned.document_submission_days = 5.0;
    sanctioned.institution_validation_days = 10.0;
    sanctioned.final_outcome = FinalOutcome::Rejected;

    let mut capacity_rejected = record("APP-1004");
    capacity_rejected.capacity_status = CapacityStatus::Rejected;
    capacity_rejected.final_outcome = FinalOutcome::Rejected;

    vec![
        late_enrollee,
        clean_enrollee,
        fraud_case,
        sanctioned,
        capacity_rejected,
    ]
}

#[test]
fn funnel_narrows_at_each_hard_gate() {
    let report = EnrollmentReport::from_records(&sample_population());
    let counts: Vec<usize> = report.funnel.iter().map(|stage| stage.count).collect();
    assert_eq!(counts, vec![5, 4, 3, 2, 2]);
    assert_eq!(report.funnel[0].stage, "Applied");
    assert_eq!(report.funnel[4].stage, "Enrolled");
}

#[test]
fn outcome_and_capacity_distributions_cover_every_variant() {
    let report = EnrollmentReport::from_records(&sample_population());

    let outcome_counts: Vec<usize> = report.outcomes.iter().map(|slice| slice.count).collect();
    // Ordered: Enrolled, Rejected, FraudBlacklist, Expired.
    assert_eq!(outcome_counts, vec![2, 2, 1, 0]);

    let capacity_counts: Vec<usize> = report.capacity.iter().map(|slice| slice.count).collect();
    // Ordered: Accepted, Waitlisted, Rejected.
    assert_eq!(capacity_counts, vec![3, 1, 1]);
}

#[test]
fn sla_snapshot_counts_strict_violations() {
    let report = EnrollmentReport::from_records(&sample_population());
    let violations: Vec<usize> = report.sla.iter().map(|snapshot| snapshot.violations).collect();
    // Integrity 12 > 10, waitlist 16 > 14, docs 30 > 14, validation 40 > 30.
    assert_eq!(violations, vec![1, 1, 1, 1]);
    assert_eq!(report.sla[0].target_days, 10);
    assert_eq!(report.sla[3].target_days, 30);
}

#[test]
fn kpi_rates_match_hand_computed_values() {
    let report = EnrollmentReport::from_records(&sample_population());

    assert_eq!(report.fraud.flagged, 1);
    assert_eq!(report.fraud.rate_pct, 20.0);

    assert_eq!(report.waitlist.waitlisted, 1);
    assert_eq!(report.waitlist.enrolled_from_waitlist, 1);
    assert_eq!(report.waitlist.conversion_pct, 100.0);

    assert_eq!(report.cycle.mean_days, 35.0);
    let bin_counts: Vec<usize> = report.cycle.bins.iter().map(|bin| bin.count).collect();
    assert_eq!(bin_counts, vec![1, 3, 0, 1]);

    assert_eq!(report.payments.enrolled, 2);
    assert_eq!(report.payments.on_time, 1);
    assert_eq!(report.payments.delayed, 1);
    assert_eq!(report.payments.dunning, 0);
    assert_eq!(report.payments.collection, 1);
    assert_eq!(report.payments.dunning_rate_pct, 50.0);

    assert_eq!(report.scholarships.requested, 1);
    assert_eq!(report.scholarships.mean_approval_days, 10.0);
}

#[test]
fn alert_feed_flags_arrears_waitlist_and_integrity() {
    let report = EnrollmentReport::from_records(&sample_population());
    assert_eq!(report.alerts.len(), 3);

    let arrears = &report.alerts[0];
    assert_eq!(arrears.kind, AlertKind::PaymentArrears);
    assert_eq!(arrears.severity, AlertSeverity::Critical);
    assert_eq!(arrears.applicant_id, "APP-1000");
    assert_eq!(arrears.detail, "Payment delayed by 5 months.");

    assert_eq!(report.alerts[1].kind, AlertKind::WaitlistExpired);
    assert_eq!(report.alerts[2].kind, AlertKind::IntegrityOverdue);
    assert_eq!(report.alerts[2].severity, AlertSeverity::Warning);
}

#[test]
fn empty_population_produces_zeroes_without_panicking() {
    let report = EnrollmentReport::from_records(&[]);
    assert_eq!(report.population, 0);
    assert!(report.funnel.iter().all(|stage| stage.count == 0));
    assert_eq!(report.fraud.rate_pct, 0.0);
    assert_eq!(report.waitlist.conversion_pct, 0.0);
    assert_eq!(report.cycle.mean_days, 0.0);
    assert_eq!(report.payments.dunning_rate_pct, 0.0);
    assert_eq!(report.scholarships.mean_approval_days, 0.0);
    assert!(report.alerts.is_empty());
}

#[test]
fn dunning_band_splits_at_four_months() {
    let mut mild = record("APP-2000");
    mild.payment_status = PaymentStatus::Delayed;
    mild.months_delayed = 2;

    let mut severe = record("APP-2001");
    severe.payment_status = PaymentStatus::Delayed;
    severe.months_delayed = 4;

    let report = EnrollmentReport::from_records(&[mild, severe]);
    assert_eq!(report.payments.dunning, 1);
    assert_eq!(report.payments.collection, 1);
    // Only the >2 month case counts toward dunning risk.
    assert_eq!(report.payments.dunning_rate_pct, 50.0);

    assert_eq!(report.alerts[0].severity, AlertSeverity::Warning);
    assert_eq!(report.alerts[1].severity, AlertSeverity::Critical);
}
