use super::domain::{
    ApplicantRecord, CapacityStatus, DashboardError, FinalOutcome, IdentityStatus, PaymentStatus,
    SanctionStatus, ScholarshipRequested,
};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_POPULATION_SIZE: usize = 50;
pub const DEFAULT_POPULATION_SEED: u64 = 2023;
pub const MAX_POPULATION_SIZE: usize = 10_000;

const SCHOLARSHIP_AMOUNTS: [u32; 6] = [150, 180, 250, 300, 350, 500];

pub fn validate_population_size(size: usize) -> Result<(), DashboardError> {
    if size == 0 || size > MAX_POPULATION_SIZE {
        return Err(DashboardError::PopulationSize {
            got: size,
            max: MAX_POPULATION_SIZE,
        });
    }
    Ok(())
}

/// Produce a synthetic applicant population. Deterministic for a given
/// `(size, seed)` pair; records exist only in memory for the session.
///
/// The probability model mirrors the historical mock dataset: correlated
/// outcomes (failed identity implies a fraud blacklist when attempts exceed
/// three), waitlist expiry pressure past the 14-day SLA, and payment delays
/// confined to enrolled applicants.
pub fn generate_population(size: usize, seed: u64) -> Vec<ApplicantRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let window_start = application_window().0;
    let window_days = (application_window().1 - window_start).num_days();

    let mut records = Vec::with_capacity(size);
    for index in 0..size {
        let applicant_id = format!("APP-{}", 1000 + index);
        let date_applied = window_start + Duration::days(rng.gen_range(0..=window_days));

        let mut final_outcome = FinalOutcome::Enrolled;

        // Identity and fraud: 10% of applicants retry heavily; more than
        // three attempts is treated upstream as a fraud signal.
        let verification_attempts: u32 = if rng.gen_bool(0.1) {
            rng.gen_range(3..=6)
        } else {
            rng.gen_range(1..=3)
        };
        let mut identity_status = IdentityStatus::Success;
        if verification_attempts > 3 {
            identity_status = IdentityStatus::Failed;
            final_outcome = FinalOutcome::FraudBlacklist;
        } else if rng.gen_bool(0.05) {
            identity_status = IdentityStatus::Failed;
            final_outcome = FinalOutcome::Rejected;
        }

        let integrity_check_days = f64::from(rng.gen_range(1u32..=15));
        let mut sanction_status = SanctionStatus::Cleared;
        if rng.gen_bool(0.05) {
            sanction_status = SanctionStatus::Blocked;
            final_outcome = FinalOutcome::Rejected;
        }

        let mut capacity_status = CapacityStatus::Accepted;
        let mut days_on_waitlist = 0.0;
        if final_outcome != FinalOutcome::FraudBlacklist && final_outcome != FinalOutcome::Rejected
        {
            let roll: f64 = rng.gen();
            if roll < 0.6 {
                capacity_status = CapacityStatus::Accepted;
            } else if roll < 0.9 {
                capacity_status = CapacityStatus::Waitlisted;
                days_on_waitlist = f64::from(rng.gen_range(0u32..20));
                // Long waits usually expire the offer.
                if days_on_waitlist > 14.0 && rng.gen_bool(0.7) {
                    final_outcome = FinalOutcome::Expired;
                }
            } else {
                capacity_status = CapacityStatus::Rejected;
                final_outcome = FinalOutcome::Rejected;
            }
        }

        let document_submission_days = f64::from(rng.gen_range(1u32..=20));
        let institution_validation_days = f64::from(rng.gen_range(5u32..=44));
        if final_outcome == FinalOutcome::Enrolled
            && (document_submission_days > 21.0 || institution_validation_days > 35.0)
            && rng.gen_bool(0.4)
        {
            final_outcome = FinalOutcome::Expired;
        }

        let scholarship_requested = if rng.gen_bool(0.4) {
            ScholarshipRequested::Yes
        } else {
            ScholarshipRequested::No
        };
        let (scholarship_amount, scholarship_approval_days) = if scholarship_requested.requested() {
            (
                SCHOLARSHIP_AMOUNTS[rng.gen_range(0..SCHOLARSHIP_AMOUNTS.len())],
                rng.gen_range(1..=25),
            )
        } else {
            (0, 0)
        };

        let mut payment_status = PaymentStatus::OnTime;
        let mut months_delayed = 0;
        if final_outcome == FinalOutcome::Enrolled && rng.gen_bool(0.2) {
            payment_status = PaymentStatus::Delayed;
            months_delayed = rng.gen_range(1..=5);
        }

        records.push(ApplicantRecord {
            applicant_id,
            date_applied,
            identity_status,
            verification_attempts,
            sanction_status,
            integrity_check_days,
            capacity_status,
            days_on_waitlist,
            document_submission_days,
            institution_validation_days,
            scholarship_requested,
            scholarship_amount,
            scholarship_approval_days,
            payment_status,
            months_delayed,
            final_outcome,
        });
    }

    tracing::debug!(size, seed, "generated synthetic applicant population");
    records
}

fn application_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2023, 8, 1).expect("valid window start"),
        NaiveDate::from_ymd_opt(2023, 12, 1).expect("valid window end"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(validate_population_size(0).is_err());
        assert!(validate_population_size(MAX_POPULATION_SIZE + 1).is_err());
        assert!(validate_population_size(1).is_ok());
        assert!(validate_population_size(MAX_POPULATION_SIZE).is_ok());
    }

    #[test]
    fn same_seed_yields_identical_population() {
        let first = generate_population(80, 7);
        let second = generate_population(80, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn ids_are_sequential_and_dates_in_window() {
        let records = generate_population(25, 11);
        assert_eq!(records.len(), 25);
        assert_eq!(records[0].applicant_id, "APP-1000");
        assert_eq!(records[24].applicant_id, "APP-1024");

        let (start, end) = application_window();
        for record in &records {
            assert!(record.date_applied >= start && record.date_applied <= end);
        }
    }

    #[test]
    fn upholds_outcome_coupling_invariants() {
        for record in generate_population(500, 42) {
            if record.verification_attempts > 3 {
                assert_eq!(record.identity_status, IdentityStatus::Failed);
                assert_eq!(record.final_outcome, FinalOutcome::FraudBlacklist);
            }
            if record.capacity_status != CapacityStatus::Waitlisted {
                assert_eq!(record.days_on_waitlist, 0.0);
            }
            if record.payment_status == PaymentStatus::Delayed {
                assert_eq!(record.final_outcome, FinalOutcome::Enrolled);
                assert!((1..=5).contains(&record.months_delayed));
            } else {
                assert_eq!(record.months_delayed, 0);
            }
            if !record.scholarship_requested.requested() {
                assert_eq!(record.scholarship_amount, 0);
                assert_eq!(record.scholarship_approval_days, 0);
            }
        }
    }
}
