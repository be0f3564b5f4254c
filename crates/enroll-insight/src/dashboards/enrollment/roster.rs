use super::domain::{ApplicantRecord, FinalOutcome, PaymentStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable columns of the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterColumn {
    ApplicantId,
    DateApplied,
    VerificationAttempts,
    IntegrityCheckDays,
    DaysOnWaitlist,
    DocumentSubmissionDays,
    InstitutionValidationDays,
    ScholarshipAmount,
    MonthsDelayed,
    FinalOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RosterSort {
    pub column: RosterColumn,
    pub direction: SortDirection,
}

/// Filter and sort parameters for the record table. All fields optional; an
/// empty query returns the population in generation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub outcome: Option<FinalOutcome>,
    #[serde(default)]
    pub payment: Option<PaymentStatus>,
    #[serde(default)]
    pub sort: Option<RosterSort>,
}

/// Case-insensitive exact lookup used by the journey detail view.
pub fn find_applicant<'a>(
    records: &'a [ApplicantRecord],
    applicant_id: &str,
) -> Option<&'a ApplicantRecord> {
    records
        .iter()
        .find(|record| record.applicant_id.eq_ignore_ascii_case(applicant_id.trim()))
}

pub fn query_roster(records: &[ApplicantRecord], query: &RosterQuery) -> Vec<ApplicantRecord> {
    let mut result: Vec<ApplicantRecord> = records
        .iter()
        .filter(|record| {
            if let Some(search) = &query.search {
                let needle = search.trim().to_ascii_lowercase();
                if !needle.is_empty()
                    && !record
                        .applicant_id
                        .to_ascii_lowercase()
                        .contains(&needle)
                {
                    return false;
                }
            }
            if let Some(outcome) = query.outcome {
                if record.final_outcome != outcome {
                    return false;
                }
            }
            if let Some(payment) = query.payment {
                if record.payment_status != payment {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    if let Some(sort) = query.sort {
        result.sort_by(|a, b| {
            let ordering = compare(a, b, sort.column);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    result
}

fn compare(a: &ApplicantRecord, b: &ApplicantRecord, column: RosterColumn) -> Ordering {
    match column {
        RosterColumn::ApplicantId => a.applicant_id.cmp(&b.applicant_id),
        RosterColumn::DateApplied => a.date_applied.cmp(&b.date_applied),
        RosterColumn::VerificationAttempts => {
            a.verification_attempts.cmp(&b.verification_attempts)
        }
        RosterColumn::IntegrityCheckDays => {
            a.integrity_check_days.total_cmp(&b.integrity_check_days)
        }
        RosterColumn::DaysOnWaitlist => a.days_on_waitlist.total_cmp(&b.days_on_waitlist),
        RosterColumn::DocumentSubmissionDays => a
            .document_submission_days
            .total_cmp(&b.document_submission_days),
        RosterColumn::InstitutionValidationDays => a
            .institution_validation_days
            .total_cmp(&b.institution_validation_days),
        RosterColumn::ScholarshipAmount => a.scholarship_amount.cmp(&b.scholarship_amount),
        RosterColumn::MonthsDelayed => a.months_delayed.cmp(&b.months_delayed),
        RosterColumn::FinalOutcome => a.final_outcome.label().cmp(b.final_outcome.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::enrollment::generator::generate_population;

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = generate_population(20, 3);
        let query = RosterQuery {
            search: Some("app-100".to_owned()),
            ..RosterQuery::default()
        };
        let matched = query_roster(&records, &query);
        assert_eq!(matched.len(), 10, "APP-1000 through APP-1009 match");
    }

    #[test]
    fn sorts_descending_by_waitlist() {
        let records = generate_population(60, 9);
        let query = RosterQuery {
            sort: Some(RosterSort {
                column: RosterColumn::DaysOnWaitlist,
                direction: SortDirection::Descending,
            }),
            ..RosterQuery::default()
        };
        let sorted = query_roster(&records, &query);
        for pair in sorted.windows(2) {
            assert!(pair[0].days_on_waitlist >= pair[1].days_on_waitlist);
        }
    }

    #[test]
    fn outcome_filter_keeps_only_matching_rows() {
        let records = generate_population(100, 5);
        let query = RosterQuery {
            outcome: Some(FinalOutcome::Enrolled),
            ..RosterQuery::default()
        };
        let matched = query_roster(&records, &query);
        assert!(matched
            .iter()
            .all(|record| record.final_outcome == FinalOutcome::Enrolled));
    }

    #[test]
    fn exact_lookup_trims_and_ignores_case() {
        let records = generate_population(5, 1);
        let found = find_applicant(&records, "  app-1003 ").expect("applicant exists");
        assert_eq!(found.applicant_id, "APP-1003");
        assert!(find_applicant(&records, "APP-9999").is_none());
    }
}
