use super::domain::ApplicantRecord;
use std::io::Write;

/// Column order matches `ApplicantRecord` field declaration order.
pub const CSV_COLUMNS: [&str; 16] = [
    "Applicant_ID",
    "Date_Applied",
    "Identity_Verification_Status",
    "Verification_Attempts",
    "Sanction_Status",
    "Integrity_Check_Duration",
    "Capacity_Status",
    "Days_On_Waitlist",
    "Document_Submission_Time",
    "Institution_Validation_Time",
    "Scholarship_Requested",
    "Scholarship_Amount",
    "Scholarship_Approval_Time",
    "Payment_Status",
    "Months_Delayed",
    "Final_Outcome",
];

pub const CSV_FILENAME: &str = "student_enrollment_mock_data.csv";

/// Serialize the raw record population: one header row, one row per record.
/// The header is written explicitly so an empty population still produces a
/// well-formed file.
pub fn write_csv<W: Write>(records: &[ApplicantRecord], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[ApplicantRecord]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
