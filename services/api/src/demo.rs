use crate::infra::{resolve_population, PopulationHandle};
use clap::Args;
use enroll_insight::config::AppConfig;
use enroll_insight::dashboards::enrollment::domain::{
    DashboardError, FinalOutcome, PaymentStatus,
};
use enroll_insight::dashboards::enrollment::export::write_csv;
use enroll_insight::dashboards::enrollment::journey::ApplicantJourney;
use enroll_insight::dashboards::enrollment::report::EnrollmentReport;
use enroll_insight::dashboards::enrollment::roster::{find_applicant, query_roster, RosterQuery};
use enroll_insight::error::AppError;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Population size (defaults to the configured session size)
    #[arg(long)]
    pub(crate) population: Option<usize>,
    /// Generator seed (defaults to the configured seed)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct JourneyArgs {
    /// Applicant to reconstruct, e.g. APP-1001
    pub(crate) applicant_id: String,
    #[arg(long)]
    pub(crate) population: Option<usize>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterArgs {
    /// Substring filter on applicant ids, e.g. app-102
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Keep only records with this final outcome, e.g. Fraud_Blacklist
    #[arg(long, value_parser = FinalOutcome::from_str)]
    pub(crate) outcome: Option<FinalOutcome>,
    /// Keep only records with this payment standing, e.g. Delayed
    #[arg(long, value_parser = PaymentStatus::from_str)]
    pub(crate) payment: Option<PaymentStatus>,
    #[arg(long)]
    pub(crate) population: Option<usize>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Output file; writes to stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    #[arg(long)]
    pub(crate) population: Option<usize>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[arg(long)]
    pub(crate) population: Option<usize>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Applicant to feature in the journey portion (defaults to the first)
    #[arg(long)]
    pub(crate) applicant_id: Option<String>,
}

fn load_population(
    population: Option<usize>,
    seed: Option<u64>,
) -> Result<PopulationHandle, AppError> {
    let config = AppConfig::load()?;
    Ok(resolve_population(&config.dashboard, population, seed)?)
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let population = load_population(args.population, args.seed)?;
    let report = EnrollmentReport::from_records(population.records());
    render_report(&report, population.seed());
    Ok(())
}

pub(crate) fn run_journey(args: JourneyArgs) -> Result<(), AppError> {
    let population = load_population(args.population, args.seed)?;
    let record = find_applicant(population.records(), &args.applicant_id)
        .ok_or_else(|| DashboardError::ApplicantNotFound(args.applicant_id.clone()))?;
    render_journey(&ApplicantJourney::reconstruct(record));
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let population = load_population(args.population, args.seed)?;
    let query = RosterQuery {
        search: args.search,
        outcome: args.outcome,
        payment: args.payment,
        sort: None,
    };
    let records = query_roster(population.records(), &query);

    println!(
        "{} of {} records match",
        records.len(),
        population.records().len()
    );
    for record in &records {
        println!(
            "  {}  {}  attempts {}  waitlist {:>4.1}d  {:<8} {}",
            record.applicant_id,
            record.date_applied,
            record.verification_attempts,
            record.days_on_waitlist,
            record.payment_status.label(),
            record.final_outcome.label()
        );
    }
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let population = load_population(args.population, args.seed)?;
    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_csv(population.records(), file)?;
            println!(
                "wrote {} records to {}",
                population.records().len(),
                path.display()
            );
        }
        None => {
            write_csv(population.records(), io::stdout().lock())?;
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let population = load_population(args.population, args.seed)?;

    let report = EnrollmentReport::from_records(population.records());
    render_report(&report, population.seed());

    let applicant_id = args.applicant_id.unwrap_or_else(|| {
        population
            .records()
            .first()
            .map(|record| record.applicant_id.clone())
            .unwrap_or_default()
    });
    let record = find_applicant(population.records(), &applicant_id)
        .ok_or_else(|| DashboardError::ApplicantNotFound(applicant_id.clone()))?;

    println!();
    render_journey(&ApplicantJourney::reconstruct(record));
    Ok(())
}

fn render_report(report: &EnrollmentReport, seed: u64) {
    println!(
        "Enrollment report - population {} (seed {})",
        report.population, seed
    );

    println!("\nFunnel:");
    for stage in &report.funnel {
        println!("  {:<18} {}", stage.stage, stage.count);
    }

    println!("\nOutcomes:");
    for slice in &report.outcomes {
        println!("  {:<16} {}", slice.outcome_label, slice.count);
    }

    println!("\nSLA health:");
    for snapshot in &report.sla {
        println!(
            "  {:<22} mean {:>5.1}d (target {}d, {} violations)",
            snapshot.stage, snapshot.mean_days, snapshot.target_days, snapshot.violations
        );
    }

    println!(
        "\nKPIs: fraud rate {}%, waitlist conversion {}%, avg cycle {}d, dunning risk {}%",
        report.fraud.rate_pct,
        report.waitlist.conversion_pct,
        report.cycle.mean_days,
        report.payments.dunning_rate_pct
    );

    if report.alerts.is_empty() {
        println!("\nNo active alerts.");
    } else {
        println!("\nActive alerts:");
        for alert in &report.alerts {
            println!(
                "  [{}] {} - {} {}",
                alert.severity_label, alert.applicant_id, alert.kind_label, alert.detail
            );
        }
    }
}

fn render_journey(journey: &ApplicantJourney) {
    println!(
        "Journey for {} (outcome: {})",
        journey.applicant_id(),
        journey.final_outcome().label()
    );

    let highlighted = journey.enrolled_completion();
    for step in journey.steps() {
        let marker = if highlighted == Some(step.position) {
            "*"
        } else {
            " "
        };
        let dates = if step.duration_days > 0 {
            format!("{} -> {}", step.start, step.end)
        } else {
            step.start.to_string()
        };
        let sla = step
            .sla_days
            .map(|days| format!(" (SLA {days}d)"))
            .unwrap_or_default();
        println!(
            "{} {}. {:<24} [{}] {} - {}d{} - {}",
            marker,
            step.position + 1,
            step.title,
            step.status_label,
            dates,
            step.duration_days,
            sla,
            step.detail
        );
    }

    // Keep stdout flushed when the demo is piped.
    let _ = io::stdout().flush();
}
