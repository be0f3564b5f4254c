use crate::demo::{
    run_demo, run_export, run_journey, run_report, run_roster, DemoArgs, ExportArgs, JourneyArgs,
    ReportArgs, RosterArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use enroll_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Enrollment Insight",
    about = "Serve and explore the synthetic university-enrollment analytics dashboard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the aggregate enrollment report for a generated population
    Report(ReportArgs),
    /// Reconstruct and print one applicant's journey timeline
    Journey(JourneyArgs),
    /// Filter and print the record roster
    Roster(RosterArgs),
    /// Write the raw record population as CSV
    Export(ExportArgs),
    /// Run an end-to-end CLI demo covering the report and a sample journey
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured session population size
    #[arg(long)]
    pub(crate) population: Option<usize>,
    /// Override the configured population seed
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Journey(args) => run_journey(args),
        Command::Roster(args) => run_roster(args),
        Command::Export(args) => run_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
