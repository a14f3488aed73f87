use std::path::PathBuf;

use acredita::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, run_faculty_report, DemoArgs, FacultyReportArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Accreditation Tracker",
    about = "Track and serve university career accreditation statuses from the command line",
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
    /// Generate institution-wide accreditation reports
    Faculty {
        #[command(subcommand)]
        command: FacultyCommand,
    },
    /// Run an end-to-end CLI demo covering classification and period workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FacultyCommand {
    /// Classify every career in the directory and print the rollup
    Report(FacultyReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the store from a roster CSV export instead of the demo directory
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Faculty {
            command: FacultyCommand::Report(args),
        } => run_faculty_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
