use clap::{Parser, Subcommand};
use lc_stp::config::AppConfig;
use lc_stp::error::AppError;
use lc_stp::telemetry;

use crate::demo::{
    run_decide, run_demo, run_draft, run_examine, run_kyc, DecideArgs, DemoArgs, DraftArgs,
    ExamineArgs, KycArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "LC Issuance Console",
    about = "Drive the letter of credit STP pipeline from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an end-to-end scripted demo: intake, draft, decision, examination
    Demo(DemoArgs),
    /// Generate the pre-draft and SWIFT MT700 for an application JSON file
    Draft(DraftArgs),
    /// Run the collateral adequacy decision for explicit inputs
    Decide(DecideArgs),
    /// Examine a presentation JSON file against an application JSON file
    Examine(ExamineArgs),
    /// Verify a company against the local KYC registry
    Kyc(KycArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli.command.unwrap_or_else(|| Command::Demo(DemoArgs::default()));
    match command {
        Command::Demo(args) => run_demo(args, &config),
        Command::Draft(args) => run_draft(args, &config),
        Command::Decide(args) => run_decide(args),
        Command::Examine(args) => run_examine(args),
        Command::Kyc(args) => run_kyc(args, &config),
    }
}
