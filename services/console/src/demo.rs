use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use lc_stp::config::AppConfig;
use lc_stp::error::AppError;
use lc_stp::workflows::issuance::{
    calculate_fees, examine, CollateralDecisionEngine, DocumentPresentation, DraftStatus,
    FeeConfig, LcApplication, OutboxGateway,
};
use lc_stp::workflows::kyc::{verify, CompanyRegistry, CompanySubmission};
use tracing::info;

use crate::infra::{
    build_service, demo_application, demo_kyc_submission, demo_presentation, demo_registry,
    parse_date,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the processing date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Skip staging SWIFT drafts into the outbox directory.
    #[arg(long)]
    pub(crate) skip_outbox: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DraftArgs {
    /// Path to an application JSON file.
    pub(crate) application: PathBuf,
    /// Override the issue date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Also stage the MT700 draft into the outbox directory.
    #[arg(long)]
    pub(crate) stage: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Collateral type tag (FD, CASH, GOVT_BOND, LIQUID_SECURITY,
    /// RECEIVABLES, PROPERTY, MACHINERY).
    #[arg(long)]
    pub(crate) collateral_type: String,
    /// Collateral value.
    #[arg(long)]
    pub(crate) value: f64,
    /// LC face amount.
    #[arg(long)]
    pub(crate) amount: f64,
}

#[derive(Args, Debug)]
pub(crate) struct ExamineArgs {
    /// Path to an application JSON file.
    pub(crate) application: PathBuf,
    /// Path to a presentation JSON file.
    pub(crate) presentation: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct KycArgs {
    /// Path to a company submission JSON file; the seeded demo submission is
    /// used when omitted.
    pub(crate) submission: Option<PathBuf>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}: {err}", path.display()),
        ))
    })
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(68));
    println!("  {title}");
    println!("{}", "=".repeat(68));
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let (service, _repository) = build_service();
    let application = demo_application();
    let reference = application.reference.clone();

    banner("LC issuance STP demo");
    println!("Processing date: {as_of}");

    service.submit(application, "console-demo")?;
    let validation = service.validate(&reference)?;
    println!(
        "\nValidation: {}",
        if validation.valid { "PASS" } else { "FAIL" }
    );
    for warning in &validation.warnings {
        println!("  warning: {warning}");
    }

    let draft = service.generate_draft(&reference, as_of, "console-demo")?;
    if draft.status == DraftStatus::Success {
        println!(
            "\nPre-draft generated under {}",
            draft.lc_number.as_deref().unwrap_or("-")
        );
        let fees = draft.fee_schedule.as_ref().expect("fees on success");
        println!(
            "Fees: tenor {} months at {}%, grand total {:.2}",
            fees.tenor_months, fees.applied_rate_pct, fees.grand_total
        );
    }

    let outcome = service.run_decision(&reference, "console-demo", as_of)?;
    println!("\nCollateral decision: {}", outcome.decision.label());
    println!("  {}", outcome.reason);

    let record = service.get(&reference)?;
    let view = record.status_view();
    println!(
        "Application {} is now {} (STP {})",
        view.reference.as_str(),
        view.status,
        view.stp_decision
    );
    if let Some(mt700) = &record.artifacts.mt700_text {
        println!("\nMT700 draft ({} lines)", mt700.lines().count());
        if !args.skip_outbox {
            let gateway = OutboxGateway::new(&config.outbox.directory);
            let payload = gateway.dispatch_mt700(&record.application, as_of)?;
            println!("  {}", payload.authorization_note);
        }
    }

    service.record_presentation(demo_presentation(), "console-demo")?;
    let report = service.examine_documents(&reference, "console-demo")?;
    banner("Document examination");
    println!(
        "Verdict: {} (fatal {}, major {}, minor {})",
        report.summary.overall.label(),
        report.summary.fatal,
        report.summary.major,
        report.summary.minor
    );
    for finding in &report.discrepancies {
        println!(
            "  [{}] {}: {}",
            finding.severity.label(),
            finding.field,
            finding.description
        );
    }
    let notice = service.refusal_notice(&reference, as_of)?;
    println!("\nRefusal notice:\n{notice}");

    banner("KYC verification");
    let assessment = verify(&demo_kyc_submission(), &demo_registry());
    println!(
        "Decision: {} | risk score {}/100",
        assessment.decision.label(),
        assessment.risk_score
    );
    for reason in &assessment.reasons {
        println!("  - {reason}");
    }

    info!("demo run complete");
    Ok(())
}

pub(crate) fn run_draft(args: DraftArgs, config: &AppConfig) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let application: LcApplication = read_json(&args.application)?;

    let result = lc_stp::workflows::issuance::generate_draft(
        &application,
        &FeeConfig::default(),
        as_of,
    );
    match result.status {
        DraftStatus::Success => {
            println!("{}", result.draft_text.as_deref().unwrap_or_default());
            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }
            if args.stage {
                let gateway = OutboxGateway::new(&config.outbox.directory);
                let payload = gateway.dispatch_mt700(&application, as_of)?;
                eprintln!("{}", payload.authorization_note);
            }
        }
        DraftStatus::Error => {
            eprintln!("draft generation blocked; missing mandatory fields:");
            for label in &result.missing {
                eprintln!("  - {label}");
            }
            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }
        }
    }
    Ok(())
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let engine = CollateralDecisionEngine::default();
    let outcome = engine.decide(&args.collateral_type, args.value, args.amount);
    println!("Decision: {}", outcome.decision.label());
    match outcome.margin_pct {
        Some(haircut) => println!("Haircut: {haircut}%"),
        None => println!("Haircut: n/a"),
    }
    println!("Eligible value: {:.2}", outcome.eligible_value);
    println!("Reason: {}", outcome.reason);
    Ok(())
}

pub(crate) fn run_examine(args: ExamineArgs) -> Result<(), AppError> {
    let application: LcApplication = read_json(&args.application)?;
    let presentation: DocumentPresentation = read_json(&args.presentation)?;

    let report = examine(&application, &presentation);
    println!("Verdict: {}", report.summary.overall.label());
    println!(
        "Findings: {} (fatal {}, major {}, minor {})",
        report.summary.total, report.summary.fatal, report.summary.major, report.summary.minor
    );
    for finding in &report.discrepancies {
        println!(
            "  [{}] {} | credit: '{}' | documents: '{}'",
            finding.severity.label(),
            finding.description,
            finding.lc_value,
            finding.document_value
        );
    }

    let fees = calculate_fees(
        &application,
        &FeeConfig::default(),
        Local::now().date_naive(),
    );
    println!(
        "\nIndicative charges on this credit: grand total {:.2}",
        fees.grand_total
    );
    Ok(())
}

pub(crate) fn run_kyc(args: KycArgs, config: &AppConfig) -> Result<(), AppError> {
    let registry = CompanyRegistry::load(&config.kyc.registry_path)
        .map_err(AppError::Kyc)?;
    let registry = if registry.is_empty() {
        println!(
            "registry at {} is empty; using the seeded demo registry",
            config.kyc.registry_path.display()
        );
        demo_registry()
    } else {
        registry
    };

    let submission: CompanySubmission = match &args.submission {
        Some(path) => read_json(path)?,
        None => demo_kyc_submission(),
    };

    let assessment = verify(&submission, &registry);
    println!(
        "Decision: {} | risk score {}/100",
        assessment.decision.label(),
        assessment.risk_score
    );
    for reason in &assessment.reasons {
        println!("  - {reason}");
    }
    Ok(())
}
