//! restcheck - Main Entry Point
//!
//! Loads the configuration, wires the adapters into the suite runner and
//! maps the outcome to the process exit code.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use restcheck_application::{ResourceClient, RunSuite, Scenario};
use restcheck_domain::SuiteSummary;
use restcheck_infrastructure::{
    FileEvidenceStore, FileFailureLog, RandomFixtures, ReqwestHttpClient, SuiteConfig,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.list {
        print_catalog();
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(error) => {
            tracing::error!(%error, "suite could not start");
            eprintln!("error: {error}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: &Cli) -> Result<SuiteSummary, Box<dyn std::error::Error>> {
    let config = SuiteConfig::load(cli.config.as_deref())?;
    let scenarios = cli.selection()?;

    tracing::info!(
        "Starting restcheck v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );

    let http = ReqwestHttpClient::with_options(&config.transport())?;
    let client = ResourceClient::new(Arc::new(http), config.endpoint()?);
    let evidence = Arc::new(FileEvidenceStore::new(&config.report_dir));

    let suite = RunSuite::new(client, Arc::new(RandomFixtures::new()))
        .with_conventions(config.conventions.clone())
        .with_failure_sink(Arc::new(FileFailureLog::new(&config.failure_log)))
        .with_evidence_sink(evidence.clone());

    let summary = suite.execute(&scenarios).await;
    if let Err(error) = evidence.write_summary(&summary).await {
        tracing::error!(%error, "failed to write run summary");
    }
    print_summary(&summary);
    Ok(summary)
}

fn print_catalog() {
    for scenario in Scenario::all() {
        let meta = scenario.metadata();
        println!(
            "{:<26} {:<9} {:<28} [{}]",
            scenario.identifier(),
            meta.severity,
            meta.story,
            meta.tags.join(", ")
        );
    }
}

fn print_summary(summary: &SuiteSummary) {
    for outcome in &summary.outcomes {
        let mark = if outcome.passed() { "PASSED" } else { "FAILED" };
        println!("{} - {mark} ({} ms)", outcome.identifier, outcome.duration_ms);
        if let Some(failure) = &outcome.failure {
            println!("    {failure}");
        }
    }
    println!(
        "\n{} scenarios: {} passed, {} failed in {} ms",
        summary.total, summary.passed, summary.failed, summary.duration_ms
    );
}
