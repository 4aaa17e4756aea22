use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use reachability::engine::converge_detailed;
use reachability::service::{converge_reports, ConnectivityService};
use reachability::storage::InMemoryStore;
use reachability::types::{AgentId, ObservationReport, TenantId};
use reachability::validation::validate_batch;
use reachability::Config;

#[derive(Parser)]
#[command(name = "reachability")]
#[command(about = "Converge multi-channel connectivity reports into one verdict", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "TOML config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge one JSON array of observations
    Converge {
        #[arg(help = "Input file, stdin when omitted")]
        input: Option<PathBuf>,

        #[arg(long, help = "Print per-channel winners alongside the verdict")]
        explain: bool,
    },
    /// Feed JSON-lines agent reports through an in-memory verdict store
    Replay {
        #[arg(help = "Input file, stdin when omitted")]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentReport {
    agent_id: AgentId,
    tenant_id: TenantId,
    observations: Vec<ObservationReport>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Converge { input, explain } => {
            run_converge(&config, input.as_deref(), explain)?
        }
        Commands::Replay { input } => run_replay(&config, input.as_deref()).await?,
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn run_converge(config: &Config, input: Option<&Path>, explain: bool) -> Result<()> {
    let reports: Vec<ObservationReport> =
        serde_json::from_str(&read_input(input)?).context("parsing observations")?;

    if !explain {
        let verdict = converge_reports(reports, &config.limits)?;
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    let observations = validate_batch(reports, &config.limits)?;
    let convergence = converge_detailed(&observations)?;
    let output = json!({
        "winners": convergence.winners,
        "state": convergence.state,
        "verdict": convergence.verdict,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn run_replay(config: &Config, input: Option<&Path>) -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let service = ConnectivityService::new(store, config.limits.clone());

    let raw = read_input(input)?;
    let mut applied = 0usize;
    let mut rejected = 0usize;

    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let report: AgentReport = match serde_json::from_str(line) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("line {}: unparseable report: {}", line_no + 1, e);
                rejected += 1;
                continue;
            }
        };

        match service
            .report_raw(report.agent_id, report.tenant_id, report.observations)
            .await
        {
            Ok(outcome) => {
                applied += 1;
                if let Some(change) = outcome.change {
                    println!("{}", serde_json::to_string(&change)?);
                }
            }
            Err(e) => {
                log::warn!("line {}: report skipped: {:#}", line_no + 1, e);
                rejected += 1;
            }
        }
    }

    log::info!("replay finished: {} applied, {} rejected", applied, rejected);

    let verdicts = service.list(None).await?;
    println!("{}", serde_json::to_string_pretty(&verdicts)?);

    Ok(())
}
