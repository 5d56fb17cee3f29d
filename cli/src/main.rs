//! `ccash`: command-line queries against the ProPublica Campaign Finance API.
//!
//! Each subcommand maps onto one client operation and prints the
//! normalized records as pretty JSON. Configuration (API key, base URL,
//! default cycle, timeout) comes from `config.yaml` and `CC_`-prefixed
//! environment variables; `--cycle` overrides the configured default for
//! a single invocation.

// The whole point of this binary is printing to stdout.
#![allow(clippy::print_stdout)]

mod config;

use anyhow::Context;
use campaign_cash::{Chamber, Client, Cycle, HttpTransport, LeaderCategory};
use clap::{Parser, Subcommand};
use config::Config;
use serde::Serialize;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ccash", version, about = "Query campaign-finance filings by cycle")]
struct Cli {
    /// Filing cycle to query (an even election year, e.g. 2026).
    /// Defaults to the configured cycle.
    #[arg(long, global = true)]
    cycle: Option<u16>,

    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a single candidate by FEC id
    Candidate {
        /// FEC candidate id, e.g. H0NY01023
        fec_id: String,
    },
    /// Rank candidates by a financial category
    Leaders {
        /// Category slug, e.g. receipts_total. Omit to list the
        /// available categories.
        category: Option<LeaderCategory>,
    },
    /// Search candidates by name
    Search {
        /// Free-text name query
        query: String,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// List candidates recently added to the FEC rolls
    New {
        #[arg(long)]
        offset: Option<u32>,
    },
    /// List candidates for a state's seats
    Seats {
        /// Two-letter state code, e.g. NY
        state: String,
        /// Narrow to one chamber (house or senate)
        chamber: Option<Chamber>,
        /// Narrow to one district; requires a chamber
        district: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = Config::load_from(&cli.config).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.api.timeout_secs))
        .build()
        .context("building HTTP client")?;
    let client = Client::with_transport(HttpTransport::with_client(
        http,
        config.api.base_url,
        config.api.key,
    ))
    .default_cycle(Cycle::new(config.api.cycle));

    let cycle = cli.cycle.map(Cycle::new);

    match cli.command {
        Command::Candidate { fec_id } => {
            let candidate = client
                .find(&fec_id, cycle)
                .await?
                .with_context(|| format!("no filings found for candidate {fec_id}"))?;
            print_json(&candidate)?;
        }
        Command::Leaders { category: None } => {
            for category in LeaderCategory::ALL {
                println!("{:<22} {}", category.slug(), category.description());
            }
        }
        Command::Leaders {
            category: Some(category),
        } => {
            let leaders = client.leaders(category, cycle).await?;
            tracing::info!(category = %category, count = leaders.len(), "leaderboard fetched");
            print_json(&leaders)?;
        }
        Command::Search { query, offset } => {
            let matches = client.search(&query, cycle, offset).await?;
            tracing::info!(query, count = matches.len(), "search complete");
            print_json(&matches)?;
        }
        Command::New { offset } => {
            let fresh = client.new_candidates(cycle, offset).await?;
            print_json(&fresh)?;
        }
        Command::Seats {
            state,
            chamber,
            district,
            offset,
        } => {
            if district.is_some() && chamber.is_none() {
                anyhow::bail!("--district requires a chamber (house or senate)");
            }
            let seats = client.by_state(&state, chamber, district, cycle, offset).await?;
            tracing::info!(state, count = seats.len(), "seat listing fetched");
            print_json(&seats)?;
        }
    }

    Ok(())
}
