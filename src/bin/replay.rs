//! Match log auditor.
//!
//! Replays a recorded match and prints its settlement record and final
//! state digest as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use rust_tabletop::core::GameId;
use rust_tabletop::replay::{replay, MatchLog};
use rust_tabletop::rules::Settlement;

#[derive(Parser, Debug)]
#[command(name = "tabletop-replay")]
#[command(about = "Replay a match log and print its settlement", long_about = None)]
struct Args {
    /// Path to the match log (JSON)
    log: PathBuf,

    /// Also print the final state
    #[arg(long)]
    state: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    game: GameId,
    events_applied: usize,
    settlement: Settlement,
    digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<serde_json::Value>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_tabletop=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.log)
        .with_context(|| format!("reading {}", args.log.display()))?;
    let log: MatchLog = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.log.display()))?;

    let outcome = replay(&log).context("replay failed")?;

    let state = if args.state {
        Some(serde_json::to_value(&outcome.state).context("serializing final state")?)
    } else {
        None
    };
    let report = Report {
        game: log.config.game,
        events_applied: outcome.events_applied,
        settlement: outcome.result.settlement(),
        digest: outcome.digest.to_hex(),
        state,
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
