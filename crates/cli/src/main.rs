//! `o2c` - scripted walkthrough of the order-to-cash simulation.
//!
//! # Environment Variables
//!
//! - `O2C_SCENARIO`: starting scenario (`a`/`standard`, `b`/`stockout`, `c`/`crisis`)
//! - `O2C_LATENCY_SCALE`: latency multiplier (`0` runs instantly)
//! - `RUST_LOG`: log filter (logs are written to stderr)

mod script;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use o2c_catalog::{Scenario, ScenarioCatalog};
use o2c_sim::{RunSnapshot, SimConfig, Simulator};

use crate::script::Script;

/// Order-to-cash process simulator
#[derive(Parser, Debug)]
#[command(name = "o2c")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Human-readable logs instead of JSON
    #[arg(long, global = true)]
    compact_logs: bool,

    /// Fallback log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive one purchase order from PO receipt to cash
    Run(RunArgs),
    /// List the scenarios and their starting inventory
    Scenarios,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Scenario to run
    #[arg(short, long, env = "O2C_SCENARIO")]
    scenario: Option<Scenario>,

    /// Multiplier for simulated latencies (0 disables pauses)
    #[arg(long, env = "O2C_LATENCY_SCALE")]
    latency_scale: Option<f64>,

    /// Reject the credit check once, then retry
    #[arg(long)]
    reject_credit: bool,

    /// Have the customer refuse the shipment once, then retry
    #[arg(long)]
    refuse_shipment: bool,

    /// Have the customer dispute the invoice once, then retry
    #[arg(long)]
    dispute_invoice: bool,

    /// Enter this picked quantity first (shows the validation error)
    #[arg(long, value_name = "QTY")]
    mistype_pick: Option<String>,

    /// Print the full snapshot after every step as JSON lines
    #[arg(long)]
    snapshots: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = if cli.compact_logs {
        o2c_observability::LogFormat::Compact
    } else {
        o2c_observability::LogFormat::Json
    };
    o2c_observability::init_with(&cli.log_level, format);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Scenarios => scenarios(),
    }
}

fn scenarios() -> Result<()> {
    for entry in ScenarioCatalog.entries() {
        println!(
            "{:<60} finished goods {:>3}, raw materials {:>3}",
            entry.scenario.title(),
            entry.inventory.finished_goods,
            entry.inventory.raw_materials
        );
    }
    Ok(())
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = SimConfig::from_env();
    if let Some(scenario) = args.scenario {
        config = config.with_scenario(scenario);
    }
    if let Some(scale) = args.latency_scale {
        config = config.with_latency_scale(scale);
    }

    let sim = Simulator::new(config);
    let mut script = Script {
        reject_credit: args.reject_credit,
        refuse_shipment: args.refuse_shipment,
        dispute_invoice: args.dispute_invoice,
        mistyped_pick: args.mistype_pick,
    };

    let mut snapshot = sim.snapshot();
    println!("{}", snapshot.scenario_title);
    while let Some(action) = script.next_action(&snapshot) {
        let name = action.name();
        snapshot = match sim.dispatch(action).await {
            Ok(next) => next,
            Err(err) => {
                println!("  ! {name}: {err}");
                sim.snapshot()
            }
        };
        report(name, &snapshot, args.snapshots)?;
    }

    let summary = sim
        .summary()
        .context("run stopped before reaching the Complete stage")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize run summary")?
    );
    Ok(())
}

fn report(action: &str, snapshot: &RunSnapshot, full: bool) -> Result<()> {
    if full {
        println!("{}", serde_json::to_string(snapshot).context("serialize snapshot")?);
        return Ok(());
    }
    let substate = match &snapshot.substate {
        Some(substate) => serde_json::to_string(substate).context("serialize sub-state")?,
        None => "-".to_string(),
    };
    println!("  [{}] {action} -> {substate}", snapshot.stage_label);
    Ok(())
}
