use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use sfc_msg_placement::api::report_dto::placement_report_dto::BatchReportDto;
use sfc_msg_placement::domain::generator::request_generator::{RequestParams, generate_requests};
use sfc_msg_placement::domain::generator::substrate_generator::{SubstrateParams, generate_substrate};
use sfc_msg_placement::domain::monitoring::vmf_placement::{VmfPlacement, place_monitors};
use sfc_msg_placement::domain::placement::cost_model::CostModel;
use sfc_msg_placement::domain::placement::placement_engine::{BatchOutcome, PlacementEngine};
use sfc_msg_placement::domain::scenario::Scenario;
use sfc_msg_placement::domain::utils::statistics::{
    create_report_file, log_summary, write_json_report, write_ledger_csv, write_monitor_csv, write_placement_csv,
};
use sfc_msg_placement::{load_scenario, logger, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "sfc-msg-placement", about = "Cost-aware SFC placement with host-disjoint backups")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Place the requests of a scenario file.
    Run {
        #[arg(long)]
        scenario: String,

        /// Cross-check every active chain against the exhaustive oracle.
        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Place a seeded random request batch on a seeded random substrate.
    Simulate {
        #[arg(long, default_value_t = 15)]
        hosts: u32,

        #[arg(long, default_value_t = 0.25)]
        edge_probability: f64,

        #[arg(long, default_value_t = 10)]
        requests: u32,

        #[arg(long, default_value_t = 10)]
        capacity: i64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Write the placement records as CSV.
    #[arg(long)]
    csv: Option<String>,

    /// Write the final ledger as CSV.
    #[arg(long)]
    ledger_csv: Option<String>,

    /// Write the whole outcome as JSON.
    #[arg(long)]
    json: Option<String>,

    /// Place monitoring functions on all used hosts and write them as CSV.
    #[arg(long)]
    monitoring: Option<String>,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { scenario, verify, output } => {
            let mut scenario: Scenario = load_scenario(&scenario).with_context(|| format!("Failed to load scenario '{}'", scenario))?;
            scenario.verify_optimality |= verify;

            let outcome = run_scenario(&mut scenario).context("Placement batch aborted")?;
            report(&outcome, &output)
        }
        Command::Simulate { hosts, edge_probability, requests, capacity, seed, verify, output } => {
            let mut rng = StdRng::seed_from_u64(seed);

            let substrate_params = SubstrateParams { num_hosts: hosts, edge_probability, cpu_per_host: capacity, ..SubstrateParams::default() };
            let (substrate, mut ledger) = generate_substrate(&mut rng, &substrate_params)?;

            let request_params = RequestParams { num_requests: requests, ..RequestParams::default() };
            let requests = generate_requests(&mut rng, &substrate.nodes(), &request_params)?;

            let engine = PlacementEngine::new(CostModel::default()).with_verification(verify);
            let outcome = engine.place_batch(&substrate, &requests, &mut ledger).context("Placement batch aborted")?;
            report(&outcome, &output)
        }
    }
}

fn report(outcome: &BatchOutcome, output: &OutputArgs) -> anyhow::Result<()> {
    log_summary(&outcome.records, &outcome.ledger);

    let monitors: Vec<VmfPlacement> = if output.monitoring.is_some() { place_monitors(&outcome.records) } else { Vec::new() };

    if let Some(path) = &output.csv {
        write_placement_csv(create_report_file(path)?, &outcome.records).with_context(|| format!("Failed to write '{}'", path))?;
    }
    if let Some(path) = &output.ledger_csv {
        write_ledger_csv(create_report_file(path)?, &outcome.ledger).with_context(|| format!("Failed to write '{}'", path))?;
    }
    if let Some(path) = &output.monitoring {
        write_monitor_csv(create_report_file(path)?, &monitors).with_context(|| format!("Failed to write '{}'", path))?;
    }
    if let Some(path) = &output.json {
        write_json_report(path, &BatchReportDto::new(outcome, &monitors)).with_context(|| format!("Failed to write '{}'", path))?;
    }

    let placed = format!("{} placed", outcome.records.len()).green();
    let rejected = format!("{} rejected", outcome.rejections.len()).red();
    println!("{}, {}, {} with backup, total cost {}", placed, rejected, outcome.backup_count(), outcome.total_cost());

    Ok(())
}
