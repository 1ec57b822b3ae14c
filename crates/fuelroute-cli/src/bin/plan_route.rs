//! Plan the shortest and cheapest tour for a scenario file.

use clap::{Parser, ValueEnum};
use fuelroute_cli::{plan, Config, Scenario};
use fuelroute_core::RouteMode;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Fly the waypoints in the order given
    Static,
    /// Search every ordering
    Dynamic,
}

impl From<ModeArg> for RouteMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Static => RouteMode::Static,
            ModeArg::Dynamic => RouteMode::Dynamic,
        }
    }
}

/// Closed-tour route planner
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scenario JSON file
    #[arg(long)]
    scenario: PathBuf,

    /// Override the scenario's planning mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Do not return home after the last stop
    #[arg(long)]
    open: bool,

    /// Report costs in this country's currency (e.g. US)
    #[arg(long)]
    currency: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Largest waypoint count searched in dynamic mode
    #[arg(long)]
    max_waypoints: Option<usize>,

    /// List every candidate tour
    #[arg(long)]
    all: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::from_default_env()
        .add_directive("fuelroute_core=info".parse()?)
        .add_directive("fuelroute_cli=info".parse()?)
        .add_directive("plan_route=info".parse()?);
    tracing_subscriber::registry()
        .with(filter)
        .with(args.log_json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!args.log_json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();

    let config = Config::from_env();
    let scenario = Scenario::from_path(&args.scenario)?;

    let mut rules = scenario.rules(config.rules());
    if let Some(mode) = args.mode {
        rules.mode = mode.into();
    }
    if args.open {
        rules.closed = false;
    }
    if let Some(max) = args.max_waypoints {
        rules.max_waypoints = max;
    }
    let currency = args
        .currency
        .map(|code| code.trim().to_uppercase())
        .or(config.currency);

    tracing::info!(
        scenario = %args.scenario.display(),
        waypoints = scenario.waypoints.len(),
        mode = %rules.mode,
        closed = rules.closed,
        "planning route"
    );

    let report = plan(&scenario, rules, currency.as_deref(), args.all)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
