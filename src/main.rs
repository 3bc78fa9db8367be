use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use cut_planner::render;
use cut_planner::{Action, Observation, Planner, PlannerConfig, Problem, Strategy};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "cut_planner",
    about = "Picks the next placement for a 2D cutting stock observation"
)]
struct Cli {
    /// Observation JSON file ({"products": [...], "stocks": [...]}); reads stdin when omitted
    #[arg(long)]
    observation: Option<PathBuf>,

    /// Strategy: bfd or bb (branch and bound)
    #[arg(long, default_value = "bfd", value_parser = parse_strategy)]
    strategy: Strategy,

    /// Stop branch and bound after expanding this many nodes
    #[arg(long)]
    node_budget: Option<u64>,

    /// Show ASCII layout of each sheet with the chosen action applied
    #[arg(long)]
    layout: bool,

    /// Log search details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: cut_planner::PlanError| e.to_string())
}

fn read_observation(path: Option<&PathBuf>) -> Result<Observation, String> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| format!("cannot read '{}': {}", p.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            buf
        }
    };
    serde_json::from_str(&raw).map_err(|e| format!("invalid observation: {}", e))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let observation = read_observation(cli.observation.as_ref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut problem = Problem::try_from(&observation).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let planner = Planner::new(PlannerConfig {
        strategy: cli.strategy,
        node_budget: cli.node_budget,
    });
    let placement = planner.plan(&problem);
    let action = Action::from(placement);

    println!(
        "{}",
        serde_json::to_string(&action).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
    );

    if cli.layout {
        if let Some(p) = &placement {
            problem.sheets[p.stock_idx].place(p);
        }
        for (i, sheet) in problem.sheets.iter().enumerate() {
            eprintln!("Stock {}:", i);
            eprint!("{}", render::render_sheet(sheet));
            eprintln!();
        }
    }

    eprintln!(
        "{} ({}): {}",
        planner.strategy(),
        if action.is_noop() { "no placement" } else { "placed" },
        action,
    );
}
