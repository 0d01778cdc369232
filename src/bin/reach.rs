//! Reach - print where a figure can move in a scenario
//!
//! Loads a scenario TOML, searches from the named figure's placement, and
//! prints every resting space grouped by movement cost.

use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use skirmish_movement::core::error::Result;
use skirmish_movement::grid::Coordinate;
use skirmish_movement::movement::{
    compute_movement_cache, get_movement_states, get_spaces_at_cost, resolve_destination,
    MoveDestination,
};
use skirmish_movement::scenario::Scenario;

/// Reach - movement ranges for tactical grid figures
#[derive(Parser, Debug)]
#[command(name = "reach")]
#[command(about = "Show every space a figure can move to and what it costs")]
struct Args {
    /// Scenario TOML file
    #[arg(long, default_value = "data/scenarios/corridor.toml")]
    scenario: PathBuf,

    /// Name of the moving figure
    #[arg(long)]
    figure: String,

    /// Movement points available
    #[arg(long, default_value_t = 4)]
    mp: u32,

    /// Also print the route to this space
    #[arg(long)]
    to: Option<Coordinate>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct ReachReport {
    figure: String,
    start: String,
    size: String,
    mp: u32,
    spaces_by_cost: BTreeMap<u32, Vec<String>>,
    route: Option<RouteReport>,
}

#[derive(Serialize)]
struct RouteReport {
    destination: String,
    cost: u32,
    placements: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish_movement=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let scenario = Scenario::load(&args.scenario)?;
    let start = scenario.start_for(&args.figure)?;
    let profile = scenario.profile_for(&args.figure)?;
    let board = scenario.board_for(&args.figure)?;

    tracing::info!(
        "Searching from {} for {} ({}) with {} MP",
        start,
        args.figure,
        profile.size,
        args.mp
    );

    let cache = compute_movement_cache(start, args.mp, &board, &profile);

    let spaces_by_cost: BTreeMap<u32, Vec<String>> = (1..=args.mp)
        .map(|cost| {
            let spaces = get_spaces_at_cost(&cache, cost);
            (cost, spaces.iter().map(Coordinate::to_string).collect::<Vec<_>>())
        })
        .filter(|(_, spaces)| !spaces.is_empty())
        .collect();

    let route = args.to.and_then(|destination| {
        let target = resolve_destination(&cache, &MoveDestination::Cell(destination))?;
        let states = get_movement_states(&cache, start, target.top_left, target.size, &profile);
        Some(RouteReport {
            destination: destination.to_string(),
            cost: target.cost,
            placements: states
                .iter()
                .map(|s| format!("{}@{}", s.top_left, s.size))
                .collect(),
        })
    });

    if args.to.is_some() && route.is_none() {
        tracing::warn!("No resting placement covers the requested destination");
    }

    let report = ReachReport {
        figure: args.figure.clone(),
        start: start.to_string(),
        size: profile.size.to_string(),
        mp: args.mp,
        spaces_by_cost,
        route,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}

fn print_text(report: &ReachReport) {
    println!(
        "{} at {} ({}) with {} MP",
        report.figure, report.start, report.size, report.mp
    );
    if report.spaces_by_cost.is_empty() {
        println!("  nowhere to go");
    }
    for (cost, spaces) in &report.spaces_by_cost {
        println!("  {:>2} MP: {}", cost, spaces.join(" "));
    }
    if let Some(route) = &report.route {
        println!(
            "Route to {} ({} MP): {}",
            route.destination,
            route.cost,
            route.placements.join(" -> ")
        );
    }
}
