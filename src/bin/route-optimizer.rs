use std::env;
use std::error::Error;
use std::time::Duration;

use bimodal_vrp::setup::{parse_lot_list, setup, Selection};
use bimodal_vrp::{RouteResponse, RoutingService, VehicleRoute};
use colored::*;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEADLINE: Duration = Duration::from_secs(60);

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE))
        .init();
}

fn usage() -> &'static str {
    concat!(
        "Usage: route-optimizer \"<lot>, <lot>, ...\" [--json]\n",
        "  --json   print the result as JSON instead of a report\n",
    )
}

fn print_route(title: &str, route: &VehicleRoute) {
    println!("{}", format!("{title}: {}", route.plate).bold());
    println!("  Total lots:     {}", route.assigned.len());
    println!("  Distance (TSP): {}", format!("{:.2} km", route.distance_km).green());
    println!("  Estimated time: {}", route.estimated_time.green());
    println!("  Assigned lots:  {}", route.assigned.join(" -> "));
    println!(
        "  Optimal order:  DEPOT -> {} -> DEPOT",
        route.visit_order.join(" -> ").cyan()
    );
    println!("  Map:            {}", route.geojson_link);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut lot_list = None;
    let mut as_json = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "-h" | "--help" => {
                print!("{}", usage());
                return Ok(());
            }
            _ => lot_list = Some(arg),
        }
    }
    let Some(lot_list) = lot_list else {
        eprint!("{}", usage());
        return Err("missing lot list".into());
    };

    let (config, table) = setup()?;
    let selection = Selection::validate(&parse_lot_list(&lot_list), &table, &config);
    info!("Selection: {}", selection);
    if !selection.invalid.is_empty() {
        warn!("Skipping unknown lots: {}", selection.invalid.join(", "));
        eprintln!(
            "{}",
            format!("Unknown lots ignored: {}", selection.invalid.join(", ")).yellow()
        );
    }
    if !selection.is_ready() {
        warn!("Selection rejected: {}", selection);
        eprintln!("{}", selection.to_string().red());
        return Err("lot selection is not valid".into());
    }

    let service = RoutingService::new(table, config, DEADLINE);
    let response: RouteResponse = service.solve_with_deadline(selection.valid).await.into();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match response {
        RouteResponse::Success(result) => {
            println!(
                "Grouping distance: {}",
                format!("{} km", result.grouping_distance_km).yellow()
            );
            print_route("Vehicle A", &result.route_a);
            print_route("Vehicle B", &result.route_b);
        }
        RouteResponse::Failure { error } => {
            eprintln!("{}", format!("Routing failed: {error}").red());
            return Err(error.into());
        }
    }
    Ok(())
}
