//! Route and comparison command handlers.

use std::path::Path;

use anyhow::{Context, Result};

use routewise_cli::messages::explain;
use routewise_cli::output::OutputFormat;
use routewise_lib::{
    compare_by_alternative_criteria, find_best_by_distance, ComparisonSummary, Network,
    PathSummary, RouteRequest, SearchStrategy,
};

use super::open_store;

/// Arguments shared by `route` and `compare`.
#[derive(Debug, Clone)]
pub struct RouteArgs {
    pub from: String,
    pub to: String,
    pub strategy: SearchStrategy,
}

impl RouteArgs {
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.clone(), self.to.clone()).with_strategy(self.strategy)
    }
}

fn load_network(target: Option<&Path>) -> Result<Network> {
    let mut store = open_store(target)?;
    store
        .load_network()
        .context("failed to load the travel network")
}

/// Handle `route`: print the distance-optimal path.
pub fn handle_route(target: Option<&Path>, format: OutputFormat, args: &RouteArgs) -> Result<()> {
    let request = args.to_request();
    request.validate().map_err(explain)?;

    let network = load_network(target)?;
    let result = find_best_by_distance(&network, &request).map_err(explain)?;
    let summary = PathSummary::from_result(&result);
    format.emit(&summary, PathSummary::render_plain)
}

/// Handle `compare`: print time, cost, and emissions optima in that order.
pub fn handle_compare(target: Option<&Path>, format: OutputFormat, args: &RouteArgs) -> Result<()> {
    let request = args.to_request();
    request.validate().map_err(explain)?;

    let network = load_network(target)?;
    let results = compare_by_alternative_criteria(&network, &request).map_err(explain)?;
    let summary = ComparisonSummary::from_results(&args.from, &args.to, &results);
    format.emit(&summary, ComparisonSummary::render_plain)
}
