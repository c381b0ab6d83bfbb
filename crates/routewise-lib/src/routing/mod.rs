//! Caller-facing route operations.
//!
//! This module provides:
//! - [`RouteRequest`] - Origin/destination names plus the search strategy
//! - [`find_best_by_distance`] - The single distance-optimal path
//! - [`compare_by_alternative_criteria`] - Time, cost, and emissions optima
//!
//! Both operations resolve location names against the supplied [`Network`]
//! snapshot, build a fresh [`Graph`](crate::graph::Graph) for the request, and
//! run one search per criterion.
//!
//! # Example
//!
//! ```ignore
//! use routewise_lib::{find_best_by_distance, RouteRequest, Store};
//!
//! let network = Store::open("routewise.db".as_ref())?.load_network()?;
//! let request = RouteRequest::new("Dubai", "Abu Dhabi");
//! let best = find_best_by_distance(&network, &request)?;
//! println!("{} km", best.total_distance);
//! ```

mod planner;

pub use planner::{select_planner, HeapPlanner, RoutePlanner, ScanPlanner};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::network::{LocationId, Network};
use crate::path::{PathResult, SearchStrategy, WeightSelector};

/// Number of "did you mean" suggestions attached to unknown-location errors.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route request keyed by location names.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub strategy: SearchStrategy,
}

impl RouteRequest {
    /// Request using the default search strategy.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            strategy: SearchStrategy::default(),
        }
    }

    /// Override the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject requests whose origin and destination are the same location.
    pub fn validate(&self) -> Result<()> {
        if self.origin == self.destination {
            return Err(Error::SameEndpoint {
                name: self.origin.clone(),
            });
        }
        Ok(())
    }
}

/// Resolve a location name to its id, with suggestions when unknown.
fn resolve_location(network: &Network, name: &str) -> Result<LocationId> {
    network.location_id_by_name(name).ok_or_else(|| {
        let suggestions = network.fuzzy_location_matches(name, MAX_SUGGESTIONS);
        Error::UnknownLocation {
            name: name.to_string(),
            suggestions,
        }
    })
}

fn resolve_endpoints(network: &Network, request: &RouteRequest) -> Result<(LocationId, LocationId)> {
    let origin = resolve_location(network, &request.origin)?;
    let destination = resolve_location(network, &request.destination)?;
    Ok((origin, destination))
}

/// Compute the distance-optimal path between two named locations.
///
/// Unknown names fail before any search runs; an unreachable destination is
/// reported as [`Error::RouteNotFound`].
pub fn find_best_by_distance(network: &Network, request: &RouteRequest) -> Result<PathResult> {
    let (origin, destination) = resolve_endpoints(network, request)?;
    let graph = build_graph(network)?;
    let planner = select_planner(request.strategy);

    let result = planner
        .find_path(&graph, origin, destination, WeightSelector::Distance)
        .ok_or_else(|| Error::RouteNotFound {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
        })?;

    info!(
        origin = %request.origin,
        destination = %request.destination,
        hops = result.hop_count(),
        distance = result.total_distance,
        "resolved distance-optimal route"
    );
    Ok(result)
}

/// Compute the time-, cost-, and emissions-optimal paths between two named
/// locations.
///
/// Results follow the fixed order time, cost, emissions. Criteria with no
/// path are omitted, so the list may hold fewer than three entries or be
/// empty. The three searches run in parallel, each with its own tables, over
/// the same immutable graph.
pub fn compare_by_alternative_criteria(
    network: &Network,
    request: &RouteRequest,
) -> Result<Vec<PathResult>> {
    let (origin, destination) = resolve_endpoints(network, request)?;
    let graph = build_graph(network)?;
    let planner = select_planner(request.strategy);

    let results: Vec<PathResult> = WeightSelector::ALTERNATIVES
        .par_iter()
        .map(|selector| planner.find_path(&graph, origin, destination, *selector))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    debug!(
        origin = %request.origin,
        destination = %request.destination,
        found = results.len(),
        "compared alternative criteria"
    );
    Ok(results)
}
