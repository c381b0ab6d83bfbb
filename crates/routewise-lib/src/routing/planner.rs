//! Search strategies implementing the Strategy pattern.
//!
//! Each planner wraps one [`SearchStrategy`] so callers can pick the frontier
//! implementation at runtime without touching the orchestration in
//! [`super::find_best_by_distance`] and [`super::compare_by_alternative_criteria`].

use crate::graph::Graph;
use crate::network::LocationId;
use crate::path::{resolve_with, PathResult, SearchStrategy, WeightSelector};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The strategy identifier for this planner.
    fn strategy(&self) -> SearchStrategy;

    /// Find the path minimizing `selector` between two locations.
    ///
    /// Returns `None` when the destination is unreachable.
    fn find_path(
        &self,
        graph: &Graph,
        origin: LocationId,
        destination: LocationId,
        selector: WeightSelector,
    ) -> Option<PathResult> {
        resolve_with(graph, origin, destination, selector, self.strategy())
    }
}

/// Linear-scan label-setting planner.
///
/// Simple and allocation-light; the default for the small networks this
/// library targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanPlanner;

impl RoutePlanner for ScanPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Scan
    }
}

/// Binary-heap planner for larger networks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapPlanner;

impl RoutePlanner for HeapPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Heap
    }
}

/// Select the planner implementing `strategy`.
pub fn select_planner(strategy: SearchStrategy) -> Box<dyn RoutePlanner> {
    match strategy {
        SearchStrategy::Scan => Box::new(ScanPlanner),
        SearchStrategy::Heap => Box::new(HeapPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_planner_returns_matching_strategy() {
        assert_eq!(
            select_planner(SearchStrategy::Scan).strategy(),
            SearchStrategy::Scan
        );
        assert_eq!(
            select_planner(SearchStrategy::Heap).strategy(),
            SearchStrategy::Heap
        );
    }
}
