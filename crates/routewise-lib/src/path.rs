use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::graph::Graph;
use crate::network::{Link, Location, LocationId};

/// Scalar used as the edge weight for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSelector {
    Distance,
    Time,
    Cost,
    Emissions,
}

impl WeightSelector {
    /// Criteria searched by a route comparison, in presentation order.
    pub const ALTERNATIVES: [WeightSelector; 3] = [
        WeightSelector::Time,
        WeightSelector::Cost,
        WeightSelector::Emissions,
    ];

    /// Edge weight of `link` under this selector.
    pub fn weight(self, link: &Link) -> f64 {
        match self {
            WeightSelector::Distance => link.distance,
            WeightSelector::Time => link.time_minutes(),
            WeightSelector::Cost => link.cost(),
            WeightSelector::Emissions => link.emissions(),
        }
    }

    /// Label describing a path that is optimal under this selector.
    pub fn label(self) -> &'static str {
        match self {
            WeightSelector::Distance => "shortest",
            WeightSelector::Time => "fastest",
            WeightSelector::Cost => "cheapest",
            WeightSelector::Emissions => "eco-friendliest",
        }
    }
}

impl fmt::Display for WeightSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            WeightSelector::Distance => "distance",
            WeightSelector::Time => "time",
            WeightSelector::Cost => "cost",
            WeightSelector::Emissions => "emissions",
        };
        f.write_str(value)
    }
}

/// How the next location to settle is selected.
///
/// Both strategies settle locations in the same order (lowest tentative
/// distance, then lowest location id) and therefore return identical paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Linear scan over unsettled locations, O(V²).
    #[default]
    Scan,
    /// Binary-heap frontier, O((V + E) log V).
    Heap,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchStrategy::Scan => "scan",
            SearchStrategy::Heap => "heap",
        };
        f.write_str(value)
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(SearchStrategy::Scan),
            "heap" => Ok(SearchStrategy::Heap),
            _ => Err(Error::InvalidStrategy {
                value: value.to_string(),
            }),
        }
    }
}

/// Raw output of a search: visited locations and the graph link indices
/// between them, origin first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTrace {
    pub locations: Vec<LocationId>,
    pub links: Vec<usize>,
}

/// Materialized path for one criterion with its aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub criterion: WeightSelector,
    pub locations: Vec<Location>,
    pub links: Vec<Link>,
    pub total_distance: f64,
    pub total_time: f64,
    pub total_cost: f64,
    pub total_emissions: f64,
}

impl PathResult {
    fn from_trace(graph: &Graph, criterion: WeightSelector, trace: &PathTrace) -> Option<Self> {
        let locations = trace
            .locations
            .iter()
            .map(|id| graph.location(*id).cloned())
            .collect::<Option<Vec<_>>>()?;
        let links: Vec<Link> = trace
            .links
            .iter()
            .map(|index| graph.links()[*index].clone())
            .collect();

        Some(Self {
            criterion,
            total_distance: links.iter().map(|link| link.distance).sum(),
            total_time: links.iter().map(Link::time_minutes).sum(),
            total_cost: links.iter().map(Link::cost).sum(),
            total_emissions: links.iter().map(Link::emissions).sum(),
            locations,
            links,
        })
    }

    /// Number of links traversed.
    pub fn hop_count(&self) -> usize {
        self.links.len()
    }

    /// Total of the optimized scalar along this path.
    pub fn total_weight(&self) -> f64 {
        match self.criterion {
            WeightSelector::Distance => self.total_distance,
            WeightSelector::Time => self.total_time,
            WeightSelector::Cost => self.total_cost,
            WeightSelector::Emissions => self.total_emissions,
        }
    }
}

/// Find the path minimizing `selector` using the default scan strategy.
///
/// Returns `None` when no path connects the two locations or either is not
/// part of the graph.
pub fn resolve(
    graph: &Graph,
    origin: LocationId,
    destination: LocationId,
    selector: WeightSelector,
) -> Option<PathResult> {
    resolve_with(graph, origin, destination, selector, SearchStrategy::Scan)
}

/// Find the path minimizing `selector` using an explicit strategy.
pub fn resolve_with(
    graph: &Graph,
    origin: LocationId,
    destination: LocationId,
    selector: WeightSelector,
    strategy: SearchStrategy,
) -> Option<PathResult> {
    let trace = shortest_path_by(graph, origin, destination, strategy, |link| {
        selector.weight(link)
    })?;
    PathResult::from_trace(graph, selector, &trace)
}

/// Label-setting shortest path search parameterized by an edge weight
/// function.
///
/// Weights must be non-negative and finite. A path whose summed weight
/// overflows to infinity is indistinguishable from an unreachable one; links
/// written through [`Store::persist_link`](crate::db::Store::persist_link) are
/// capped at [`MAX_LINK_DISTANCE_KM`](crate::network::MAX_LINK_DISTANCE_KM),
/// which keeps every derived weight far from that limit.
pub fn shortest_path_by<F>(
    graph: &Graph,
    origin: LocationId,
    destination: LocationId,
    strategy: SearchStrategy,
    weight: F,
) -> Option<PathTrace>
where
    F: Fn(&Link) -> f64,
{
    let mut tables = SearchTables::new(graph, origin, destination)?;
    match strategy {
        SearchStrategy::Scan => run_scan(graph, &mut tables, &weight),
        SearchStrategy::Heap => run_heap(graph, &mut tables, &weight),
    }

    if !tables.distances[tables.destination].is_finite() {
        debug!(origin, destination, %strategy, "destination unreachable");
        return None;
    }
    Some(tables.reconstruct(graph))
}

/// Per-search mutable state. Locations are addressed by their position in
/// ascending id order, so ties on distance go to the lower id.
struct SearchTables {
    ids: Vec<LocationId>,
    index: HashMap<LocationId, usize>,
    distances: Vec<f64>,
    settled: Vec<bool>,
    /// For each location, the predecessor position and graph link index.
    parents: Vec<Option<(usize, usize)>>,
    origin: usize,
    destination: usize,
}

impl SearchTables {
    fn new(graph: &Graph, origin: LocationId, destination: LocationId) -> Option<Self> {
        let ids: Vec<LocationId> = graph.location_ids().collect();
        let index: HashMap<LocationId, usize> =
            ids.iter().enumerate().map(|(pos, id)| (*id, pos)).collect();
        let origin = *index.get(&origin)?;
        let destination = *index.get(&destination)?;

        let mut distances = vec![f64::INFINITY; ids.len()];
        distances[origin] = 0.0;

        Some(Self {
            settled: vec![false; ids.len()],
            parents: vec![None; ids.len()],
            ids,
            index,
            distances,
            origin,
            destination,
        })
    }

    fn relax<F>(&mut self, graph: &Graph, current: usize, weight: &F) -> Vec<usize>
    where
        F: Fn(&Link) -> f64,
    {
        let mut improved = Vec::new();
        for edge in graph.neighbours(self.ids[current]) {
            let Some(&next) = self.index.get(&edge.target) else {
                continue;
            };
            if self.settled[next] {
                continue;
            }

            let candidate = self.distances[current] + weight(graph.link(edge));
            if candidate < self.distances[next] {
                self.distances[next] = candidate;
                self.parents[next] = Some((current, edge.link));
                improved.push(next);
            }
        }
        improved
    }

    fn reconstruct(&self, graph: &Graph) -> PathTrace {
        let mut locations = vec![self.ids[self.destination]];
        let mut links = Vec::new();
        let mut current = self.destination;
        while current != self.origin {
            let Some((previous, link)) = self.parents[current] else {
                break;
            };
            links.push(link);
            locations.push(self.ids[previous]);
            current = previous;
        }
        locations.reverse();
        links.reverse();

        debug_assert_eq!(locations.len(), links.len() + 1);
        debug_assert!(links.iter().all(|index| *index < graph.links().len()));
        PathTrace { locations, links }
    }
}

fn run_scan<F>(graph: &Graph, tables: &mut SearchTables, weight: &F)
where
    F: Fn(&Link) -> f64,
{
    loop {
        let mut current = None;
        let mut best = f64::INFINITY;
        for (pos, distance) in tables.distances.iter().enumerate() {
            if !tables.settled[pos] && *distance < best {
                best = *distance;
                current = Some(pos);
            }
        }

        let Some(current) = current else {
            break;
        };
        tables.settled[current] = true;
        if current == tables.destination {
            break;
        }
        tables.relax(graph, current, weight);
    }
}

fn run_heap<F>(graph: &Graph, tables: &mut SearchTables, weight: &F)
where
    F: Fn(&Link) -> f64,
{
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(tables.origin, 0.0));

    while let Some(entry) = queue.pop() {
        if tables.settled[entry.node] || entry.cost.0 > tables.distances[entry.node] {
            continue;
        }
        tables.settled[entry.node] = true;
        if entry.node == tables.destination {
            break;
        }

        for next in tables.relax(graph, entry.node, weight) {
            queue.push(QueueEntry::new(next, tables.distances[next]));
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: usize,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: usize, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then position.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
