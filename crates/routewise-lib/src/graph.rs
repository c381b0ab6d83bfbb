use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{Link, Location, LocationId, Network};

/// Edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: LocationId,
    /// Index into [`Graph::links`].
    pub link: usize,
}

/// Immutable adjacency structure built for a single request.
///
/// Adjacency is keyed by location id in ascending order and each neighbour
/// list keeps the input order of links, so traversal order is reproducible
/// for identical input.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    locations: Arc<BTreeMap<LocationId, Location>>,
    links: Arc<Vec<Link>>,
    adjacency: Arc<BTreeMap<LocationId, Vec<Edge>>>,
}

impl Graph {
    /// Return the neighbours for a given location identifier.
    pub fn neighbours(&self, location: LocationId) -> &[Edge] {
        self.adjacency
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the location is part of this graph.
    pub fn contains(&self, location: LocationId) -> bool {
        self.locations.contains_key(&location)
    }

    /// Lookup a location by identifier.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Location identifiers in ascending order.
    pub fn location_ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.locations.keys().copied()
    }

    /// Number of locations in the graph.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// The link an edge travels along.
    pub fn link(&self, edge: &Edge) -> &Link {
        &self.links[edge.link]
    }

    /// All links, in input order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Build the routing graph for a network snapshot.
pub fn build_graph(network: &Network) -> Result<Graph> {
    build_graph_from_parts(&network.locations, &network.links)
}

/// Build the routing graph from flat location and link records.
///
/// Every link is indexed under both of its endpoints. A link whose endpoint is
/// missing from `locations` fails the whole build with
/// [`Error::MalformedLink`].
pub fn build_graph_from_parts(locations: &[Location], links: &[Link]) -> Result<Graph> {
    let known: HashSet<LocationId> = locations.iter().map(|location| location.id).collect();

    let mut adjacency: BTreeMap<LocationId, Vec<Edge>> = locations
        .iter()
        .map(|location| (location.id, Vec::new()))
        .collect();

    for (index, link) in links.iter().enumerate() {
        for endpoint in [link.from, link.to] {
            if !known.contains(&endpoint) {
                return Err(Error::MalformedLink {
                    link: link.id,
                    location: endpoint,
                });
            }
        }

        adjacency.entry(link.from).or_default().push(Edge {
            target: link.to,
            link: index,
        });
        if link.from != link.to {
            adjacency.entry(link.to).or_default().push(Edge {
                target: link.from,
                link: index,
            });
        }
    }

    debug!(
        locations = locations.len(),
        links = links.len(),
        "built routing graph"
    );

    Ok(Graph {
        locations: Arc::new(
            locations
                .iter()
                .map(|location| (location.id, location.clone()))
                .collect(),
        ),
        links: Arc::new(links.to_vec()),
        adjacency: Arc::new(adjacency),
    })
}
