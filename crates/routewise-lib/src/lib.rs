//! Routewise library entry points.
//!
//! This crate exposes the travel network model, the derived time, cost, and
//! emission metrics per transport mode, the graph builder, and the
//! multi-criteria route resolver. Higher-level consumers (CLI, HTTP service)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod db;
pub mod error;
pub mod graph;
pub mod mode;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;

pub use config::{default_database_path, resolve_database_path, DATABASE_ENV_VAR};
pub use db::{LinkRecord, NewLink, Store};
pub use error::{Error, Result};
pub use graph::{build_graph, build_graph_from_parts, Edge, Graph};
pub use mode::{cost_of, emissions_of, time_of, ModeProfile, TransportMode};
pub use network::{
    is_valid_link_distance, Link, LinkId, Location, LocationId, Network, MAX_LINK_DISTANCE_KM,
};
pub use output::{ComparisonSummary, PathLeg, PathStop, PathSummary};
pub use path::{resolve, resolve_with, shortest_path_by, PathResult, SearchStrategy, WeightSelector};
pub use routing::{compare_by_alternative_criteria, find_best_by_distance, RouteRequest};
