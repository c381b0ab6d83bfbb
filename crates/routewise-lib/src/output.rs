use std::fmt::Write;

use serde::Serialize;

use crate::mode::TransportMode;
use crate::network::{LinkId, LocationId};
use crate::path::{PathResult, WeightSelector};

/// Stop along a summarized path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathStop {
    pub index: usize,
    pub id: LocationId,
    pub name: String,
}

/// Single link travelled in a summarized path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathLeg {
    pub link_id: LinkId,
    pub from: String,
    pub to: String,
    pub mode: TransportMode,
    pub distance: f64,
    pub time_minutes: f64,
    pub cost: f64,
    pub emissions: f64,
}

/// Structured representation of a path that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub criterion: WeightSelector,
    pub label: &'static str,
    pub hops: usize,
    pub stops: Vec<PathStop>,
    pub legs: Vec<PathLeg>,
    pub total_distance: f64,
    pub total_time: f64,
    pub total_cost: f64,
    pub total_emissions: f64,
}

impl PathSummary {
    /// Convert a [`PathResult`] into a summary with per-leg metrics.
    ///
    /// Legs are oriented in travel direction, which may be the reverse of the
    /// stored link orientation.
    pub fn from_result(result: &PathResult) -> Self {
        let stops = result
            .locations
            .iter()
            .enumerate()
            .map(|(index, location)| PathStop {
                index,
                id: location.id,
                name: location.name.clone(),
            })
            .collect::<Vec<_>>();

        let legs = result
            .links
            .iter()
            .zip(stops.windows(2))
            .map(|(link, pair)| PathLeg {
                link_id: link.id,
                from: pair[0].name.clone(),
                to: pair[1].name.clone(),
                mode: link.mode.clone(),
                distance: link.distance,
                time_minutes: link.time_minutes(),
                cost: link.cost(),
                emissions: link.emissions(),
            })
            .collect();

        Self {
            criterion: result.criterion,
            label: result.criterion.label(),
            hops: result.hop_count(),
            stops,
            legs,
            total_distance: result.total_distance,
            total_time: result.total_time,
            total_cost: result.total_cost,
            total_emissions: result.total_emissions,
        }
    }

    /// Render a plain-text description of this path.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let origin = self.stops.first().map(|s| s.name.as_str()).unwrap_or("<unknown>");
        let destination = self.stops.last().map(|s| s.name.as_str()).unwrap_or("<unknown>");

        let _ = writeln!(
            buffer,
            "{} route from {} to {} ({} hops; optimized for {}):",
            capitalize(self.label),
            origin,
            destination,
            self.hops,
            self.criterion
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                " - {} -> {} ({:.1} km by {}, {:.0} min)",
                leg.from, leg.to, leg.distance, leg.mode, leg.time_minutes
            );
        }
        let _ = writeln!(buffer, "Total distance: {:.1} km", self.total_distance);
        let _ = writeln!(buffer, "Total time: {}", format_minutes(self.total_time));
        let _ = writeln!(buffer, "Estimated cost: {:.2} AED", self.total_cost);
        let _ = writeln!(buffer, "CO2 emissions: {:.2} kg", self.total_emissions);
        buffer
    }
}

/// Alternative paths for one origin/destination pair, in criterion order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonSummary {
    pub origin: String,
    pub destination: String,
    pub options: Vec<PathSummary>,
}

impl ComparisonSummary {
    pub fn from_results(
        origin: impl Into<String>,
        destination: impl Into<String>,
        results: &[PathResult],
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            options: results.iter().map(PathSummary::from_result).collect(),
        }
    }

    /// Render every option as plain text, separated by blank lines.
    pub fn render_plain(&self) -> String {
        if self.options.is_empty() {
            return format!(
                "No routes available between {} and {}.\n",
                self.origin, self.destination
            );
        }
        self.options
            .iter()
            .map(PathSummary::render_plain)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format minutes as `Xh Ym`, or `Ym` below one hour.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let (hours, rest) = (total / 60, total % 60);
    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
