use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::mode::{cost_of, emissions_of, time_of, TransportMode};

/// Numeric identifier for a location.
pub type LocationId = i64;

/// Numeric identifier for a link.
pub type LinkId = i64;

/// Similarity threshold below which fuzzy matches are not suggested.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Longest distance, in km, accepted for a single link.
///
/// Keeps every derived weight and any path sum far below `f64::MAX`, so a
/// reachable destination never reads as an infinite tentative distance.
pub const MAX_LINK_DISTANCE_KM: f64 = 100_000.0;

/// Whether `distance` is usable as a link length: finite, positive and at
/// most [`MAX_LINK_DISTANCE_KM`].
pub fn is_valid_link_distance(distance: f64) -> bool {
    distance.is_finite() && distance > 0.0 && distance <= MAX_LINK_DISTANCE_KM
}

/// A named point in the transport network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

/// A connection between two locations travelled with a single mode.
///
/// Links are stored with a from/to orientation but traversed in both
/// directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub from: LocationId,
    pub to: LocationId,
    /// Distance in kilometres.
    pub distance: f64,
    pub mode: TransportMode,
}

impl Link {
    /// Travel time in minutes.
    pub fn time_minutes(&self) -> f64 {
        time_of(self.distance, &self.mode)
    }

    /// Monetary cost of travelling this link.
    pub fn cost(&self) -> f64 {
        cost_of(self.distance, &self.mode)
    }

    /// Carbon emissions in kg CO2.
    pub fn emissions(&self) -> f64 {
        emissions_of(self.distance, &self.mode)
    }

    /// The endpoint opposite `location`, if `location` is one of the endpoints.
    pub fn other_end(&self, location: LocationId) -> Option<LocationId> {
        if location == self.from {
            Some(self.to)
        } else if location == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Snapshot of all locations and links supplied for a single request.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub locations: Vec<Location>,
    pub links: Vec<Link>,
    name_to_id: HashMap<String, LocationId>,
}

impl Network {
    /// Assemble a snapshot from raw location and link records.
    pub fn new(locations: Vec<Location>, links: Vec<Link>) -> Self {
        let name_to_id = locations
            .iter()
            .map(|location| (location.name.clone(), location.id))
            .collect();
        Self {
            locations,
            links,
            name_to_id,
        }
    }

    /// Lookup a location identifier by its case-sensitive name.
    pub fn location_id_by_name(&self, name: &str) -> Option<LocationId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a location by identifier.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Lookup a location name by identifier.
    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|location| location.name.as_str())
    }

    /// Suggest up to `limit` known names similar to `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
                (score, location.name.as_str())
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_distance_bounds() {
        assert!(is_valid_link_distance(0.5));
        assert!(is_valid_link_distance(MAX_LINK_DISTANCE_KM));
        for distance in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e308, MAX_LINK_DISTANCE_KM * 2.0] {
            assert!(!is_valid_link_distance(distance), "{distance} accepted");
        }
    }

    fn uae() -> Network {
        Network::new(
            vec![
                Location {
                    id: 1,
                    name: "Dubai".to_string(),
                },
                Location {
                    id: 2,
                    name: "Abu Dhabi".to_string(),
                },
                Location {
                    id: 3,
                    name: "Sharjah".to_string(),
                },
            ],
            vec![Link {
                id: 10,
                from: 1,
                to: 2,
                distance: 140.0,
                mode: TransportMode::Car,
            }],
        )
    }

    #[test]
    fn name_lookup_is_case_sensitive() {
        let network = uae();
        assert_eq!(network.location_id_by_name("Dubai"), Some(1));
        assert_eq!(network.location_id_by_name("dubai"), None);
        assert_eq!(network.location_name(3), Some("Sharjah"));
    }

    #[test]
    fn fuzzy_matches_rank_closest_name_first() {
        let network = uae();
        let matches = network.fuzzy_location_matches("Sharja", 3);
        assert_eq!(matches.first().map(String::as_str), Some("Sharjah"));
        assert!(network.fuzzy_location_matches("Zzzz", 3).is_empty());
    }

    #[test]
    fn link_other_end_works_in_both_directions() {
        let network = uae();
        let link = &network.links[0];
        assert_eq!(link.other_end(1), Some(2));
        assert_eq!(link.other_end(2), Some(1));
        assert_eq!(link.other_end(3), None);
    }

    #[test]
    fn link_metrics_follow_mode() {
        let link = &uae().links[0];
        assert!((link.cost() - 70.0).abs() < 1e-9);
        assert!((link.emissions() - 23.94).abs() < 1e-9);
    }
}
