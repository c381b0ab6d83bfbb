use std::path::PathBuf;

use thiserror::Error;

use crate::network::{LinkId, LocationId};

/// Convenient result alias for the routewise library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A location name could not be resolved against the known location set.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Origin and destination name the same location.
    #[error("origin and destination are both {name}")]
    SameEndpoint { name: String },

    /// No path connects two otherwise valid locations.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// A link references a location absent from the supplied location set.
    #[error("link {link} references unknown location {location}")]
    MalformedLink { link: LinkId, location: LocationId },

    /// Link distances must be finite, strictly positive and within
    /// [`MAX_LINK_DISTANCE_KM`](crate::network::MAX_LINK_DISTANCE_KM).
    #[error("invalid link distance {distance}; expected a positive number of kilometres up to {}", crate::network::MAX_LINK_DISTANCE_KM)]
    InvalidDistance { distance: f64 },

    /// Raised when persisting a link whose mode is not one of the supported modes.
    #[error("unsupported transport mode '{mode}'; expected one of CAR, BUS, METRO, WALK")]
    InvalidMode { mode: String },

    /// Search strategy name is neither `scan` nor `heap`.
    #[error("unknown search strategy '{value}'; expected scan or heap")]
    InvalidStrategy { value: String },

    /// Database could not be located at the resolved path.
    #[error("database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default database")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_without_suggestions() {
        let err = Error::UnknownLocation {
            name: "Atlantis".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown location name: Atlantis");
    }

    #[test]
    fn unknown_location_lists_suggestions() {
        let single = Error::UnknownLocation {
            name: "Dubay".to_string(),
            suggestions: vec!["Dubai".to_string()],
        };
        assert!(single.to_string().ends_with("Did you mean 'Dubai'?"));

        let many = Error::UnknownLocation {
            name: "Sharja".to_string(),
            suggestions: vec!["Sharjah".to_string(), "Shard".to_string()],
        };
        assert!(many
            .to_string()
            .contains("Did you mean one of: 'Sharjah', 'Shard'?"));
    }
}
