//! Human-friendly wording for library errors surfaced on the command line.

use routewise_lib::Error as RouteError;

/// Convert a library error into an `anyhow` error with actionable wording.
///
/// Errors without a dedicated message pass through unchanged so their source
/// chain stays intact.
pub fn explain(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownLocation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        RouteError::SameEndpoint { name } => anyhow::anyhow!(
            "Origin and destination are both '{}'. Choose two different locations.",
            name
        ),
        RouteError::RouteNotFound {
            origin,
            destination,
        } => anyhow::anyhow!(format_route_not_found_message(&origin, &destination)),
        RouteError::DatabaseNotFound { path } => anyhow::anyhow!(
            "No database at {}. Run `routewise init` or pass --db.",
            path.display()
        ),
        other => anyhow::Error::new(other),
    }
}

pub fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

pub fn format_route_not_found_message(origin: &str, destination: &str) -> String {
    format!(
        "No route found between {} and {}. Connect them with `routewise add-link`.",
        origin, destination
    )
}
