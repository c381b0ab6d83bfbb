//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use routewise_lib::Error as LibError;

/// Problem type URI for unknown location names.
pub const PROBLEM_UNKNOWN_LOCATION: &str = "/problems/unknown-location";

/// Problem type URI for routes that cannot be found.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., missing database).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use routewise_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_LOCATION};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_LOCATION,
///     "Unknown Location",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("Location 'Dubia' not found. Did you mean: Dubai?")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Candidate names for an unknown location.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            suggestions: Vec::new(),
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 400 Bad Request problem for an unknown location name.
    pub fn unknown_location(
        name: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Location '{}' not found", name)
        } else {
            format!(
                "Location '{}' not found. Did you mean: {}?",
                name,
                suggestions.join(", ")
            )
        };

        let mut problem = Self::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id);
        problem.suggestions = suggestions.to_vec();
        problem
    }

    /// Create a 404 Not Found problem for unreachable destinations.
    pub fn route_not_found(origin: &str, destination: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!(
            "No route exists from '{}' to '{}'",
            origin, destination
        ))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownLocation { name, suggestions } => {
            ProblemDetails::unknown_location(name, suggestions, request_id)
        }
        LibError::SameEndpoint { .. }
        | LibError::InvalidDistance { .. }
        | LibError::InvalidMode { .. }
        | LibError::InvalidStrategy { .. } => ProblemDetails::bad_request(error.to_string(), request_id),
        LibError::RouteNotFound {
            origin,
            destination,
        } => ProblemDetails::route_not_found(origin, destination, request_id),
        LibError::DatabaseNotFound { path } => ProblemDetails::service_unavailable(
            format!("Database not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_LOCATION);
        assert_eq!(problem.status, 400);
        assert_eq!(problem.content_type, "application/problem+json");
    }

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("Invalid JSON", "req-123");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_unknown_location_with_suggestions() {
        let suggestions = vec!["Dubai".to_string(), "Dibba".to_string()];
        let problem = ProblemDetails::unknown_location("Dubia", &suggestions, "req-456");

        assert_eq!(problem.status, 400);
        assert!(problem.detail.as_deref().unwrap().contains("Dubai, Dibba"));
        assert_eq!(problem.suggestions, suggestions);
    }

    #[test]
    fn test_unknown_location_no_suggestions() {
        let problem = ProblemDetails::unknown_location("XYZ", &[], "req-789");

        assert!(!problem.detail.as_deref().unwrap().contains("Did you mean"));
        let json = serde_json::to_string(&problem).unwrap();
        assert!(!json.contains("suggestions"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_status_mapping() {
        let cases = [
            (
                LibError::UnknownLocation {
                    name: "X".to_string(),
                    suggestions: vec![],
                },
                400,
            ),
            (
                LibError::SameEndpoint {
                    name: "Dubai".to_string(),
                },
                400,
            ),
            (LibError::InvalidDistance { distance: 0.0 }, 400),
            (
                LibError::InvalidMode {
                    mode: "BOAT".to_string(),
                },
                400,
            ),
            (
                LibError::RouteNotFound {
                    origin: "A".to_string(),
                    destination: "B".to_string(),
                },
                404,
            ),
            (
                LibError::DatabaseNotFound {
                    path: "/missing.db".into(),
                },
                503,
            ),
            (LibError::ProjectDirsUnavailable, 500),
        ];

        for (error, status) in cases {
            assert_eq!(from_lib_error(&error, "req").status, status, "{error}");
        }
    }

    #[test]
    fn test_from_lib_error_route_not_found_names_endpoints() {
        let error = LibError::RouteNotFound {
            origin: "Dubai".to_string(),
            destination: "Fujairah".to_string(),
        };
        let problem = from_lib_error(&error, "req-route");

        assert_eq!(problem.type_uri, PROBLEM_ROUTE_NOT_FOUND);
        assert!(problem.detail.as_deref().unwrap().contains("Fujairah"));
    }
}
