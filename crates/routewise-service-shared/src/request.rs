//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use routewise_lib::{
    is_valid_link_distance, NewLink, RouteRequest, SearchStrategy, TransportMode,
    MAX_LINK_DISTANCE_KM,
};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require_non_empty(value: &str, field: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.trim().is_empty() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", field),
            request_id,
        )));
    }
    Ok(())
}

/// Body of `POST /api/find-route` and `POST /api/compare-routes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRouteRequest {
    /// Origin location name.
    pub from: String,

    /// Destination location name.
    pub to: String,

    /// Search strategy; both strategies return identical paths.
    #[serde(default)]
    pub strategy: SearchStrategy,
}

impl FindRouteRequest {
    /// Convert to a library request.
    pub fn to_route_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.clone(), self.to.clone()).with_strategy(self.strategy)
    }
}

impl Validate for FindRouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_non_empty(&self.from, "from", request_id)?;
        require_non_empty(&self.to, "to", request_id)?;

        if self.from == self.to {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'from' and 'to' fields must name different locations (both are '{}')",
                    self.from
                ),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Body of `POST /api/routes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    /// Name of one endpoint.
    pub from_city: String,

    /// Name of the other endpoint.
    pub to_city: String,

    /// Distance in kilometres.
    pub distance: f64,

    /// Transport mode label: CAR, BUS, METRO or WALK.
    pub mode: String,
}

impl From<CreateLinkRequest> for NewLink {
    fn from(value: CreateLinkRequest) -> Self {
        NewLink {
            from_city: value.from_city,
            to_city: value.to_city,
            distance: value.distance,
            mode: value.mode,
        }
    }
}

impl Validate for CreateLinkRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_non_empty(&self.from_city, "from_city", request_id)?;
        require_non_empty(&self.to_city, "to_city", request_id)?;

        if !is_valid_link_distance(self.distance) {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'distance' field must be a positive number of at most {} km",
                    MAX_LINK_DISTANCE_KM
                ),
                request_id,
            )));
        }

        if TransportMode::parse_known(&self.mode).is_none() {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'mode' field must be one of CAR, BUS, METRO, WALK (got '{}')",
                    self.mode
                ),
                request_id,
            )));
        }

        Ok(())
    }
}
