//! Routewise travel HTTP service.
//!
//! # Endpoints
//!
//! - `GET /api/cities` - All locations ordered by name
//! - `GET /api/routes` - All stored links with endpoint names, newest first
//! - `POST /api/routes` - Persist a new link
//! - `POST /api/find-route` - Distance-optimal path between two locations
//! - `POST /api/compare-routes` - Fastest, cheapest and lowest-emission paths
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! Every handler opens its own store connection on the blocking thread pool,
//! reads a fresh snapshot and builds its own graph, so concurrent requests
//! share nothing mutable.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use routewise_lib::{
    compare_by_alternative_criteria, find_best_by_distance, Error as LibError, LinkRecord,
    Location, NewLink, PathResult, PathSummary,
};
use routewise_service_shared::{
    extract_or_generate_request_id, failure_reason, from_lib_error, health_live, health_ready,
    metrics_handler, record_link_created, record_route_calculated, record_route_failed,
    record_route_hops, AppState, CreateLinkRequest, FindRouteRequest, MetricsLayer,
    ProblemDetails, Validate, PROBLEM_INVALID_REQUEST,
};

type HandlerResult<T> = Result<T, ProblemDetails>;

/// Body returned after a link is stored.
#[derive(Debug, Serialize)]
pub struct LinkCreated {
    pub success: bool,
    pub route: LinkRecord,
}

/// Build the service router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/cities", get(list_cities))
        .route("/api/routes", get(list_links).post(create_link))
        .route("/api/find-route", post(find_route))
        .route("/api/compare-routes", post(compare_routes))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}

fn request_id(headers: &HeaderMap) -> String {
    extract_or_generate_request_id(headers).to_string()
}

fn rejection_problem(rejection: &JsonRejection, request_id: &str) -> ProblemDetails {
    ProblemDetails::new(PROBLEM_INVALID_REQUEST, "Invalid Request", rejection.status())
        .with_detail(rejection.body_text())
        .with_request_id(request_id)
}

fn lib_failure(error: &LibError, request_id: &str) -> ProblemDetails {
    warn!(request_id = %request_id, error = %error, "request failed");
    from_lib_error(error, request_id)
}

fn record_resolved(result: &PathResult) {
    record_route_calculated(result.criterion);
    record_route_hops(result.hop_count(), result.criterion);
}

/// Validate a route body and record validation failures.
fn parse_route_body(
    payload: Result<Json<FindRouteRequest>, JsonRejection>,
    request_id: &str,
) -> HandlerResult<FindRouteRequest> {
    let Json(request) = payload.map_err(|rejection| {
        record_route_failed("validation_error");
        rejection_problem(&rejection, request_id)
    })?;

    if let Err(problem) = request.validate(request_id) {
        record_route_failed("validation_error");
        return Err(*problem);
    }
    Ok(request)
}

/// Handle GET /api/cities.
async fn list_cities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Json<Vec<Location>>> {
    let request_id = request_id(&headers);
    let locations = state
        .with_store(|store| store.fetch_locations())
        .await
        .map_err(|e| lib_failure(&e, &request_id))?;
    Ok(Json(locations))
}

/// Handle GET /api/routes.
async fn list_links(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Json<Vec<LinkRecord>>> {
    let request_id = request_id(&headers);
    let records = state
        .with_store(|store| store.fetch_links_with_names())
        .await
        .map_err(|e| lib_failure(&e, &request_id))?;
    Ok(Json(records))
}

/// Handle POST /api/routes.
async fn create_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> HandlerResult<Json<LinkCreated>> {
    let request_id = request_id(&headers);
    let Json(request) = payload.map_err(|rejection| rejection_problem(&rejection, &request_id))?;
    request.validate(&request_id).map_err(|problem| *problem)?;

    let new_link: NewLink = request.into();
    let record = state
        .with_store(move |store| {
            let link = store.persist_link(&new_link)?;
            Ok(LinkRecord {
                time_minutes: link.time_minutes(),
                link,
                from_city: new_link.from_city,
                to_city: new_link.to_city,
                created_at: None,
            })
        })
        .await
        .map_err(|e| lib_failure(&e, &request_id))?;

    record_link_created(record.link.mode.as_str());
    info!(
        request_id = %request_id,
        id = record.link.id,
        from = %record.from_city,
        to = %record.to_city,
        "link stored"
    );

    Ok(Json(LinkCreated {
        success: true,
        route: record,
    }))
}

/// Handle POST /api/find-route.
async fn find_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<FindRouteRequest>, JsonRejection>,
) -> HandlerResult<Json<PathSummary>> {
    let request_id = request_id(&headers);
    let request = parse_route_body(payload, &request_id)?;
    let route_request = request.to_route_request();

    let result = state
        .with_store(move |store| {
            let network = store.load_network()?;
            find_best_by_distance(&network, &route_request)
        })
        .await
        .map_err(|e| {
            record_route_failed(failure_reason(&e));
            lib_failure(&e, &request_id)
        })?;

    record_resolved(&result);
    info!(
        request_id = %request_id,
        from = %request.from,
        to = %request.to,
        hops = result.hop_count(),
        distance = result.total_distance,
        "route computed"
    );

    Ok(Json(PathSummary::from_result(&result)))
}

/// Handle POST /api/compare-routes.
///
/// Returns up to three summaries in time, cost, emissions order; an
/// unreachable destination yields an empty array.
async fn compare_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<FindRouteRequest>, JsonRejection>,
) -> HandlerResult<Json<Vec<PathSummary>>> {
    let request_id = request_id(&headers);
    let request = parse_route_body(payload, &request_id)?;
    let route_request = request.to_route_request();

    let results = state
        .with_store(move |store| {
            let network = store.load_network()?;
            compare_by_alternative_criteria(&network, &route_request)
        })
        .await
        .map_err(|e| {
            record_route_failed(failure_reason(&e));
            lib_failure(&e, &request_id)
        })?;

    if results.is_empty() {
        record_route_failed("no_path");
    }
    results.iter().for_each(record_resolved);
    info!(
        request_id = %request_id,
        from = %request.from,
        to = %request.to,
        options = results.len(),
        "routes compared"
    );

    Ok(Json(results.iter().map(PathSummary::from_result).collect()))
}
