use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};

use crate::db::{PrecipitationObservation, Station, TemperatureObservation, TemperatureStats};
use crate::services::{ObservationService, QueryError};

const DATE_HINT: &str =
    "Dates must be given as YYYY-MM-DD, with the end date not before the start date";

const INDEX_HTML: &str = "Available Routes:<br/>\
<br/>\
/api/precipitation<br/>\
- Prior year precipitation from all weather stations.<br/>\
<br/>\
/api/stations<br/>\
- List of weather station identifiers, names and locations.<br/>\
<br/>\
/api/temperature<br/>\
- Prior year temperature observations from all weather stations.<br/>\
<br/>\
/api/&lt;start&gt;<br/>\
- Minimum, maximum and average temperature from the start date (YYYY-MM-DD) through the last recorded date.<br/>\
<br/>\
/api/&lt;start&gt;/&lt;end&gt;<br/>\
- Minimum, maximum and average temperature between the start and end dates (YYYY-MM-DD), inclusive.<br/>";

#[derive(Clone)]
pub struct AppState {
    pub observation_service: ObservationService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A [`QueryError`] on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        let (status, hint) = match &err {
            QueryError::InvalidDateFormat(_) | QueryError::InvalidDateOrder { .. } => {
                (StatusCode::BAD_REQUEST, Some(DATE_HINT.to_string()))
            }
            QueryError::NoDataInRange(_) | QueryError::EmptyDataset => (StatusCode::NOT_FOUND, None),
            QueryError::StorageUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, None),
        };

        Self {
            status,
            body: ErrorResponse {
                error: err.to_string(),
                hint,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Log a failed request at a level matching its cause
fn reject(what: &str, err: QueryError) -> ApiError {
    match &err {
        QueryError::StorageUnavailable(_) => error!("Failed to fetch {}: {}", what, err),
        _ => warn!("Could not serve {}: {}", what, err),
    }
    ApiError::from(err)
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather station observations API",
        description = "Precipitation and temperature observations from weather stations"
    ),
    paths(
        health,
        get_precipitation,
        get_stations,
        get_temperature,
        get_temperature_stats_from,
        get_temperature_stats_between
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        Station,
        PrecipitationObservation,
        TemperatureObservation,
        TemperatureStats
    )),
    tags((name = "observations", description = "Station observation queries"))
)]
struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    // Each route also answers with a trailing slash, the form older clients link to
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/health/", get(health))
        .route("/precipitation", get(get_precipitation))
        .route("/precipitation/", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/stations/", get(get_stations))
        .route("/temperature", get(get_temperature))
        .route("/temperature/", get(get_temperature))
        .route("/{start}", get(get_temperature_stats_from))
        .route("/{start}/", get(get_temperature_stats_from))
        .route("/{start}/{end}", get(get_temperature_stats_between))
        .route("/{start}/{end}/", get(get_temperature_stats_between))
        .with_state(state);

    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "observations",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    get,
    path = "/api/precipitation",
    tag = "observations",
    responses(
        (status = 200, description = "Prior year precipitation, ascending by date", body = [PrecipitationObservation]),
        (status = 404, description = "Dataset is empty", body = ErrorResponse),
        (status = 503, description = "Dataset unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationObservation>>, ApiError> {
    debug!("Fetching prior year precipitation");
    let series = state
        .observation_service
        .prior_year_precipitation()
        .await
        .map_err(|e| reject("prior year precipitation", e))?;

    info!("Retrieved {} precipitation observations", series.len());
    Ok(Json(series))
}

#[utoipa::path(
    get,
    path = "/api/stations",
    tag = "observations",
    responses(
        (status = 200, description = "All weather stations", body = [Station]),
        (status = 503, description = "Dataset unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, ApiError> {
    debug!("Fetching station list");
    let stations = state
        .observation_service
        .all_stations()
        .await
        .map_err(|e| reject("stations", e))?;

    info!("Retrieved {} stations", stations.len());
    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/temperature",
    tag = "observations",
    responses(
        (status = 200, description = "Prior year temperature observations, ascending by date", body = [TemperatureObservation]),
        (status = 404, description = "Dataset is empty", body = ErrorResponse),
        (status = 503, description = "Dataset unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_temperature(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    debug!("Fetching prior year temperatures");
    let series = state
        .observation_service
        .prior_year_temperatures()
        .await
        .map_err(|e| reject("prior year temperatures", e))?;

    info!("Retrieved {} temperature observations", series.len());
    Ok(Json(series))
}

#[utoipa::path(
    get,
    path = "/api/{start}",
    tag = "observations",
    params(("start" = String, Path, description = "First date included, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Temperature statistics from start onwards", body = TemperatureStats),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 404, description = "No observations in range", body = ErrorResponse),
        (status = 503, description = "Dataset unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn get_temperature_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    debug!("Fetching temperature statistics from {}", start);
    let stats = state
        .observation_service
        .temperature_stats(&start, None)
        .await
        .map_err(|e| reject("temperature statistics", e))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/{start}/{end}",
    tag = "observations",
    params(
        ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date included, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Temperature statistics between start and end", body = TemperatureStats),
        (status = 400, description = "Malformed date or end before start", body = ErrorResponse),
        (status = 404, description = "No observations in range", body = ErrorResponse),
        (status = 503, description = "Dataset unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn get_temperature_stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    debug!("Fetching temperature statistics from {} to {}", start, end);
    let stats = state
        .observation_service
        .temperature_stats(&start, Some(&end))
        .await
        .map_err(|e| reject("temperature statistics", e))?;

    Ok(Json(stats))
}
