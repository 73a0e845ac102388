//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::dataset::DataLoadError;
use crate::export::{EXPORT_FILENAME, ExportError, to_csv};
use crate::finder::{Finder, SearchError, SearchResult};
use crate::geocode::GeocodeError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/cinemas/nearest", get(nearest_cinemas))
        .route("/api/cinemas/nearest.csv", get(nearest_cinemas_csv))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> Response {
    match state.dataset.get().await {
        Ok(dataset) => render_page(IndexTemplate::new(&state.config, dataset.len())),
        Err(e) => {
            error!(error = %e, "cinema dataset unavailable");
            let page = ErrorTemplate {
                title: "Dataset unavailable".to_string(),
                message: "The cinema list could not be loaded.".to_string(),
                details: Some(e.to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, render_page(page)).into_response()
        }
    }
}

/// About page.
async fn about_page() -> Response {
    render_page(AboutTemplate)
}

/// Fallback for unknown paths.
async fn not_found() -> Response {
    let page = ErrorTemplate {
        title: "Not found".to_string(),
        message: "There is nothing at this address.".to_string(),
        details: None,
    };
    (StatusCode::NOT_FOUND, render_page(page)).into_response()
}

/// Render a full page, falling back to plain text if the template fails.
fn render_page(template: impl Template) -> Response {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Validate parameters, geocode the postcode and rank the dataset.
async fn run_search(state: &AppState, req: &NearestRequest) -> Result<SearchResult, AppError> {
    let params = state.config.params(req.max_km, req.count)?;
    let dataset = state.dataset.get().await?;

    let found = Finder::new(state.geocoder.as_ref(), &dataset)
        .search(&req.postcode, params)
        .await?;

    Ok(found)
}

/// Find the cinemas nearest to a postcode.
///
/// Returns the results fragment for HTML clients and JSON otherwise.
async fn nearest_cinemas(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<NearestRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let found = run_search(&state, &req).await?;

    if accepts_html(&headers) {
        let template =
            ResultsTemplate::from_search(&req.postcode, &found).map_err(|e| AppError::Internal {
                message: format!("Map data error: {}", e),
            })?;
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(NearestResponse::from_search(found)).into_response())
    }
}

/// Download the nearest cinemas as CSV.
async fn nearest_cinemas_csv(
    State(state): State<AppState>,
    query: Result<Query<NearestRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let found = run_search(&state, &req).await?;
    let body = to_csv(&found.results)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        ),
    ];

    Ok((headers, body).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            SearchError::Geocode(e) => AppError::from(e),
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        let message = e.user_message().to_string();
        match e {
            GeocodeError::EmptyInput => AppError::BadRequest { message },
            GeocodeError::InvalidPostcode { .. } => AppError::NotFound { message },
            GeocodeError::LookupFailed { .. } => {
                warn!(error = %e, "postcode lookup failed");
                AppError::BadGateway { message }
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: format!("invalid request: {}", e.body_text()),
        }
    }
}

impl From<DataLoadError> for AppError {
    fn from(e: DataLoadError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::dataset::{Dataset, DatasetCache};
    use crate::domain::{Cinema, GeoPoint};
    use crate::finder::SearchConfig;
    use crate::geocode::MockGeocoder;

    fn dataset() -> Dataset {
        let cinema = |name: &str, city: &str, lat: f64, lon: f64| {
            Cinema::new(name, city, "Odeon", "Odeon Cinemas", GeoPoint::new(lat, lon).unwrap())
        };
        Dataset::from_cinemas(vec![
            cinema("Leicester Square", "London", 51.5103, -0.1302),
            cinema("Trafalgar", "London", 51.5080, -0.1281),
            cinema("Manchester Printworks", "Manchester", 53.4851, -2.2402),
        ])
    }

    fn geocoder() -> MockGeocoder {
        MockGeocoder::new()
            .with_postcode("SW1A 2AA", 51.5033, -0.1276)
            .with_postcode("EH1 1YZ", 55.9533, -3.1883)
    }

    fn app_with(geocoder: MockGeocoder) -> Router {
        let state = AppState::new(
            DatasetCache::preloaded("cinemas.csv", dataset()),
            geocoder,
            SearchConfig::default(),
        );
        create_router(state, "static")
    }

    fn app() -> Router {
        app_with(geocoder())
    }

    async fn send(app: Router, uri: &str, accept: Option<&str>) -> (StatusCode, HeaderMap, String) {
        let mut req = Request::builder().uri(uri);
        if let Some(accept) = accept {
            req = req.header(header::ACCEPT, accept);
        }
        let response = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn error_of(body: &str) -> String {
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_check() {
        let (status, _, body) = send(app(), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_shows_dataset_size() {
        let (status, _, body) = send(app(), "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("3 cinema locations"));
    }

    #[tokio::test]
    async fn nearest_json() {
        let (status, _, body) =
            send(app(), "/api/cinemas/nearest?postcode=sw1a+2aa&max_km=10&count=5", None).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["max_km"], 10.0);
        assert_eq!(json["count"], 5);

        let names: Vec<&str> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Trafalgar", "Leicester Square"]);
    }

    #[tokio::test]
    async fn nearest_uses_defaults() {
        let (status, _, body) = send(app(), "/api/cinemas/nearest?postcode=SW1A2AA", None).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["max_km"], 10.0);
        assert_eq!(json["count"], 10);
    }

    #[tokio::test]
    async fn nearest_html_fragment() {
        let (status, _, body) = send(
            app(),
            "/api/cinemas/nearest?postcode=SW1A+2AA&max_km=10&count=5",
            Some("text/html"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<table"));
        assert!(body.contains("Trafalgar"));
        assert!(!body.contains("Manchester Printworks"));
    }

    #[tokio::test]
    async fn nothing_within_radius() {
        let (status, _, body) = send(
            app(),
            "/api/cinemas/nearest?postcode=EH1+1YZ&max_km=50&count=5",
            Some("text/html"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No cinemas found within 50 km"));
    }

    #[tokio::test]
    async fn empty_postcode_is_bad_request() {
        let (status, _, body) = send(app(), "/api/cinemas/nearest?postcode=+++", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&body), "Please enter a postcode.");
    }

    #[tokio::test]
    async fn unknown_postcode_is_not_found() {
        let (status, _, body) = send(app(), "/api/cinemas/nearest?postcode=ZZ99ZZZ", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            error_of(&body),
            "Invalid postcode. Please try a valid UK postcode."
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_bad_gateway() {
        let (status, _, body) = send(
            app_with(MockGeocoder::unavailable()),
            "/api/cinemas/nearest?postcode=SW1A2AA",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_of(&body), "Postcode lookup failed. Try again.");
    }

    #[tokio::test]
    async fn invalid_parameters() {
        let (status, _, body) =
            send(app(), "/api/cinemas/nearest?postcode=SW1A2AA&count=7", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_of(&body).contains("5, 10, 15, 20"));

        let (status, _, _) =
            send(app(), "/api/cinemas/nearest?postcode=SW1A2AA&max_km=51", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for uri in [
            "/api/cinemas/nearest?postcode=SW1A2AA&count=abc",
            "/api/cinemas/nearest?postcode=SW1A2AA&max_km=far",
            "/api/cinemas/nearest.csv?postcode=SW1A2AA&count=-5",
        ] {
            let (status, headers, body) = send(app(), uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(headers[header::CONTENT_TYPE], "application/json");
            assert!(error_of(&body).starts_with("invalid request: "), "{uri}");
        }
    }

    #[tokio::test]
    async fn csv_download() {
        let (status, headers, body) = send(
            app(),
            "/api/cinemas/nearest.csv?postcode=SW1A+2AA&max_km=10&count=5",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"nearest_cinemas.csv\""
        );

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines[0],
            "name,city,brand,operator,latitude,longitude,distance_km"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Trafalgar,London,"));
    }

    #[tokio::test]
    async fn missing_dataset_is_server_error() {
        let state = AppState::new(
            DatasetCache::new("/nonexistent/cinemas.csv"),
            geocoder(),
            SearchConfig::default(),
        );
        let app = create_router(state, "static");

        let (status, _, _) = send(app.clone(), "/api/cinemas/nearest?postcode=SW1A2AA", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _, body) = send(app, "/", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Dataset unavailable"));
    }

    #[tokio::test]
    async fn unknown_path() {
        let (status, _, body) = send(app(), "/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Not found"));
    }
}
