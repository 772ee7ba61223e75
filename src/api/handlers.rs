//! HTTP request handlers for the engagement analysis API.
//!
//! This module contains the router, the handlers for `POST /analyze` (JSON
//! records) and `POST /analyze/csv` (raw CSV body), and the server entry point.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::AnalysisContext;
use crate::error::{AnalysisError, AnalysisResult};
use crate::io::read_employees;

use super::request::AnalysisRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/analyze/csv", post(analyze_csv_handler))
        .with_state(state)
}

/// Binds `addr` and serves the API until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> AnalysisResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AnalysisError::Server {
            message: format!("failed to bind {}: {}", addr, e),
        })?;

    info!(%addr, context_id = %state.context().id(), "Listening for analysis requests");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AnalysisError::Server {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Handler for POST /analyze endpoint.
///
/// Accepts employee records and returns the analysis report.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's description of the problem
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let records = request.records;
    let report = match run_blocking(state, move |context| Ok(context.analyze(&records))).await {
        Ok(report) => report,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        run_id = %report.run_id,
        records = report.summary.total_records,
        qualifying = report.summary.departments_qualifying,
        "Analysis request completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(report),
    )
        .into_response()
}

/// Handler for POST /analyze/csv endpoint.
///
/// Parses the body as CSV with a header row, using the context's
/// malformed-row policy, and returns the analysis report.
async fn analyze_csv_handler(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing CSV analysis request"
    );

    let outcome = run_blocking(state, move |context| {
        let loaded = read_employees(
            body.as_bytes(),
            "request body",
            context.config().malformed_rows,
        )?;
        let report = context.analyze(&loaded.records);
        Ok((loaded.rows_read, report))
    })
    .await;

    let (rows_read, report) = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "CSV body rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        run_id = %report.run_id,
        rows_read,
        qualifying = report.summary.departments_qualifying,
        "CSV analysis request completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(report),
    )
        .into_response()
}

/// Runs CPU-bound work against the context on the blocking thread pool.
async fn run_blocking<T, F>(state: AppState, work: F) -> AnalysisResult<T>
where
    T: Send + 'static,
    F: FnOnce(&AnalysisContext) -> AnalysisResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(state.context()))
        .await
        .map_err(|e| AnalysisError::Server {
            message: format!("analysis task failed: {}", e),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::models::{AnalysisReport, EmployeeRecord};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let context = AnalysisContext::initialize("api-test", AnalysisConfig::default())
            .expect("Failed to initialize context");
        AppState::new(context)
    }

    fn analyze_request(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_report() {
        let router = create_router(create_test_state());
        let request = AnalysisRequest {
            records: vec![
                EmployeeRecord::new("D1", 5, "High"),
                EmployeeRecord::new("D1", 5, "High"),
                EmployeeRecord::new("D1", 3, "Low"),
            ],
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = router.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: AnalysisReport = serde_json::from_slice(&body).unwrap();

        assert_eq!(report.departments.len(), 1);
        assert_eq!(report.departments[0].department, "D1");
        assert_eq!(report.departments[0].percentage.to_string(), "66.67");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router.oneshot(analyze_request("{invalid json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_records_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router.oneshot(analyze_request("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("records"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::from(r#"{"records": []}"#))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_empty_records_return_empty_report() {
        let router = create_router(create_test_state());

        let response = router.oneshot(analyze_request(r#"{"records": []}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: AnalysisReport = serde_json::from_slice(&body).unwrap();
        assert!(report.departments.is_empty());
        assert_eq!(report.summary.total_records, 0);
    }

    #[tokio::test]
    async fn test_csv_body_returns_report() {
        let router = create_router(create_test_state());
        let csv = "Department,SatisfactionRating,EngagementLevel\nD1,5,High\nD1,5,High\nD1,3,Low\n";
        let request = Request::builder()
            .method("POST")
            .uri("/analyze/csv")
            .header("Content-Type", "text/csv")
            .body(Body::from(csv))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: AnalysisReport = serde_json::from_slice(&body).unwrap();
        assert_eq!(report.departments[0].percentage.to_string(), "66.67");
    }

    #[tokio::test]
    async fn test_csv_body_missing_column_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/analyze/csv")
            .header("Content-Type", "text/csv")
            .body(Body::from("Department,SatisfactionRating\nD1,5\n"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INPUT_ERROR");
        assert!(error.message.contains("EngagementLevel"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_concurrent_requests_complete_on_single_threaded_runtime() {
        let config = AnalysisConfig {
            parallelism: 2,
            ..AnalysisConfig::default()
        };
        let context = AnalysisContext::initialize("api-test", config).unwrap();
        let router = create_router(AppState::new(context));

        let records: Vec<EmployeeRecord> = (0..5_000)
            .map(|i| EmployeeRecord::new(&format!("D{}", i % 4), 5, "High"))
            .collect();
        let body = serde_json::to_string(&AnalysisRequest { records }).unwrap();

        let (first, second) = tokio::join!(
            router.clone().oneshot(analyze_request(body.clone())),
            router.oneshot(analyze_request(body)),
        );

        for response in [first.unwrap(), second.unwrap()] {
            assert_eq!(response.status(), StatusCode::OK);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let report: AnalysisReport = serde_json::from_slice(&body).unwrap();
            assert_eq!(report.summary.total_records, 5_000);
            assert_eq!(report.departments.len(), 4);
        }
    }
}
