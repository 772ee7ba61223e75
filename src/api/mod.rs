//! HTTP API module for the engagement analysis.
//!
//! This module exposes the aggregation pipeline over JSON: clients post
//! employee records and receive the qualifying-department report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, serve};
pub use request::AnalysisRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
