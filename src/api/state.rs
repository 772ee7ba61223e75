//! Application state for the engagement analysis API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::context::AnalysisContext;

/// Shared application state.
///
/// Holds the analysis context every request runs against.
#[derive(Clone)]
pub struct AppState {
    context: Arc<AnalysisContext>,
}

impl AppState {
    /// Creates a new application state around an initialized context.
    pub fn new(context: AnalysisContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Returns a reference to the analysis context.
    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }
}
