//! The compute context that owns everything a run needs.
//!
//! An [`AnalysisContext`] is created once with [`AnalysisContext::initialize`],
//! passed by reference to whatever runs the pipeline, and released when it
//! is dropped or explicitly stopped. Its worker pool lives exactly as long
//! as the context.

use std::time::Instant;

use chrono::Utc;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;
use uuid::Uuid;

use crate::analysis::Pipeline;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{AnalysisReport, EmployeeRecord};

/// Version string embedded in every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An initialized analysis session.
///
/// # Example
///
/// ```
/// use engagement_analysis::config::AnalysisConfig;
/// use engagement_analysis::context::AnalysisContext;
/// use engagement_analysis::models::EmployeeRecord;
///
/// let context = AnalysisContext::initialize("doc-example", AnalysisConfig::default()).unwrap();
/// let report = context.analyze(&[EmployeeRecord::new("Sales", 5, "High")]);
/// assert_eq!(report.departments.len(), 1);
/// context.stop();
/// ```
pub struct AnalysisContext {
    id: Uuid,
    app_name: String,
    config: AnalysisConfig,
    pool: Option<ThreadPool>,
    started: Instant,
}

impl AnalysisContext {
    /// Validates the configuration and builds the worker pool.
    ///
    /// `parallelism` of 1 runs sequentially without a pool; 0 sizes the pool
    /// to the number of CPUs.
    pub fn initialize(app_name: impl Into<String>, config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;

        let app_name = app_name.into();
        let id = Uuid::new_v4();

        let pool = match config.parallelism {
            1 => None,
            threads => {
                let prefix = app_name.clone();
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(move |index| format!("{}-worker-{}", prefix, index))
                    .build()
                    .map_err(|e| AnalysisError::ContextInit {
                        message: e.to_string(),
                    })?;
                Some(pool)
            }
        };

        let context = Self {
            id,
            app_name,
            config,
            pool,
            started: Instant::now(),
        };

        info!(
            context_id = %context.id,
            app_name = %context.app_name,
            workers = context.worker_count(),
            "Analysis context initialized"
        );

        Ok(context)
    }

    /// Unique identifier of this context.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The application name given at initialization.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The validated configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of threads the counting stages run on.
    pub fn worker_count(&self) -> usize {
        self.pool.as_ref().map_or(1, ThreadPool::current_num_threads)
    }

    /// Builds a pipeline bound to this context's configuration and pool.
    pub fn pipeline(&self) -> Pipeline<'_> {
        let pipeline = Pipeline::new(&self.config);
        match &self.pool {
            Some(pool) => pipeline.with_pool(pool),
            None => pipeline,
        }
    }

    /// Runs the pipeline and wraps its output in a report.
    pub fn analyze(&self, records: &[EmployeeRecord]) -> AnalysisReport {
        let run_id = Uuid::new_v4();
        let output = self.pipeline().run(records);

        info!(
            context_id = %self.id,
            run_id = %run_id,
            records = output.summary.total_records,
            departments = output.summary.departments_observed,
            qualifying = output.summary.departments_qualifying,
            duration_us = output.trace.duration_us,
            "Analysis completed"
        );

        AnalysisReport {
            run_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            summary: output.summary,
            departments: output.results,
            audit_trace: output.trace,
        }
    }

    /// Releases the context. Dropping it has the same effect.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for AnalysisContext {
    fn drop(&mut self) {
        // Dropping the pool signals its workers to exit
        self.pool.take();
        info!(
            context_id = %self.id,
            app_name = %self.app_name,
            uptime_ms = self.started.elapsed().as_millis() as u64,
            "Analysis context released"
        );
    }
}

impl std::fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("id", &self.id)
            .field("app_name", &self.app_name)
            .field("workers", &self.worker_count())
            .finish()
    }
}
