//! Department engagement analysis.
//!
//! This crate finds the departments where more than half of the employees
//! are both highly satisfied and highly engaged. It loads employee records
//! from CSV, aggregates them per department through a staged pipeline, and
//! writes the qualifying departments with their rounded percentage.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod io;
pub mod job;
pub mod models;
