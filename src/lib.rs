//! Extracts per-course metadata from a Canvas LMS instance into a tabular report.

pub mod core;
pub mod error;
pub mod http;
pub mod model;
pub mod utils;
