pub mod aggregator;
pub mod classify;
pub mod config;
pub mod dates;
pub mod progress;
pub mod report;
