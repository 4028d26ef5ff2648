pub mod actions;
pub mod aggregation;
pub mod config;
pub mod queries;
