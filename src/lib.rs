//! Helpers for analyzing a directory of per-symbol price CSVs: corpus
//! loading, traded-volume ranking, percentage returns, a Sharpe ratio, a
//! generic mode, and simple linear regression with a scatter/fit figure.

pub mod analysis;
pub mod config;
pub mod data;
pub mod plot;
