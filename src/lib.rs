//! Rocket League Earnings Toolkit
//!
//! Scrapes the Liquipedia Rocket League player earnings leaderboard and
//! analyzes regional differences in tournament prize money.
//!
//! This library provides:
//! - `records`: Player records, region classification, derived metrics
//! - `scrape`: Page fetch, wikitable extraction, row normalization
//! - `store`: CSV persistence for scraped records
//! - `stats`: Correlation, t-test, and summary statistic helpers
//! - `report`: Printed regional/correlation/efficiency analyses
//! - `charts`: PNG chart rendering
//!
//! Binaries:
//! - `scrape-earnings`: Scrape the leaderboard and save it as CSV
//! - `analyze-earnings`: Load the CSV, print analyses, render charts

pub mod charts;
pub mod records;
pub mod report;
pub mod scrape;
pub mod stats;
pub mod store;

// Re-export the types most callers need
pub use records::{classify_region, PlayerRecord, Region};
