//! Teammate co-occurrence: filtering, tallying and ranking

pub mod aggregator;
pub mod pipeline;
pub mod ranking;

pub use aggregator::{GameCount, TeammateFilter, TeammateTally};
pub use pipeline::{HistoryReport, RunStats, TeammateFinder};
pub use ranking::rank_teammates;
