//! Dota 2 Teammate Finder Library
//!
//! This library lists the recent matches of a tracked Dota 2 account, looks up who played
//! in each of them and ranks the players that shared the most games with the account.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dota_teammates::{Config, TeammateFinder};
//! use dota_teammates::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let finder = TeammateFinder::from_config(config)?;
//!
//!     for teammate in finder.fetch_player_history().await? {
//!         println!("{} games for {}", teammate.count, teammate.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod report;
pub mod teammates;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::{Config, DetailProviderKind};
pub use data_fetcher::models::{MatchPlayerRecord, MatchSummary};
pub use error::AppError;
pub use teammates::{GameCount, HistoryReport, RunStats, TeammateFinder};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
