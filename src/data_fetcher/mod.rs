pub mod api;
pub mod models;

pub use api::{fetch_match_players, fetch_recent_matches};
pub use models::{MatchPlayerRecord, MatchSummary};
