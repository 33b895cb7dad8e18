//! Clients for the match-history and match-detail APIs

pub mod fetch_utils;
pub mod http_client;
pub mod match_detail;
pub mod match_history;
pub mod pacing;
pub mod urls;

pub use fetch_utils::{ApiRequest, RetryPolicy, fetch};
pub use http_client::create_http_client_with_timeout;
pub use match_detail::fetch_match_players;
pub use match_history::fetch_recent_matches;
pub use pacing::RequestPacer;
pub use urls::{build_match_players_query, build_opendota_match_url, build_player_matches_url};
