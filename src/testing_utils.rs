use crate::config::{Config, DetailProviderKind};
use crate::data_fetcher::models::{MatchPlayerRecord, MatchSummary};
use serde_json::{Value, json};

/// Account used as the tracked player in tests
pub const TEST_STREAMER_ID: i64 = 92832630;

/// Bearer token expected by mock detail endpoints
pub const TEST_TOKEN: &str = "test-token";

/// Test utilities for creating mock data and configs pointed at mock servers
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Config pointed at a mock server: history at `{uri}`, GraphQL at `{uri}/graphql`,
    /// no pacing delay and no retries.
    pub fn config_for_mock_server(uri: &str) -> Config {
        Config {
            tracked_account_id: TEST_STREAMER_ID,
            stratz_token: Some(TEST_TOKEN.to_string()),
            detail_provider: DetailProviderKind::Stratz,
            history_api_base: uri.to_string(),
            detail_api_url: format!("{uri}/graphql"),
            request_delay_ms: 0,
            max_retries: 0,
            retry_base_delay_ms: 0,
            ..Config::default()
        }
    }

    /// Path of the history endpoint for the test streamer
    pub fn history_path() -> String {
        format!("/players/{TEST_STREAMER_ID}/matches")
    }

    /// A match summary of the tracked player
    pub fn summary(match_id: i64, duration: i64, player_slot: i32) -> MatchSummary {
        MatchSummary {
            match_id,
            duration,
            player_slot,
        }
    }

    /// History endpoint body for the given summaries
    pub fn history_body(summaries: &[MatchSummary]) -> Value {
        json!(summaries)
    }

    /// A detail record
    pub fn player(steam_account_id: Option<i64>, player_slot: i32) -> MatchPlayerRecord {
        MatchPlayerRecord {
            steam_account_id,
            player_slot,
        }
    }

    /// GraphQL body `{"data": {"match": {"players": [...]}}}`
    pub fn stratz_players_body(players: &[MatchPlayerRecord]) -> Value {
        json!({ "data": { "match": { "players": players } } })
    }

    /// GraphQL body of a match the API knows nothing about the players of
    pub fn stratz_no_players_body() -> Value {
        json!({ "data": { "match": {} } })
    }

    /// The GraphQL query string sent for `match_id`
    pub fn stratz_query(match_id: i64) -> String {
        crate::data_fetcher::api::build_match_players_query(match_id)
    }
}
