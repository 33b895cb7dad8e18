//! The teammate search: list matches, fetch each match's players, tally, rank.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use super::aggregator::{GameCount, TeammateFilter, TeammateTally};
use super::ranking::rank_teammates;
use crate::config::Config;
use crate::data_fetcher::api::{
    RequestPacer, create_http_client_with_timeout, fetch_match_players, fetch_recent_matches,
};
use crate::error::AppError;

/// What happened to the listed matches during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Matches returned by the history API
    pub matches_listed: usize,
    /// Matches below the minimum duration, never requested
    pub skipped_short: usize,
    /// Detail requests issued
    pub details_requested: usize,
    /// Matches whose detail had no player list
    pub details_unavailable: usize,
    /// Matches whose detail request failed and were skipped
    pub details_failed: usize,
    /// Matches that contributed to the tally
    pub matches_counted: usize,
}

/// Result of one run, ready for an output adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub account_id: i64,
    pub window_days: u32,
    pub generated_at: DateTime<Utc>,
    pub stats: RunStats,
    pub teammates: Vec<GameCount>,
}

/// Finds the players the tracked account queued with most often.
///
/// Everything a run needs is passed in at construction, nothing is read from globals.
#[derive(Debug, Clone)]
pub struct TeammateFinder {
    client: Client,
    config: Config,
}

impl TeammateFinder {
    pub fn new(client: Client, config: Config) -> Self {
        TeammateFinder { client, config }
    }

    /// Builds the HTTP client from the configured timeout.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Teammates of the last window, sorted by shared games, most first.
    pub async fn fetch_player_history(&self) -> Result<Vec<GameCount>, AppError> {
        Ok(self.run().await?.teammates)
    }

    /// Runs the whole search and keeps the per-run statistics.
    ///
    /// A failure to list matches aborts the run. A failed detail request only
    /// skips its match, unless the API rejected the token.
    #[instrument(skip(self), fields(account_id = self.config.tracked_account_id))]
    pub async fn run(&self) -> Result<HistoryReport, AppError> {
        let config = &self.config;
        let account_id = config.tracked_account_id;
        let matches =
            fetch_recent_matches(&self.client, config, account_id, config.window_days).await?;

        let filter = TeammateFilter::from_config(config);
        let mut pacer = RequestPacer::from_config(config);
        let mut tally = TeammateTally::new();
        let mut stats = RunStats {
            matches_listed: matches.len(),
            ..RunStats::default()
        };

        let total = matches.len();
        for (index, summary) in matches.iter().enumerate() {
            info!("> Game {}/{} ({})", index + 1, total, summary.match_id);

            if !summary.is_long_enough(config.min_duration_seconds) {
                stats.skipped_short += 1;
                continue;
            }

            pacer.wait_turn().await;
            stats.details_requested += 1;

            let players = match fetch_match_players(&self.client, config, summary.match_id).await
            {
                Ok(Some(players)) => players,
                Ok(None) => {
                    stats.details_unavailable += 1;
                    continue;
                }
                Err(e) if e.is_auth_failure() => {
                    error!("Detail API rejected the token, aborting: {e}");
                    return Err(e);
                }
                Err(e) => {
                    warn!("Skipping match {}: {e}", summary.match_id);
                    stats.details_failed += 1;
                    continue;
                }
            };

            tally.add_match(&filter, summary, &players);
            stats.matches_counted += 1;
        }

        info!(
            "Processed {} matches: {} counted, {} short, {} without players, {} failed",
            stats.matches_listed,
            stats.matches_counted,
            stats.skipped_short,
            stats.details_unavailable,
            stats.details_failed
        );

        Ok(HistoryReport {
            account_id,
            window_days: config.window_days,
            generated_at: Utc::now(),
            stats,
            teammates: rank_teammates(tally),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{TEST_STREAMER_ID, TEST_TOKEN, TestDataBuilder as TB};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    async fn mount_history(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(TB::history_path()))
            .and(query_param("date", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_detail(server: &MockServer, match_id: i64, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/graphql"))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .and(query_param("query", TB::stratz_query(match_id).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn expect_no_detail_requests(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }

    fn finder(server: &MockServer) -> TeammateFinder {
        TeammateFinder::from_config(TB::config_for_mock_server(&server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_empty_history_makes_no_detail_requests() {
        let server = MockServer::start().await;
        mount_history(&server, TB::history_body(&[])).await;
        expect_no_detail_requests(&server).await;

        let report = finder(&server).run().await.unwrap();
        assert!(report.teammates.is_empty());
        assert_eq!(report.stats.details_requested, 0);
    }

    #[tokio::test]
    async fn test_short_game_is_never_requested() {
        let server = MockServer::start().await;
        mount_history(&server, TB::history_body(&[TB::summary(1, 599, 1)])).await;
        expect_no_detail_requests(&server).await;

        let report = finder(&server).run().await.unwrap();
        assert!(report.teammates.is_empty());
        assert_eq!(report.stats.skipped_short, 1);
        assert_eq!(report.stats.details_requested, 0);
    }

    #[tokio::test]
    async fn test_detail_without_players_is_skipped() {
        let server = MockServer::start().await;
        mount_history(&server, TB::history_body(&[TB::summary(1, 700, 1)])).await;
        mount_detail(&server, 1, TB::stratz_no_players_body()).await;

        let report = finder(&server).run().await.unwrap();
        assert!(report.teammates.is_empty());
        assert_eq!(report.stats.details_unavailable, 1);
    }

    #[tokio::test]
    async fn test_slot_filter_excludes_far_slots() {
        let server = MockServer::start().await;
        mount_history(&server, TB::history_body(&[TB::summary(1, 700, 1)])).await;
        mount_detail(
            &server,
            1,
            TB::stratz_players_body(&[TB::player(Some(7), 2), TB::player(Some(8), 9)]),
        )
        .await;

        let teammates = finder(&server).fetch_player_history().await.unwrap();
        assert_eq!(teammates, vec![GameCount { id: 7, count: 1 }]);
    }

    #[tokio::test]
    async fn test_teammate_counted_across_two_matches() {
        let server = MockServer::start().await;
        mount_history(
            &server,
            TB::history_body(&[TB::summary(1, 700, 1), TB::summary(2, 1900, 129)]),
        )
        .await;
        mount_detail(
            &server,
            1,
            TB::stratz_players_body(&[
                TB::player(Some(TEST_STREAMER_ID), 1),
                TB::player(Some(7), 2),
            ]),
        )
        .await;
        mount_detail(
            &server,
            2,
            TB::stratz_players_body(&[
                TB::player(Some(7), 130),
                TB::player(Some(TEST_STREAMER_ID), 129),
            ]),
        )
        .await;

        let teammates = finder(&server).fetch_player_history().await.unwrap();
        assert_eq!(teammates, vec![GameCount { id: 7, count: 2 }]);
    }

    #[tokio::test]
    async fn test_failed_detail_is_skipped_not_fatal() {
        let server = MockServer::start().await;
        mount_history(
            &server,
            TB::history_body(&[TB::summary(1, 700, 1), TB::summary(2, 700, 1)]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/graphql"))
            .and(query_param("query", TB::stratz_query(1).as_str()))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        mount_detail(&server, 2, TB::stratz_players_body(&[TB::player(Some(7), 3)])).await;

        let report = finder(&server).run().await.unwrap();
        assert_eq!(report.teammates, vec![GameCount { id: 7, count: 1 }]);
        assert_eq!(report.stats.details_failed, 1);
        assert_eq!(report.stats.matches_counted, 1);
    }

    #[tokio::test]
    async fn test_malformed_detail_is_skipped_not_fatal() {
        let server = MockServer::start().await;
        mount_history(
            &server,
            TB::history_body(&[TB::summary(1, 700, 1), TB::summary(2, 700, 1)]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/graphql"))
            .and(query_param("query", TB::stratz_query(1).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        mount_detail(&server, 2, TB::stratz_players_body(&[TB::player(Some(7), 3)])).await;

        let report = finder(&server).run().await.unwrap();
        assert_eq!(report.teammates.len(), 1);
        assert_eq!(report.stats.details_failed, 1);
    }

    #[tokio::test]
    async fn test_rejected_token_aborts_run() {
        let server = MockServer::start().await;
        mount_history(
            &server,
            TB::history_body(&[TB::summary(1, 700, 1), TB::summary(2, 700, 1)]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = finder(&server).run().await.unwrap_err();
        assert!(matches!(err, AppError::ApiUnauthorized { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_history_failure_aborts_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TB::history_path()))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        expect_no_detail_requests(&server).await;

        let err = finder(&server).fetch_player_history().await.unwrap_err();
        assert!(matches!(err, AppError::ApiServiceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_opendota_detail_provider() {
        let server = MockServer::start().await;
        mount_history(&server, TB::history_body(&[TB::summary(5, 2500, 0)])).await;
        Mock::given(method("GET"))
            .and(path("/matches/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "match_id": 5,
                "players": [
                    {"account_id": TEST_STREAMER_ID, "player_slot": 0},
                    {"account_id": 21, "player_slot": 1},
                    {"account_id": 22, "player_slot": 128}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            detail_provider: crate::config::DetailProviderKind::OpenDota,
            stratz_token: None,
            ..TB::config_for_mock_server(&server.uri())
        };
        let teammates = TeammateFinder::from_config(config)
            .unwrap()
            .fetch_player_history()
            .await
            .unwrap();
        assert_eq!(teammates, vec![GameCount { id: 21, count: 1 }]);
    }

    #[tokio::test]
    async fn test_delay_only_before_long_match_details() {
        let server = MockServer::start().await;
        mount_history(
            &server,
            TB::history_body(&[
                TB::summary(1, 700, 1),
                TB::summary(2, 100, 1),
                TB::summary(3, 700, 1),
            ]),
        )
        .await;
        mount_detail(&server, 1, TB::stratz_players_body(&[TB::player(Some(7), 2)])).await;
        mount_detail(&server, 3, TB::stratz_players_body(&[TB::player(Some(7), 3)])).await;

        let delay_ms = 250;
        let config = Config {
            request_delay_ms: delay_ms,
            ..TB::config_for_mock_server(&server.uri())
        };
        let finder = TeammateFinder::from_config(config).unwrap();

        let started = std::time::Instant::now();
        let report = finder.run().await.unwrap();
        let elapsed = started.elapsed();

        // Two detail requests, two pauses; the short game adds none
        assert!(
            elapsed >= std::time::Duration::from_millis(2 * delay_ms),
            "elapsed {elapsed:?}"
        );
        assert!(
            elapsed < std::time::Duration::from_millis(3 * delay_ms),
            "elapsed {elapsed:?}"
        );
        assert_eq!(report.teammates, vec![GameCount { id: 7, count: 2 }]);
        assert_eq!(report.stats.skipped_short, 1);
        assert_eq!(report.stats.details_requested, 2);
    }
}
