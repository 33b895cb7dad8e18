use reqwest::Client;
use tracing::{info, instrument};

use super::fetch_utils::{ApiRequest, RetryPolicy, fetch};
use super::urls::build_player_matches_url;
use crate::config::Config;
use crate::data_fetcher::models::MatchSummary;
use crate::error::AppError;

/// Lists the tracked player's matches of the last `window_days` days, in API order.
///
/// Any failure here is fatal to the run: without the list there is nothing to aggregate.
#[instrument(skip(client, config))]
pub async fn fetch_recent_matches(
    client: &Client,
    config: &Config,
    account_id: i64,
    window_days: u32,
) -> Result<Vec<MatchSummary>, AppError> {
    let url = build_player_matches_url(&config.history_api_base, account_id);
    let request = ApiRequest::get(&url).query("date", window_days.to_string());

    let matches: Vec<MatchSummary> =
        fetch(client, &request, &RetryPolicy::from_config(config)).await?;

    info!(
        "Detected {} games in the past {} days for account {}",
        matches.len(),
        window_days,
        account_id
    );
    Ok(matches)
}
