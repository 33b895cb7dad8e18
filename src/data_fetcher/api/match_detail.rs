use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::fetch_utils::{ApiRequest, RetryPolicy, fetch};
use super::urls::{build_match_players_query, build_opendota_match_url};
use crate::config::{Config, DetailProviderKind};
use crate::data_fetcher::models::{GraphQlResponse, MatchPlayerRecord, MatchQueryData, OpenDotaMatch};
use crate::error::AppError;

/// Fetches the slot and account of every player of a match from the configured provider.
///
/// `Ok(None)` means the provider has no player list for this match (unparsed replay,
/// private lobby...). That is not an error, the match is simply not counted.
pub async fn fetch_match_players(
    client: &Client,
    config: &Config,
    match_id: i64,
) -> Result<Option<Vec<MatchPlayerRecord>>, AppError> {
    match config.detail_provider {
        DetailProviderKind::Stratz => fetch_stratz_players(client, config, match_id).await,
        DetailProviderKind::OpenDota => fetch_opendota_players(client, config, match_id).await,
    }
}

#[instrument(skip(client, config))]
async fn fetch_stratz_players(
    client: &Client,
    config: &Config,
    match_id: i64,
) -> Result<Option<Vec<MatchPlayerRecord>>, AppError> {
    let url = config.detail_api_url.as_str();
    let request = ApiRequest::get(url)
        .query("query", build_match_players_query(match_id))
        .bearer(config.stratz_token.as_deref());

    let response: GraphQlResponse<MatchQueryData> =
        fetch(client, &request, &RetryPolicy::from_config(config)).await?;

    let errors = response.error_summary();
    let stratz_match = response.data.and_then(|data| data.match_detail);

    match (stratz_match, errors) {
        (None, Some(message)) => Err(AppError::api_graphql(message, url)),
        (None, None) => {
            debug!("No match object for {match_id}");
            Ok(None)
        }
        (Some(stratz_match), errors) => {
            if let Some(message) = errors {
                warn!("Partial GraphQL errors for match {match_id}: {message}");
            }
            if stratz_match.players.is_none() {
                debug!("Match {match_id} has no players field");
            }
            Ok(stratz_match.players)
        }
    }
}

#[instrument(skip(client, config))]
async fn fetch_opendota_players(
    client: &Client,
    config: &Config,
    match_id: i64,
) -> Result<Option<Vec<MatchPlayerRecord>>, AppError> {
    let url = build_opendota_match_url(&config.history_api_base, match_id);
    let opendota_match: OpenDotaMatch =
        fetch(client, &ApiRequest::get(&url), &RetryPolicy::from_config(config)).await?;

    Ok(opendota_match
        .players
        .map(|players| players.into_iter().map(MatchPlayerRecord::from).collect()))
}
