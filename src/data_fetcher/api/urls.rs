//! URL building utilities for API endpoints

/// Builds the match-history URL of a player.
///
/// # Example
/// ```
/// use dota_teammates::data_fetcher::api::build_player_matches_url;
///
/// let url = build_player_matches_url("https://api.opendota.com/api", 92832630);
/// assert_eq!(url, "https://api.opendota.com/api/players/92832630/matches");
/// ```
pub fn build_player_matches_url(history_api_base: &str, account_id: i64) -> String {
    format!(
        "{}/players/{account_id}/matches",
        history_api_base.trim_end_matches('/')
    )
}

/// Builds the OpenDota URL of a single match.
///
/// # Example
/// ```
/// use dota_teammates::data_fetcher::api::build_opendota_match_url;
///
/// let url = build_opendota_match_url("https://api.opendota.com/api/", 7891234560);
/// assert_eq!(url, "https://api.opendota.com/api/matches/7891234560");
/// ```
pub fn build_opendota_match_url(history_api_base: &str, match_id: i64) -> String {
    format!(
        "{}/matches/{match_id}",
        history_api_base.trim_end_matches('/')
    )
}

/// Builds the GraphQL query asking for the slot and account of every player of a match.
///
/// # Example
/// ```
/// use dota_teammates::data_fetcher::api::build_match_players_query;
///
/// let query = build_match_players_query(42);
/// assert_eq!(query, "{match(id: 42) { players { steamAccountId playerSlot }}}");
/// ```
pub fn build_match_players_query(match_id: i64) -> String {
    format!("{{match(id: {match_id}) {{ players {{ steamAccountId playerSlot }}}}}}")
}
