use serde::{Deserialize, Serialize};

/// One participant of a match, as far as the teammate search is concerned.
///
/// `steam_account_id` is `None` for anonymous profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPlayerRecord {
    #[serde(rename = "steamAccountId", default)]
    pub steam_account_id: Option<i64>,
    #[serde(rename = "playerSlot")]
    pub player_slot: i32,
}

/// Envelope of every GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// All error messages joined into one line.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// `data` of `{ match(id: N) { players { steamAccountId playerSlot } } }`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchQueryData {
    #[serde(rename = "match", default)]
    pub match_detail: Option<StratzMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StratzMatch {
    #[serde(default)]
    pub players: Option<Vec<MatchPlayerRecord>>,
}

/// `GET /matches/{match_id}` on OpenDota.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenDotaMatch {
    pub match_id: i64,
    #[serde(default)]
    pub players: Option<Vec<OpenDotaMatchPlayer>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpenDotaMatchPlayer {
    #[serde(default)]
    pub account_id: Option<i64>,
    pub player_slot: i32,
}

impl From<OpenDotaMatchPlayer> for MatchPlayerRecord {
    fn from(player: OpenDotaMatchPlayer) -> Self {
        MatchPlayerRecord {
            steam_account_id: player.account_id,
            player_slot: player.player_slot,
        }
    }
}
