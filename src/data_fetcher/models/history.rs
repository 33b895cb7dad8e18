use serde::{Deserialize, Serialize};

/// One entry of `GET /players/{account_id}/matches`, seen from the tracked player.
///
/// The endpoint returns many more fields (hero, kills, lobby type...), only the
/// ones the teammate search needs are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: i64,
    /// Game length in seconds
    pub duration: i64,
    /// Slot the tracked player occupied in this match
    pub player_slot: i32,
}

impl MatchSummary {
    /// Short games (abandons, early surrenders) say nothing about who someone plays with.
    pub fn is_long_enough(&self, min_duration_seconds: i64) -> bool {
        self.duration >= min_duration_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_summary_ignores_extra_fields() {
        let json = r#"[
            {
                "match_id": 7891234560,
                "player_slot": 129,
                "radiant_win": true,
                "duration": 2411,
                "game_mode": 22,
                "lobby_type": 7,
                "hero_id": 14,
                "start_time": 1718000000,
                "kills": 4,
                "deaths": 9,
                "assists": 17
            }
        ]"#;

        let matches: Vec<MatchSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(
            matches,
            vec![MatchSummary {
                match_id: 7891234560,
                duration: 2411,
                player_slot: 129,
            }]
        );
    }

    #[test]
    fn test_match_summary_requires_duration() {
        let json = r#"{"match_id": 1, "player_slot": 0}"#;
        assert!(serde_json::from_str::<MatchSummary>(json).is_err());
    }

    #[test]
    fn test_is_long_enough_boundary() {
        let short = MatchSummary {
            match_id: 1,
            duration: 599,
            player_slot: 0,
        };
        let exact = MatchSummary {
            duration: 600,
            ..short
        };
        assert!(!short.is_long_enough(600));
        assert!(exact.is_long_enough(600));
    }
}
