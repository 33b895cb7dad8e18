use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::data_fetcher::models::{MatchPlayerRecord, MatchSummary};

/// Number of qualifying matches a player shared with the tracked account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameCount {
    pub id: i64,
    pub count: u32,
}

/// Decides whether a match participant counts as a teammate of the tracked player.
///
/// Teams are not exposed by the detail query, so slot proximity stands in for them:
/// slots of one team are numbered next to each other, opponents sit far away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeammateFilter {
    pub tracked_account_id: i64,
    pub max_slot_distance: i32,
}

impl TeammateFilter {
    pub fn from_config(config: &Config) -> Self {
        TeammateFilter {
            tracked_account_id: config.tracked_account_id,
            max_slot_distance: config.max_slot_distance,
        }
    }

    /// The teammate's account id, or `None` if the record must not be counted.
    pub fn teammate_id(&self, record: &MatchPlayerRecord, tracked_slot: i32) -> Option<i64> {
        let id = record.steam_account_id?;
        if id == self.tracked_account_id {
            return None;
        }
        let max_distance = u32::try_from(self.max_slot_distance).unwrap_or(0);
        if record.player_slot.abs_diff(tracked_slot) > max_distance {
            return None;
        }
        Some(id)
    }
}

/// Accumulates teammate counts over one run.
///
/// Entries keep first-seen order so that ranking with a stable sort is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TeammateTally {
    counts: Vec<GameCount>,
    index: HashMap<i64, usize>,
}

impl TeammateTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one shared game with `id`.
    pub fn record(&mut self, id: i64) {
        match self.index.get(&id) {
            Some(&slot) => self.counts[slot].count += 1,
            None => {
                self.index.insert(id, self.counts.len());
                self.counts.push(GameCount { id, count: 1 });
            }
        }
    }

    /// Counts the teammates of one match. Returns how many players were counted.
    ///
    /// A player listed twice in the same match is counted once.
    pub fn add_match(
        &mut self,
        filter: &TeammateFilter,
        summary: &MatchSummary,
        players: &[MatchPlayerRecord],
    ) -> usize {
        let mut seen = HashSet::new();
        for player in players {
            if let Some(id) = filter.teammate_id(player, summary.player_slot)
                && seen.insert(id)
            {
                self.record(id);
            }
        }
        seen.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: i64) -> Option<u32> {
        self.index.get(&id).map(|&slot| self.counts[slot].count)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts in first-seen order.
    pub fn into_counts(self) -> Vec<GameCount> {
        self.counts
    }
}
