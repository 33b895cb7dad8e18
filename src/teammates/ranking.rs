use tracing::info;

use super::aggregator::{GameCount, TeammateTally};

/// Sorts teammates by shared games, most first. Ties keep first-seen order.
///
/// Logs one line per teammate.
pub fn rank_teammates(tally: TeammateTally) -> Vec<GameCount> {
    let mut ranked = tally.into_counts();
    // sort_by is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    for entry in &ranked {
        info!("{} games for {}", entry.count, entry.id);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_from(ids: &[i64]) -> TeammateTally {
        let mut tally = TeammateTally::new();
        for &id in ids {
            tally.record(id);
        }
        tally
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank_teammates(tally_from(&[1, 2, 2, 3, 3, 3]));
        assert_eq!(
            ranked,
            vec![
                GameCount { id: 3, count: 3 },
                GameCount { id: 2, count: 2 },
                GameCount { id: 1, count: 1 },
            ]
        );
    }

    #[test]
    fn test_rank_ties_keep_first_seen_order() {
        let ranked = rank_teammates(tally_from(&[5, 4, 9, 4, 5, 9]));
        let ids: Vec<i64> = ranked.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![5, 4, 9]);
    }

    #[test]
    fn test_rank_counts_non_increasing() {
        let ranked = rank_teammates(tally_from(&[1, 7, 7, 3, 9, 9, 9, 1, 2, 7, 7]));
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_teammates(TeammateTally::new()).is_empty());
    }
}
