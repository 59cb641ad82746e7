// src/services/ranker.rs

//! Leaderboard ranking.

use crate::models::{Leaderboard, RankedRecord, StatRecord};

/// Rank records by total solved, descending.
///
/// Equal totals keep their input order and still receive distinct,
/// consecutive ranks starting at 1.
pub fn rank(records: &[StatRecord]) -> Leaderboard {
    let mut sorted: Vec<&StatRecord> = records.iter().collect();
    // `sort_by` is stable, which keeps collection order among equal totals.
    sorted.sort_by(|a, b| b.total_solved.cmp(&a.total_solved));

    let entries = sorted
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedRecord {
            rank: index + 1,
            record: record.clone(),
        })
        .collect();

    Leaderboard { entries }
}
