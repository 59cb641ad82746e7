//! Ranked leaderboard and its serialized forms.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record::{StatRecord, WorldRank};

/// A record annotated with its dense 1-based rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRecord {
    pub rank: usize,
    pub record: StatRecord,
}

/// Rank-annotated records in leaderboard order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaderboard {
    pub entries: Vec<RankedRecord>,
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten every entry into its output row.
    pub fn rows(&self) -> Vec<LeaderboardRow> {
        self.entries.iter().map(LeaderboardRow::from).collect()
    }

    /// Count successes, failures and inconsistent breakdowns.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_records(self.entries.iter().map(|e| &e.record))
    }
}

/// Worldwide rank for a success row, failure reason for a failed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RankOrReason {
    Rank(WorldRank),
    Reason(String),
}

impl std::fmt::Display for RankOrReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rank(rank) => write!(f, "{rank}"),
            Self::Reason(reason) => f.write_str(reason),
        }
    }
}

/// Flat row handed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: usize,
    pub identifier: String,
    pub display_name: Option<String>,
    pub total_solved: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub worldwide_rank_or_reason: RankOrReason,
}

impl From<&RankedRecord> for LeaderboardRow {
    fn from(entry: &RankedRecord) -> Self {
        let record = &entry.record;
        let worldwide_rank_or_reason = match record.failure_reason() {
            Some(reason) => RankOrReason::Reason(reason.to_string()),
            None => RankOrReason::Rank(record.world_rank),
        };
        Self {
            rank: entry.rank,
            identifier: record.identifier.clone(),
            display_name: record.display_name.clone(),
            total_solved: record.total_solved,
            easy: record.easy,
            medium: record.medium,
            hard: record.hard,
            worldwide_rank_or_reason,
        }
    }
}

/// Counts describing one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful records whose difficulty breakdown does not add up to the total
    pub inconsistent: usize,
}

impl BatchSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a StatRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            if record.is_success() {
                summary.succeeded += 1;
                if !record.breakdown_consistent() {
                    summary.inconsistent += 1;
                }
            } else {
                summary.failed += 1;
            }
        }
        summary
    }
}

/// JSON document written for a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardReport {
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub rows: Vec<LeaderboardRow>,
}

impl LeaderboardReport {
    pub fn new(leaderboard: &Leaderboard) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: leaderboard.summary(),
            rows: leaderboard.rows(),
        }
    }
}
