//! Full profile detail for a single account.

use serde::Serialize;

use super::record::{AccountIdentifier, RecordStatus, StatRecord, WorldRank};

/// Difficulty bucket of solved problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Exact, case-sensitive label used by the remote service.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::All => "All",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Solved-problem counts by difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCounts {
    pub total: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

impl DifficultyCounts {
    pub fn get(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::All => self.total,
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Fraction of the total that falls in `difficulty`, or 0.0 when nothing is solved.
    pub fn share(&self, difficulty: Difficulty) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(difficulty) as f64 / self.total as f64
    }
}

/// Skill tier grouping for topic counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    Fundamental,
    Intermediate,
    Advanced,
}

/// Problems solved under one topic tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCount {
    pub tier: SkillTier,
    pub name: String,
    pub slug: String,
    pub solved: u64,
}

/// Everything known about one account, as consumed by the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetail {
    pub identifier: AccountIdentifier,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub websites: Vec<String>,
    pub world_rank: WorldRank,
    pub counts: DifficultyCounts,
    pub topics: Vec<TopicCount>,
}

impl ProfileDetail {
    /// Topics with at least one solved problem, fundamental tier first.
    pub fn solved_topics(&self) -> Vec<&TopicCount> {
        let mut topics: Vec<&TopicCount> = self.topics.iter().filter(|t| t.solved > 0).collect();
        topics.sort_by_key(|t| t.tier);
        topics
    }

    /// Summarize as a successful leaderboard record.
    pub fn to_record(&self) -> StatRecord {
        StatRecord {
            identifier: self.identifier.to_string(),
            display_name: self.display_name.clone(),
            total_solved: self.counts.total,
            easy: self.counts.easy,
            medium: self.counts.medium,
            hard: self.counts.hard,
            world_rank: self.world_rank,
            status: RecordStatus::Success,
        }
    }
}
