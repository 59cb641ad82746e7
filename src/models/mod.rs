// src/models/mod.rs

//! Domain models for the leaderboard application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod leaderboard;
mod profile;
mod record;

// Re-export all public types
pub use config::{
    BatchConfig, ClientConfig, Config, InputConfig, LoggingConfig, OutputConfig, OutputFormat,
    ResolverConfig,
};
pub use leaderboard::{
    BatchSummary, Leaderboard, LeaderboardReport, LeaderboardRow, RankOrReason, RankedRecord,
};
pub use profile::{Difficulty, DifficultyCounts, ProfileDetail, SkillTier, TopicCount};
pub use record::{AccountIdentifier, FailureReason, RecordStatus, StatRecord, WorldRank};
