//! Per-account statistics records.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{LookupError, LookupErrorKind};

/// Canonical account key extracted from a profile reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    /// Wrap a raw identifier, rejecting empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Worldwide ranking reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorldRank {
    Ranked(u64),
    #[default]
    NotAvailable,
}

impl WorldRank {
    /// Sentinel text used when no ranking is available.
    pub const NOT_AVAILABLE: &'static str = "N/A";

    /// Interpret a loosely-typed ranking value.
    ///
    /// Numbers and numeric strings map to `Ranked`; anything else is `NotAvailable`.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => {
                n.as_u64().map_or(Self::NotAvailable, Self::Ranked)
            }
            Some(serde_json::Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map_or(Self::NotAvailable, Self::Ranked),
            _ => Self::NotAvailable,
        }
    }
}

impl fmt::Display for WorldRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranked(rank) => write!(f, "{rank}"),
            Self::NotAvailable => f.write_str(Self::NOT_AVAILABLE),
        }
    }
}

impl Serialize for WorldRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ranked(rank) => serializer.serialize_u64(*rank),
            Self::NotAvailable => serializer.serialize_str(Self::NOT_AVAILABLE),
        }
    }
}

/// User-visible reason attached to a failed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    InvalidReference,
    AccountNotFound,
    Transport(String),
    MalformedResponse(String),
}

impl From<&LookupError> for FailureReason {
    fn from(error: &LookupError) -> Self {
        match error.kind() {
            LookupErrorKind::AccountNotFound => Self::AccountNotFound,
            LookupErrorKind::TransportError => Self::Transport(error.to_string()),
            LookupErrorKind::MalformedResponse => match error {
                LookupError::MalformedResponse(detail) => Self::MalformedResponse(detail.clone()),
                other => Self::MalformedResponse(other.to_string()),
            },
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReference => {
                f.write_str("invalid reference: no identifier could be extracted")
            }
            Self::AccountNotFound => f.write_str("profile not found or private"),
            Self::Transport(detail) => write!(f, "remote service unavailable: {detail}"),
            Self::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

/// Outcome discriminator of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Success,
    Failure(FailureReason),
}

/// Normalized result of looking up one account.
///
/// Created once per batch item and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub identifier: String,
    pub display_name: Option<String>,
    pub total_solved: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub world_rank: WorldRank,
    pub status: RecordStatus,
}

impl StatRecord {
    /// Build a failure placeholder with zeroed counts.
    pub fn failure(identifier: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: None,
            total_solved: 0,
            easy: 0,
            medium: 0,
            hard: 0,
            world_rank: WorldRank::NotAvailable,
            status: RecordStatus::Failure(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match &self.status {
            RecordStatus::Success => None,
            RecordStatus::Failure(reason) => Some(reason),
        }
    }

    /// Sum of the difficulty breakdown, or `None` if it overflows.
    pub fn breakdown_sum(&self) -> Option<u64> {
        self.easy
            .checked_add(self.medium)
            .and_then(|sum| sum.checked_add(self.hard))
    }

    /// Whether easy + medium + hard adds up to the reported total.
    ///
    /// The remote does not guarantee this, so a mismatch is only an observation.
    /// An overflowing breakdown never matches.
    pub fn breakdown_consistent(&self) -> bool {
        self.breakdown_sum() == Some(self.total_solved)
    }
}
