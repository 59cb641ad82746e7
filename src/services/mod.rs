//! Service layer for the leaderboard application.
//!
//! This module contains the business logic for:
//! - Reference resolution (`IdentifierResolver`)
//! - Remote stats lookup (`StatsClient`, behind `StatsSource`)
//! - Batch orchestration (`BatchOrchestrator`)
//! - Leaderboard ranking (`rank`)

mod orchestrator;
mod ranker;
mod resolver;
mod stats_client;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::BatchOrchestrator;
pub use ranker::rank;
pub use resolver::IdentifierResolver;
pub use stats_client::{StatsClient, StatsSource};
