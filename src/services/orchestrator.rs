// src/services/orchestrator.rs

//! Batch orchestrator.
//!
//! Drives resolution and remote lookup for every reference in a batch.
//! Each item is isolated: whatever happens to one reference ends up as
//! exactly one record in the same position, success or failure.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::LookupResult;
use crate::models::{AccountIdentifier, BatchConfig, FailureReason, ProfileDetail, StatRecord};

use super::resolver::IdentifierResolver;
use super::stats_client::StatsSource;

/// Runs a batch of profile references through resolver and stats source.
pub struct BatchOrchestrator<S> {
    resolver: IdentifierResolver,
    source: S,
    config: BatchConfig,
}

impl<S: StatsSource> BatchOrchestrator<S> {
    pub fn new(resolver: IdentifierResolver, source: S, config: BatchConfig) -> Self {
        Self {
            resolver,
            source,
            config,
        }
    }

    /// Look up every reference, preserving input length and order.
    pub async fn run(&self, references: &[String]) -> Vec<StatRecord> {
        let concurrency = self.config.max_concurrent.max(1);

        log::info!(
            "Processing {} references with up to {} concurrent lookups",
            references.len(),
            concurrency
        );

        let mut records = Vec::with_capacity(references.len());
        let mut item_stream = stream::iter(references.iter().enumerate())
            .map(|(index, reference)| async move { (index, self.process(reference).await) })
            .buffered(concurrency);

        while let Some((index, record)) = item_stream.next().await {
            match record.failure_reason() {
                None => log::debug!(
                    "[{}/{}] {}: {} solved",
                    index + 1,
                    references.len(),
                    record.identifier,
                    record.total_solved
                ),
                Some(reason) => log::warn!(
                    "[{}/{}] {}: {}",
                    index + 1,
                    references.len(),
                    record.identifier,
                    reason
                ),
            }
            records.push(record);
        }

        records
    }

    /// Resolve and fetch one reference, converting every failure into a record.
    async fn process(&self, reference: &str) -> StatRecord {
        let Some(identifier) = self.resolver.resolve(reference) else {
            return StatRecord::failure(reference.trim(), FailureReason::InvalidReference);
        };

        // Per-item pacing; in-flight items wait concurrently.
        if self.config.request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        match self.fetch_with_retry(&identifier).await {
            Ok(detail) => {
                let record = detail.to_record();
                if !record.breakdown_consistent() {
                    let sum = record
                        .breakdown_sum()
                        .map_or_else(|| "overflow".to_string(), |sum| sum.to_string());
                    log::warn!(
                        "{}: easy+medium+hard = {} but total solved is {}",
                        record.identifier,
                        sum,
                        record.total_solved
                    );
                }
                record
            }
            Err(error) => StatRecord::failure(identifier.as_str(), FailureReason::from(&error)),
        }
    }

    /// Fetch with the retry policy applied to transient failures.
    async fn fetch_with_retry(
        &self,
        identifier: &AccountIdentifier,
    ) -> LookupResult<ProfileDetail> {
        let mut attempt: u32 = 0;
        loop {
            match self.source.fetch(identifier).await {
                Err(error) if error.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let backoff = self.backoff(attempt);
                    log::debug!(
                        "{}: {} (retry {}/{} in {:?})",
                        identifier,
                        error,
                        attempt,
                        self.config.max_retries,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                result => return result,
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}
