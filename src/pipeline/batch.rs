// src/pipeline/batch.rs

//! Batch leaderboard pipeline.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::error::Result;
use crate::models::{BatchSummary, Config, Leaderboard};
use crate::services::{BatchOrchestrator, IdentifierResolver, StatsClient, StatsSource, rank};
use crate::storage::{read_references, write_leaderboard};

/// Look up every reference and rank the collected records.
pub async fn build_leaderboard<S: StatsSource>(
    orchestrator: &BatchOrchestrator<S>,
    references: &[String],
) -> Leaderboard {
    let records = orchestrator.run(references).await;
    rank(&records)
}

/// Run the batch leaderboard from a CSV input file.
///
/// Writes to `output` when given, otherwise to stdout.
pub async fn run_batch(
    config: &Config,
    input: &Path,
    output: Option<&Path>,
) -> Result<BatchSummary> {
    let start = Instant::now();
    let references = read_references(input, &config.input.column)?;
    log::info!(
        "Loaded {} profile references from {}",
        references.len(),
        input.display()
    );

    let client = StatsClient::new(&config.client)?;
    let orchestrator = BatchOrchestrator::new(
        IdentifierResolver::new(&config.resolver),
        client,
        config.batch.clone(),
    );
    let leaderboard = build_leaderboard(&orchestrator, &references).await;

    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_leaderboard(writer, &leaderboard, config.output.format, config.output.pretty)?;
            log::info!("Leaderboard saved to {}", path.display());
        }
        None => write_leaderboard(
            std::io::stdout().lock(),
            &leaderboard,
            config.output.format,
            config.output.pretty,
        )?,
    }

    let summary = leaderboard.summary();
    log::info!(
        "Batch complete in {:.1}s: {} profiles, {} succeeded, {} failed",
        start.elapsed().as_secs_f64(),
        summary.total,
        summary.succeeded,
        summary.failed
    );
    if summary.inconsistent > 0 {
        log::warn!(
            "{} profiles report a total that differs from easy+medium+hard",
            summary.inconsistent
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::AppError;
    use crate::models::{BatchConfig, FailureReason, RankOrReason, WorldRank};
    use crate::services::testing::FakeSource;

    fn orchestrator(source: FakeSource) -> BatchOrchestrator<FakeSource> {
        BatchOrchestrator::new(
            IdentifierResolver::default(),
            source,
            BatchConfig {
                max_concurrent: 2,
                max_retries: 0,
                retry_backoff_ms: 0,
                request_delay_ms: 0,
            },
        )
    }

    #[tokio::test]
    async fn test_end_to_end_mixed_batch() {
        let orchestrator = orchestrator(FakeSource::new().with_user("a", 42));
        let references = vec![
            "https://x/u/a".to_string(),
            "https://x/u/doesnotexist".to_string(),
            "not-a-url".to_string(),
        ];

        let board = build_leaderboard(&orchestrator, &references).await;

        assert_eq!(board.len(), 3);
        let first = &board.entries[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.record.identifier, "a");
        assert!(first.record.is_success());
        assert_eq!(first.record.world_rank, WorldRank::Ranked(1042));

        assert_eq!(
            board.entries[1].record.failure_reason(),
            Some(&FailureReason::AccountNotFound)
        );
        assert_eq!(
            board.entries[2].record.failure_reason(),
            Some(&FailureReason::InvalidReference)
        );

        let rows = board.rows();
        assert_eq!(
            rows[1].worldwide_rank_or_reason,
            RankOrReason::Reason("profile not found or private".to_string())
        );
        assert!(
            rows[2]
                .worldwide_rank_or_reason
                .to_string()
                .starts_with("invalid reference")
        );
        assert_ne!(
            rows[1].worldwide_rank_or_reason,
            rows[2].worldwide_rank_or_reason
        );
    }

    #[tokio::test]
    async fn test_leaderboard_sorted_by_total() {
        let orchestrator = orchestrator(
            FakeSource::new()
                .with_user("low", 10)
                .with_user("high", 30)
                .with_user("tie", 30)
                .with_user("least", 5),
        );
        let references: Vec<String> = ["low", "high", "tie", "least"]
            .iter()
            .map(|n| format!("https://leetcode.com/u/{n}/"))
            .collect();

        let board = build_leaderboard(&orchestrator, &references).await;
        let order: Vec<(usize, &str)> = board
            .entries
            .iter()
            .map(|e| (e.rank, e.record.identifier.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(1, "high"), (2, "tie"), (3, "low"), (4, "least")]
        );
    }

    #[tokio::test]
    async fn test_missing_column_fails_before_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url\nhttps://leetcode.com/u/a").unwrap();

        let err = run_batch(&Config::default(), file.path(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InputSchema { .. }));
    }
}
