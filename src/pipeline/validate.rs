// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    config.validate()?;

    log::info!("Endpoint: {}", config.client.endpoint);
    log::info!("Timeout: {}s", config.client.timeout_secs);
    log::info!(
        "Concurrency: {} (retries: {}, backoff: {}ms)",
        config.batch.max_concurrent,
        config.batch.max_retries,
        config.batch.retry_backoff_ms
    );
    log::info!("Input column: {}", config.input.column);
    if config.resolver.hosts.is_empty() {
        log::info!("Accepted hosts: any");
    } else {
        log::info!("Accepted hosts: {}", config.resolver.hosts.join(", "));
    }
    Ok(())
}
