// src/pipeline/profile.rs

//! Single-profile lookup feeding the detail view.

use crate::error::{AppError, LookupError, Result};
use crate::models::{AccountIdentifier, Config, ProfileDetail};
use crate::services::{IdentifierResolver, StatsClient, StatsSource};

/// Outcome of a single-profile lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(ProfileDetail),
    NotFound(AccountIdentifier),
    InvalidReference,
}

/// Fetch detail for an already-resolved identifier.
///
/// A missing account is a normal outcome; transport and schema failures are errors.
pub async fn lookup_identifier<S: StatsSource + ?Sized>(
    source: &S,
    identifier: &AccountIdentifier,
) -> Result<ProfileLookup> {
    match source.fetch(identifier).await {
        Ok(detail) => Ok(ProfileLookup::Found(detail)),
        Err(LookupError::AccountNotFound) => Ok(ProfileLookup::NotFound(identifier.clone())),
        Err(error) => Err(AppError::Lookup(error)),
    }
}

/// Resolve a reference and fetch its detail.
pub async fn lookup_profile<S: StatsSource + ?Sized>(
    source: &S,
    resolver: &IdentifierResolver,
    reference: &str,
) -> Result<ProfileLookup> {
    match resolver.resolve(reference) {
        Some(identifier) => lookup_identifier(source, &identifier).await,
        None => Ok(ProfileLookup::InvalidReference),
    }
}

/// Look up one profile against the configured remote service.
pub async fn run_profile(config: &Config, reference: &str) -> Result<ProfileLookup> {
    let resolver = IdentifierResolver::new(&config.resolver);
    let client = StatsClient::new(&config.client)?;

    let outcome = lookup_profile(&client, &resolver, reference).await?;
    match &outcome {
        ProfileLookup::Found(detail) => log::info!(
            "Fetched {}: {} solved ({} easy, {} medium, {} hard)",
            detail.identifier,
            detail.counts.total,
            detail.counts.easy,
            detail.counts.medium,
            detail.counts.hard
        ),
        ProfileLookup::NotFound(identifier) => {
            log::warn!("Profile {} not found or private", identifier)
        }
        ProfileLookup::InvalidReference => {
            log::warn!("No identifier could be extracted from {:?}", reference)
        }
    }
    Ok(outcome)
}
