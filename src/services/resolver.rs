// src/services/resolver.rs

//! Profile reference to account identifier resolution.

use regex::Regex;

use crate::models::{AccountIdentifier, ResolverConfig};
use crate::utils::url::host_of;

/// Extraction patterns in priority order.
///
/// The `/u/<id>` listing shape is tried before the bare `/<id>` root shape.
/// The scheme is optional but a host segment is always required.
const PATTERNS: [&str; 2] = [
    r"^(?:https?://)?[^/\s]+/u/([\w.-]+)(?:[/?#]|$)",
    r"^(?:https?://)?[^/\s]+/([\w.-]+)/?(?:[?#]\S*)?$",
];

/// Extracts account identifiers from free-form profile references.
#[derive(Debug, Clone)]
pub struct IdentifierResolver {
    patterns: Vec<Regex>,
    hosts: Vec<String>,
}

impl IdentifierResolver {
    /// Create a resolver honoring the configured host filter.
    pub fn new(config: &ResolverConfig) -> Self {
        let patterns = PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        let hosts = config
            .hosts
            .iter()
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { patterns, hosts }
    }

    /// Resolve a reference, returning `None` when no identifier can be extracted.
    pub fn resolve(&self, reference: &str) -> Option<AccountIdentifier> {
        let cleaned = reference.trim().trim_end_matches('/');
        if cleaned.is_empty() || !self.host_allowed(cleaned) {
            return None;
        }

        self.patterns
            .iter()
            .find_map(|pattern| pattern.captures(cleaned))
            .and_then(|caps| caps.get(1))
            .and_then(|segment| AccountIdentifier::new(segment.as_str()))
    }

    fn host_allowed(&self, reference: &str) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        let host = if reference.contains("://") {
            host_of(reference)
        } else {
            host_of(&format!("https://{reference}"))
        };
        host.is_some_and(|host| self.hosts.contains(&host))
    }
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}
