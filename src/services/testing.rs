//! In-memory stats source for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{LookupError, LookupResult};
use crate::models::{AccountIdentifier, DifficultyCounts, ProfileDetail, WorldRank};

use super::stats_client::StatsSource;

/// Scripted stats source that records how it was called.
#[derive(Default)]
pub struct FakeSource {
    users: HashMap<String, ProfileDetail>,
    errors: HashMap<String, LookupError>,
    delays: HashMap<String, u64>,
    failures_left: Mutex<HashMap<String, (usize, LookupError)>>,
    in_flight: AtomicUsize,
    pub calls: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile whose easy count equals `total`.
    pub fn detail(name: &str, total: u64) -> ProfileDetail {
        ProfileDetail {
            identifier: AccountIdentifier::new(name).unwrap(),
            display_name: Some(format!("{name} display")),
            bio: None,
            avatar: None,
            location: None,
            skills: Vec::new(),
            websites: Vec::new(),
            world_rank: WorldRank::Ranked(1000 + total),
            counts: DifficultyCounts {
                total,
                easy: total,
                medium: 0,
                hard: 0,
            },
            topics: Vec::new(),
        }
    }

    /// Known user whose easy count equals `total`.
    pub fn with_user(self, name: &str, total: u64) -> Self {
        self.with_detail(Self::detail(name, total))
    }

    pub fn with_detail(mut self, detail: ProfileDetail) -> Self {
        self.users
            .insert(detail.identifier.as_str().to_string(), detail);
        self
    }

    pub fn with_error(mut self, name: &str, error: LookupError) -> Self {
        self.errors.insert(name.to_string(), error);
        self
    }

    pub fn with_delay(mut self, name: &str, millis: u64) -> Self {
        self.delays.insert(name.to_string(), millis);
        self
    }

    /// Fail the first `times` lookups of `name` before answering normally.
    pub fn failing_first(self, name: &str, times: usize, error: LookupError) -> Self {
        self.failures_left
            .lock()
            .unwrap()
            .insert(name.to_string(), (times, error));
        self
    }
}

#[async_trait]
impl StatsSource for FakeSource {
    async fn fetch(&self, identifier: &AccountIdentifier) -> LookupResult<ProfileDetail> {
        let name = identifier.as_str();
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(millis) = self.delays.get(name) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = {
            let mut failures = self.failures_left.lock().unwrap();
            match failures.get_mut(name) {
                Some((left, error)) if *left > 0 => {
                    *left -= 1;
                    Some(error.clone())
                }
                _ => None,
            }
        };
        if let Some(error) = scripted {
            return Err(error);
        }
        if let Some(error) = self.errors.get(name) {
            return Err(error.clone());
        }
        self.users
            .get(name)
            .cloned()
            .ok_or(LookupError::AccountNotFound)
    }
}
