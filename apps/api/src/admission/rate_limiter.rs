//! Fixed-window, per-client rate limiter.
//!
//! Each client key owns a counter and the instant its window resets. A request
//! arriving at or after the reset instant starts a fresh window with count 1.
//! Inside a window, requests are admitted until the counter reaches the limit.
//! Bursts straddling a window boundary are allowed: this is a fixed window,
//! not a sliding one.
//!
//! The table is a sharded `DashMap`; the entry guard holds the shard lock for
//! the whole check-then-increment, so concurrent requests from one client can
//! never both take the last slot.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::RateLimitConfig;

/// Counter state for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub count: u32,
    pub window_reset_at: Instant,
}

impl WindowState {
    /// Entries whose reset instant has been reached are logically absent.
    fn is_expired(&self, now: Instant) -> bool {
        self.window_reset_at <= now
    }
}

pub struct RateLimiter {
    windows: DashMap<String, WindowState>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window)
    }

    /// Decides whether `client_key` may issue a request at `now`.
    /// A rejection leaves the client's state untouched.
    pub fn admit(&self, client_key: &str, now: Instant) -> bool {
        match self.windows.entry(client_key.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(WindowState {
                    count: 1,
                    window_reset_at: now + self.window,
                });
                true
            }
            Entry::Occupied(mut occupied) => {
                let state = occupied.get_mut();
                if state.is_expired(now) {
                    *state = WindowState {
                        count: 1,
                        window_reset_at: now + self.window,
                    };
                    true
                } else if state.count < self.max_requests {
                    state.count += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// `admit` against the current (tokio) clock.
    pub fn admit_now(&self, client_key: &str) -> bool {
        self.admit(client_key, Instant::now())
    }

    /// Current state for a client, if one is tracked.
    pub fn window_state(&self, client_key: &str) -> Option<WindowState> {
        self.windows.get(client_key).map(|entry| *entry)
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.windows.retain(|_, state| {
            let keep = !state.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of tracked clients, expired or not.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Spawns a background task that sweeps expired entries every `every`.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        info!("Rate limiter sweeper started (interval: {:?})", every);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = self.sweep_expired(Instant::now());
                if removed > 0 {
                    debug!(
                        removed_entries = removed,
                        remaining_entries = self.len(),
                        "Rate limiter sweep completed"
                    );
                }
            }
        })
    }
}
