//! Per-client request rate limiting
//!
//! Fixed windows anchored at each client's first request: a client's first
//! sighting (or first request after its window lapses) opens a fresh window
//! and counts 1; further requests increment until the cap, then refuse.
//! Windows are independent per client. Entries are never evicted, which is
//! acceptable staleness for a single-process deployment.

use crate::core::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

struct ClientWindow {
    count: u32,
    window_start: DateTime<Utc>,
}

/// Fixed-window limiter keyed by an opaque client identifier.
pub struct RateLimiter {
    cap: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    // Read-check-increment per key is atomic under this lock; the map is
    // small enough that a single lock over all clients is fine.
    clients: Mutex<HashMap<String, ClientWindow>>,
}

impl RateLimiter {
    pub fn new(cap: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cap,
            window,
            clock,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request from `client_id` and report whether it is allowed.
    ///
    /// Returns false without mutating the client's counter once the cap is
    /// reached inside an active window.
    pub fn allow(&self, client_id: &str) -> bool {
        let now = self.clock.now();
        let mut clients = self.clients.lock();

        match clients.get_mut(client_id) {
            Some(window) => {
                if now - window.window_start >= self.window {
                    window.count = 1;
                    window.window_start = now;
                    true
                } else if window.count < self.cap {
                    window.count += 1;
                    true
                } else {
                    false
                }
            }
            None => {
                clients.insert(
                    client_id.to_string(),
                    ClientWindow {
                        count: 1,
                        window_start: now,
                    },
                );
                true
            }
        }
    }

    /// Number of distinct clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().len()
    }
}
