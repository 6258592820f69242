//! Global launch quota
//!
//! One shared counter bounds how many launches the whole service accepts
//! within the current quota window. Two reset policies exist and stay
//! separate: the default resets when the wall clock crosses an hour
//! boundary, the rolling variant resets a fixed duration after the window
//! opened.

use crate::config::QuotaResetPolicy;
use crate::core::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

struct QuotaWindow {
    count: u32,
    window_start: DateTime<Utc>,
}

/// Shared counter capping accepted launches per window.
pub struct GlobalQuota {
    max: u32,
    window: Duration,
    policy: QuotaResetPolicy,
    clock: Arc<dyn Clock>,
    // Check-and-increment happens under this lock so two concurrent
    // requests cannot both take the last slot.
    state: Mutex<QuotaWindow>,
}

impl GlobalQuota {
    pub fn new(
        max: u32,
        window: Duration,
        policy: QuotaResetPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let window_start = clock.now();
        Self {
            max,
            window,
            policy,
            clock,
            state: Mutex::new(QuotaWindow {
                count: 0,
                window_start,
            }),
        }
    }

    /// Reserve one launch slot if any remain in the current window.
    ///
    /// Runs the window reset check first, exactly like the read-only
    /// accessors, so the counter resets at most once per rollover.
    pub fn check_and_reserve(&self) -> bool {
        let mut state = self.state.lock();
        self.maybe_reset(&mut state);
        if state.count < self.max {
            state.count += 1;
            true
        } else {
            false
        }
    }

    /// Slots left in the current window, without consuming one.
    pub fn remaining(&self) -> u32 {
        let mut state = self.state.lock();
        self.maybe_reset(&mut state);
        self.max.saturating_sub(state.count)
    }

    /// Launches already accepted in the current window.
    pub fn used(&self) -> u32 {
        let mut state = self.state.lock();
        self.maybe_reset(&mut state);
        state.count
    }

    /// Maximum launches per window.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Time until the current window rolls over and the counter resets.
    pub fn time_until_reset(&self) -> Duration {
        let mut state = self.state.lock();
        self.maybe_reset(&mut state);
        let now = self.clock.now();
        let until = match self.policy {
            QuotaResetPolicy::ClockHour => {
                let next_boundary_ms = (hour_index(now) + 1) * 3_600_000;
                Duration::milliseconds(next_boundary_ms - now.timestamp_millis())
            }
            QuotaResetPolicy::Rolling => state.window_start + self.window - now,
        };
        until.max(Duration::zero())
    }

    fn maybe_reset(&self, state: &mut QuotaWindow) {
        let now = self.clock.now();
        let expired = match self.policy {
            QuotaResetPolicy::ClockHour => hour_index(now) != hour_index(state.window_start),
            QuotaResetPolicy::Rolling => now - state.window_start >= self.window,
        };
        if expired {
            state.count = 0;
            state.window_start = now;
        }
    }
}

fn hour_index(at: DateTime<Utc>) -> i64 {
    at.timestamp().div_euclid(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use chrono::TimeZone;

    fn setup(policy: QuotaResetPolicy) -> (Arc<ManualClock>, GlobalQuota) {
        let clock = Arc::new(ManualClock::starting_at(
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
        ));
        let quota = GlobalQuota::new(10, Duration::hours(1), policy, clock.clone());
        (clock, quota)
    }

    #[test]
    fn eleventh_reservation_in_one_window_is_refused() {
        let (_clock, quota) = setup(QuotaResetPolicy::ClockHour);
        for _ in 0..10 {
            assert!(quota.check_and_reserve());
        }
        assert!(!quota.check_and_reserve());
        assert_eq!(quota.remaining(), 0);
        assert_eq!(quota.used(), 10);
    }

    #[test]
    fn clock_hour_policy_resets_on_the_hour_boundary() {
        let (clock, quota) = setup(QuotaResetPolicy::ClockHour);
        for _ in 0..10 {
            assert!(quota.check_and_reserve());
        }

        // 29 minutes later it is still 14:59, same window.
        clock.advance(Duration::minutes(29));
        assert!(!quota.check_and_reserve());

        // Crossing into 15:00 resets the counter exactly once.
        clock.advance(Duration::minutes(1));
        assert_eq!(quota.remaining(), 10);
        assert!(quota.check_and_reserve());
        assert_eq!(quota.remaining(), 9);
    }

    #[test]
    fn rolling_policy_resets_one_window_after_start() {
        let (clock, quota) = setup(QuotaResetPolicy::Rolling);
        for _ in 0..10 {
            assert!(quota.check_and_reserve());
        }

        // The hour boundary at 15:00 means nothing to the rolling policy.
        clock.advance(Duration::minutes(45));
        assert!(!quota.check_and_reserve());

        clock.advance(Duration::minutes(15));
        assert!(quota.check_and_reserve());
        assert_eq!(quota.remaining(), 9);
    }

    #[test]
    fn read_only_accessors_do_not_consume_slots() {
        let (_clock, quota) = setup(QuotaResetPolicy::ClockHour);
        assert_eq!(quota.remaining(), 10);
        assert_eq!(quota.used(), 0);
        assert!(quota.time_until_reset() > Duration::zero());
        assert_eq!(quota.remaining(), 10);
    }

    #[test]
    fn clock_hour_time_until_reset_is_distance_to_next_boundary() {
        let (_clock, quota) = setup(QuotaResetPolicy::ClockHour);
        // 14:30:00 -> 15:00:00
        assert_eq!(quota.time_until_reset(), Duration::minutes(30));
    }

    #[test]
    fn rolling_time_until_reset_shrinks_with_the_clock() {
        let (clock, quota) = setup(QuotaResetPolicy::Rolling);
        assert_eq!(quota.time_until_reset(), Duration::hours(1));
        clock.advance(Duration::minutes(40));
        assert_eq!(quota.time_until_reset(), Duration::minutes(20));
    }

    #[test]
    fn clock_hour_resets_even_after_a_full_day_on_the_same_hour() {
        let (clock, quota) = setup(QuotaResetPolicy::ClockHour);
        for _ in 0..10 {
            assert!(quota.check_and_reserve());
        }
        // Same hour-of-day, next day: still a different window.
        clock.advance(Duration::hours(24));
        assert!(quota.check_and_reserve());
    }
}
