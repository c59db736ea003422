//! Bucketed rolling window of call outcomes.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bucket {
    index: i64,
    successes: u32,
    failures: u32,
}

/// Outcome counts over the trailing `bucket_count * bucket_width`.
///
/// Time is cut into fixed buckets; a bucket expires as a whole once it falls
/// outside the window.
#[derive(Debug, Clone)]
pub(super) struct RollingWindow {
    bucket_width_ms: i64,
    bucket_count: i64,
    buckets: VecDeque<Bucket>,
}

impl RollingWindow {
    pub(super) fn new(bucket_width: TimeDelta, bucket_count: u32) -> Self {
        Self {
            bucket_width_ms: bucket_width.num_milliseconds().max(1),
            bucket_count: i64::from(bucket_count.max(1)),
            buckets: VecDeque::new(),
        }
    }

    pub(super) fn record(&mut self, now: DateTime<Utc>, failed: bool) {
        let index = self.bucket_index(now);
        self.evict(index);
        if !matches!(self.buckets.back(), Some(bucket) if bucket.index == index) {
            self.buckets.push_back(Bucket {
                index,
                successes: 0,
                failures: 0,
            });
        }
        let Some(bucket) = self.buckets.back_mut() else {
            return;
        };
        if failed {
            bucket.failures = bucket.failures.saturating_add(1);
        } else {
            bucket.successes = bucket.successes.saturating_add(1);
        }
    }

    /// Total and failed observations still inside the window at `now`.
    pub(super) fn totals(&mut self, now: DateTime<Utc>) -> (u32, u32) {
        self.evict(self.bucket_index(now));
        self.buckets.iter().fold((0, 0), |(total, failed), bucket| {
            (
                total
                    .saturating_add(bucket.successes)
                    .saturating_add(bucket.failures),
                failed.saturating_add(bucket.failures),
            )
        })
    }

    pub(super) fn clear(&mut self) {
        self.buckets.clear();
    }

    fn bucket_index(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis().div_euclid(self.bucket_width_ms)
    }

    fn evict(&mut self, current: i64) {
        let oldest_live = current.saturating_sub(self.bucket_count - 1);
        while self
            .buckets
            .front()
            .is_some_and(|bucket| bucket.index < oldest_live)
        {
            self.buckets.pop_front();
        }
    }
}
