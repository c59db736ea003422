//! Per-route circuit breaker.
//!
//! The breaker is a closed/open/half-open state machine driven by an
//! injected [`mockable::Clock`]:
//! - closed: calls pass and outcomes land in a bucketed rolling window; once
//!   the window holds `min_observations` outcomes and the failure ratio
//!   reaches `failure_ratio`, the breaker opens;
//! - open: calls are rejected until `cooldown` has elapsed;
//! - half-open: up to `half_open_trials` calls probe the route; a success
//!   closes the breaker with a fresh window, a failure reopens it.
//!
//! Admission and the transition it implies happen under one lock, so the
//! half-open quota is never exceeded by concurrent callers.

mod endpoint;
mod window;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::{info, warn};

pub use endpoint::BreakerEndpoint;
use window::RollingWindow;

/// Failure ratio at which every route breaker trips.
pub const ROUTE_FAILURE_RATIO: f64 = 0.2;

/// Tuning for one breaker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Failed share of observed calls that opens the breaker.
    pub failure_ratio: f64,
    /// Length of the rolling observation window.
    pub window: Duration,
    /// Number of buckets the window is split into.
    pub buckets: u32,
    /// Observations required before the ratio is evaluated.
    pub min_observations: u32,
    /// Time spent open before trial calls are admitted.
    pub cooldown: Duration,
    /// Concurrent trial calls admitted while half-open.
    pub half_open_trials: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_ratio: ROUTE_FAILURE_RATIO,
            window: Duration::from_secs(5),
            buckets: 10,
            min_observations: 10,
            cooldown: Duration::from_secs(1),
            half_open_trials: 1,
        }
    }
}

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation.
    Closed,
    /// Calls are short-circuited until the cooldown elapses.
    Open,
    /// Trial calls decide whether the breaker closes again.
    HalfOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    Open { opened_at: DateTime<Utc> },
    HalfOpen { in_flight: u32, successes: u32 },
}

#[derive(Debug)]
struct BreakerState {
    phase: Phase,
    window: RollingWindow,
}

/// Circuit breaker guarding one route.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use catalogue::domain::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
/// use mockable::DefaultClock;
///
/// let breaker = CircuitBreaker::new(
///     "GET /tags",
///     CircuitBreakerConfig::default(),
///     Arc::new(DefaultClock),
/// );
/// let permit = breaker.try_acquire().expect("closed breaker admits calls");
/// permit.record_success();
/// assert_eq!(breaker.state(), CircuitState::Closed);
/// ```
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    /// Create a closed breaker labelled `name`.
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig, clock: Arc<dyn Clock>) -> Self {
        let buckets = config.buckets.max(1);
        let bucket_width = to_time_delta(config.window) / i32::try_from(buckets).unwrap_or(i32::MAX);
        Self {
            name: name.into(),
            config: CircuitBreakerConfig {
                buckets,
                half_open_trials: config.half_open_trials.max(1),
                ..config
            },
            clock,
            state: Mutex::new(BreakerState {
                phase: Phase::Closed,
                window: RollingWindow::new(bucket_width, buckets),
            }),
        }
    }

    /// Route label used in logs and rejection messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the current state.
    ///
    /// An open breaker whose cooldown has elapsed still reports
    /// [`CircuitState::Open`] until the next admission attempt.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        match self.lock().phase {
            Phase::Closed => CircuitState::Closed,
            Phase::Open { .. } => CircuitState::Open,
            Phase::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }

    /// Ask to run one call. `None` means the call must be short-circuited.
    ///
    /// The returned permit must be settled with
    /// [`BreakerPermit::record_success`] or [`BreakerPermit::record_failure`];
    /// dropping it unsettled releases any half-open trial slot without
    /// recording an outcome.
    #[must_use]
    pub fn try_acquire(&self) -> Option<BreakerPermit<'_>> {
        let now = self.clock.utc();
        let mut state = self.lock();
        match state.phase {
            Phase::Closed => Some(BreakerPermit::new(self, false)),
            Phase::Open { opened_at } if self.cooldown_elapsed(opened_at, now) => {
                info!(breaker = %self.name, "circuit breaker half-open");
                state.phase = Phase::HalfOpen {
                    in_flight: 1,
                    successes: 0,
                };
                Some(BreakerPermit::new(self, true))
            }
            Phase::Open { .. } => None,
            Phase::HalfOpen {
                in_flight,
                successes,
            } if in_flight < self.config.half_open_trials => {
                state.phase = Phase::HalfOpen {
                    in_flight: in_flight.saturating_add(1),
                    successes,
                };
                Some(BreakerPermit::new(self, true))
            }
            Phase::HalfOpen { .. } => None,
        }
    }

    fn settle(&self, trial: bool, failed: bool) {
        let now = self.clock.utc();
        let mut state = self.lock();
        match (state.phase, trial) {
            (Phase::Closed, false) => {
                state.window.record(now, failed);
                if failed {
                    let (total, failures) = state.window.totals(now);
                    if self.should_trip(total, failures) {
                        warn!(
                            breaker = %self.name,
                            total,
                            failures,
                            "circuit breaker opened"
                        );
                        state.phase = Phase::Open { opened_at: now };
                    }
                }
            }
            (Phase::HalfOpen { .. }, true) if failed => {
                warn!(breaker = %self.name, "circuit breaker trial failed; reopening");
                state.phase = Phase::Open { opened_at: now };
            }
            (
                Phase::HalfOpen {
                    in_flight,
                    successes,
                },
                true,
            ) => {
                let successes = successes.saturating_add(1);
                if successes >= self.config.half_open_trials {
                    info!(breaker = %self.name, "circuit breaker closed");
                    state.window.clear();
                    state.phase = Phase::Closed;
                } else {
                    state.phase = Phase::HalfOpen {
                        in_flight: in_flight.saturating_sub(1),
                        successes,
                    };
                }
            }
            // Outcomes of calls admitted under an earlier phase carry no signal.
            _ => {}
        }
    }

    fn release_trial(&self) {
        let mut state = self.lock();
        if let Phase::HalfOpen {
            in_flight,
            successes,
        } = state.phase
        {
            state.phase = Phase::HalfOpen {
                in_flight: in_flight.saturating_sub(1),
                successes,
            };
        }
    }

    fn should_trip(&self, total: u32, failures: u32) -> bool {
        total >= self.config.min_observations
            && total > 0
            && f64::from(failures) / f64::from(total) >= self.config.failure_ratio
    }

    fn cooldown_elapsed(&self, opened_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let Ok(cooldown) = TimeDelta::from_std(self.config.cooldown) else {
            return true;
        };
        now >= opened_at + cooldown
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_time_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

/// Admission ticket for one call through a [`CircuitBreaker`].
#[must_use = "settle the permit with record_success or record_failure"]
pub struct BreakerPermit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl<'a> BreakerPermit<'a> {
    fn new(breaker: &'a CircuitBreaker, trial: bool) -> Self {
        Self {
            breaker,
            trial,
            settled: false,
        }
    }

    /// The call succeeded, or failed in a way that says nothing about the
    /// route's health.
    pub fn record_success(mut self) {
        self.settled = true;
        self.breaker.settle(self.trial, false);
    }

    /// The call failed.
    pub fn record_failure(mut self) {
        self.settled = true;
        self.breaker.settle(self.trial, true);
    }
}

impl Drop for BreakerPermit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.trial {
            self.breaker.release_trial();
        }
    }
}
