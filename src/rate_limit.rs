//! Client-side rate limiting.
//!
//! The service caps calls per second. [`RateLimiter`] counts calls in the
//! current one-second window (aligned to wall-clock seconds) and suspends
//! the call that would exceed the budget until the next window starts.
//!
//! Each [`Client`](crate::Client) gets its own limiter unless one is passed
//! in through [`ClientConfig::rate_limiter`](crate::ClientConfig). Pass
//! [`RateLimiter::process_wide`] to every client to make them share one
//! budget.

use std::sync::{Arc, OnceLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::debug;

/// Default budget, in calls per second.
pub const DEFAULT_QPS_LIMIT: u32 = 200;

/// Source of wall-clock time, as a duration since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current time since the Unix epoch.
    fn now(&self) -> Duration;
}

/// System clock backed by `SystemTime::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
struct Window {
    second: u64,
    issued: u32,
}

/// Calls-per-second limiter shared by every call that holds it.
///
/// # Example
///
/// ```rust
/// use aliyun_opensearch::rate_limit::RateLimiter;
///
/// # tokio_test::block_on(async {
/// let limiter = RateLimiter::new(10);
/// limiter.acquire().await;
/// # });
/// ```
pub struct RateLimiter {
    limit: u32,
    clock: Arc<dyn Clock>,
    window: Mutex<Window>,
}

impl RateLimiter {
    /// Limiter allowing `limit` calls per second. `0` disables limiting.
    pub fn new(limit: u32) -> Self {
        Self::with_clock(limit, Arc::new(SystemClock))
    }

    /// Limiter reading time from `clock`.
    pub fn with_clock(limit: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            clock,
            window: Mutex::new(Window {
                second: 0,
                issued: 0,
            }),
        }
    }

    /// Limiter that never waits.
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// One limiter for the whole process, allowing
    /// [`DEFAULT_QPS_LIMIT`] calls per second.
    pub fn process_wide() -> Arc<RateLimiter> {
        static SHARED: OnceLock<Arc<RateLimiter>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(RateLimiter::new(DEFAULT_QPS_LIMIT)))
            .clone()
    }

    /// Configured calls per second (`0` when unlimited).
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns true if this limiter can ever suspend a call.
    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Take one slot, waiting for the next window if the current one is
    /// spent. Returns the window (epoch second) the slot belongs to.
    ///
    /// The lock is held while waiting, so callers queue up instead of
    /// racing for the same slot.
    pub async fn acquire(&self) -> u64 {
        if !self.is_enabled() {
            return self.clock.now().as_secs();
        }

        let mut window = self.window.lock().await;
        let now = self.clock.now();
        let second = now.as_secs();

        if second > window.second {
            window.second = second;
            window.issued = 0;
        }

        if window.issued >= self.limit {
            let next = Duration::from_secs(window.second + 1);
            let wait = next.saturating_sub(now);
            debug!(
                limit = self.limit,
                wait_ms = wait.as_millis() as u64,
                "rate limit reached, waiting for next window"
            );
            tokio::time::sleep(wait).await;

            window.second = (window.second + 1).max(self.clock.now().as_secs());
            window.issued = 0;
        }

        window.issued += 1;
        window.second
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_QPS_LIMIT)
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockClock;

#[cfg(any(test, feature = "test-helpers"))]
mod mock {
    use super::Clock;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Clock whose time only moves when told to.
    ///
    /// Clones share the same time value.
    #[derive(Debug, Clone)]
    pub struct MockClock {
        current: Arc<Mutex<Duration>>,
    }

    impl MockClock {
        /// Clock starting at `start` since the Unix epoch.
        pub fn new(start: Duration) -> Self {
            Self {
                current: Arc::new(Mutex::new(start)),
            }
        }

        /// Move the clock forward.
        pub fn advance(&self, by: Duration) {
            let mut time = self
                .current
                .lock()
                .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
            *time += by;
        }

        /// Jump to `to` since the Unix epoch.
        pub fn set(&self, to: Duration) {
            let mut time = self
                .current
                .lock()
                .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
            *time = to;
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Duration {
            *self
                .current
                .lock()
                .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
        }
    }
}
