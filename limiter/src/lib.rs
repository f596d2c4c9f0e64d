use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Rolling-window attempt counter keyed by user id.
///
/// Injected into the checkout initiator so a user cannot hammer the order
/// endpoint; advisory only and trivially bypassable, so it is
/// defense-in-depth rather than a security boundary. The webhook path
/// never consults it.
pub struct AttemptLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: DashMap<String, VecDeque<Instant>>,
}

/// Denied attempt, carrying how long until the window frees up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    pub retry_after: Duration,
}

impl Cooldown {
    pub fn message(&self) -> String {
        format!(
            "Too many payment attempts. Try again in {} seconds.",
            self.retry_after.as_secs().max(1)
        )
    }
}

impl AttemptLimiter {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: DashMap::new(),
        }
    }

    /// Checkout policy: at most 3 attempts per 5 minutes per user.
    pub fn checkout_default() -> Self {
        Self::new(3, Duration::from_secs(5 * 60))
    }

    pub fn try_acquire(&self, user_id: &str) -> Result<(), Cooldown> {
        self.try_acquire_at(user_id, Instant::now())
    }

    /// Clock-injected variant backing `try_acquire`; tests drive it with
    /// synthetic instants.
    pub fn try_acquire_at(&self, user_id: &str, now: Instant) -> Result<(), Cooldown> {
        let mut attempts = self.attempts.entry(user_id.to_string()).or_default();

        while let Some(&oldest) = attempts.front() {
            if now.duration_since(oldest) >= self.window {
                attempts.pop_front();
            } else {
                break;
            }
        }

        if attempts.len() >= self.max_attempts {
            let retry_after = attempts
                .front()
                .map(|&oldest| self.window.saturating_sub(now.duration_since(oldest)))
                .unwrap_or(self.window);
            return Err(Cooldown { retry_after });
        }

        attempts.push_back(now);
        Ok(())
    }
}
