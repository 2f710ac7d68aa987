use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use tokio::time::sleep;

use crate::errors::AuthError;

#[derive(Debug, Clone)]
struct AttemptRecord {
    failures: u32,
    locked_until: Option<Instant>,
    last_seen: Instant,
}

/// Server-side failed-login counter keyed by client IP. Replaces the
/// original's browser-storage lockout, which any visitor could clear.
///
/// After `max_attempts` consecutive failures the key is locked for
/// `lockout` and further attempts are rejected with a retry-after hint.
/// A successful login clears the key.
#[derive(Clone)]
pub struct LoginGuard {
    attempts: Arc<DashMap<String, AttemptRecord>>,
    max_attempts: u32,
    lockout: Duration,
}

impl LoginGuard {
    pub fn new(max_attempts: u32, lockout: Duration) -> Self {
        LoginGuard {
            attempts: Arc::new(DashMap::new()),
            max_attempts: max_attempts.max(1),
            lockout,
        }
    }

    /// Rejects with `LockedOut` while the key's lockout window is active.
    pub fn check(&self, key: &str) -> Result<(), AuthError> {
        if let Some(record) = self.attempts.get(key) {
            if let Some(until) = record.locked_until {
                let now = Instant::now();
                if until > now {
                    let retry_after = until.duration_since(now).as_secs().max(1);
                    return Err(AuthError::LockedOut(retry_after));
                }
            }
        }
        Ok(())
    }

    /// Records a failed attempt; starts the lockout window on the attempt
    /// that reaches the limit.
    pub fn record_failure(&self, key: &str) {
        let now = Instant::now();
        let mut record = self.attempts.entry(key.to_string()).or_insert(AttemptRecord {
            failures: 0,
            locked_until: None,
            last_seen: now,
        });

        // An expired lockout resets the counter before this failure counts
        if let Some(until) = record.locked_until {
            if until <= now {
                record.failures = 0;
                record.locked_until = None;
            }
        }

        record.failures += 1;
        record.last_seen = now;
        if record.failures >= self.max_attempts {
            record.locked_until = Some(now + self.lockout);
        }
    }

    pub fn clear(&self, key: &str) {
        self.attempts.remove(key);
    }

    /// Periodically drops records idle longer than `ttl`.
    pub fn spawn_eviction(&self, ttl: Duration) {
        let attempts = self.attempts.clone();
        tokio::spawn(async move {
            let interval = Duration::from_secs(60);
            loop {
                sleep(interval).await;
                let now = Instant::now();
                attempts.retain(|_, record| now.duration_since(record.last_seen) <= ttl);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_until_limit_then_locks() {
        let guard = LoginGuard::new(3, Duration::from_secs(600));

        for _ in 0..2 {
            guard.record_failure("10.0.0.1");
            assert!(guard.check("10.0.0.1").is_ok());
        }

        guard.record_failure("10.0.0.1");
        let err = guard.check("10.0.0.1").unwrap_err();
        assert!(matches!(err, AuthError::LockedOut(_)));
    }

    #[test]
    fn keys_are_independent() {
        let guard = LoginGuard::new(1, Duration::from_secs(600));
        guard.record_failure("10.0.0.1");
        assert!(guard.check("10.0.0.1").is_err());
        assert!(guard.check("10.0.0.2").is_ok());
    }

    #[test]
    fn success_clears_the_counter() {
        let guard = LoginGuard::new(2, Duration::from_secs(600));
        guard.record_failure("10.0.0.1");
        guard.clear("10.0.0.1");
        guard.record_failure("10.0.0.1");
        assert!(guard.check("10.0.0.1").is_ok());
    }

    #[test]
    fn lockout_expires() {
        let guard = LoginGuard::new(1, Duration::from_millis(10));
        guard.record_failure("10.0.0.1");
        assert!(guard.check("10.0.0.1").is_err());
        std::thread::sleep(Duration::from_millis(20));
        assert!(guard.check("10.0.0.1").is_ok());
    }
}
