use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory fixed-window limiter guarding the login endpoint against
/// credential stuffing. Keys are client addresses.
pub struct RateLimiter {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
    max_attempts: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window_secs: u64) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Whether the key is still under its attempt budget. Prunes attempts
    /// that have aged out of the window.
    pub fn allow(&self, key: &str) -> bool {
        let mut attempts = self.attempts.lock().unwrap();
        let now = Instant::now();

        let entry = attempts.entry(key.to_string()).or_default();
        entry.retain(|&at| now.duration_since(at) < self.window);

        entry.len() < self.max_attempts
    }

    /// Record a failed attempt against the key.
    pub fn note_failure(&self, key: &str) {
        let mut attempts = self.attempts.lock().unwrap();
        let now = Instant::now();

        let entry = attempts.entry(key.to_string()).or_default();
        entry.retain(|&at| now.duration_since(at) < self.window);
        entry.push(now);
    }

    /// Forget the key, e.g. after a successful login.
    pub fn reset(&self, key: &str) {
        self.attempts.lock().unwrap().remove(key);
    }
}
