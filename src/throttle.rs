use std::thread;
use std::time::{Duration, Instant};

/// Spaces out calls to a rate-limited service.
///
/// `acquire` blocks until `interval` has passed since the previous
/// acquisition. A zero interval never blocks.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_secs(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns how long the caller was held back.
    pub fn acquire(&mut self) -> Duration {
        let mut waited = Duration::ZERO;
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                waited = self.interval - elapsed;
                tracing::info!(wait_secs = waited.as_secs_f32(), "waiting for image rate limit");
                thread::sleep(waited);
            }
        }
        self.last = Some(Instant::now());
        waited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_acquire_does_not_wait() {
        let mut throttle = Throttle::new(Duration::from_secs(60));
        assert_eq!(throttle.acquire(), Duration::ZERO);
    }

    #[test]
    fn second_acquire_waits_out_the_interval() {
        let interval = Duration::from_millis(80);
        let mut throttle = Throttle::new(interval);
        let start = Instant::now();
        throttle.acquire();
        let waited = throttle.acquire();
        assert!(waited > Duration::ZERO);
        assert!(start.elapsed() >= interval);
    }

    #[test]
    fn disabled_never_waits() {
        let mut throttle = Throttle::disabled();
        for _ in 0..3 {
            assert_eq!(throttle.acquire(), Duration::ZERO);
        }
    }
}
