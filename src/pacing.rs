use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Minimum-interval gate between outbound calls. One gate is shared by
/// every caller hitting the same upstream, so the pacing contract holds
/// even if targets are ever processed by more than one worker.
#[derive(Debug, Clone)]
pub struct RateGate {
    inner: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Wait until at least `min_interval` has passed since the previous
    /// acquisition, then claim the slot.
    pub async fn acquire(&self) {
        let mut last = self.inner.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_acquire_does_not_wait() {
        let gate = RateGate::from_millis(5_000);
        let started = Instant::now();
        gate.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn consecutive_acquires_respect_the_interval() {
        let gate = RateGate::from_millis(50);
        let started = Instant::now();
        gate.acquire().await;
        gate.acquire().await;
        gate.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
