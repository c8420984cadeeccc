//! Suspension points for simulated actions.

use std::time::Duration;

use async_trait::async_trait;

/// Waits out a simulated action's latency.
///
/// Always resolves; there is no timeout or cancellation.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, latency: Duration);
}

/// Real timer, scaled by the configured latency multiplier.
#[derive(Debug, Clone, Copy)]
pub struct TokioPause {
    scale: f64,
}

impl TokioPause {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: if scale.is_finite() { scale.max(0.0) } else { 0.0 },
        }
    }
}

impl Default for TokioPause {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, latency: Duration) {
        let scaled = latency.mul_f64(self.scale);
        if scaled.is_zero() {
            tokio::task::yield_now().await;
            return;
        }
        tokio::time::sleep(scaled).await;
    }
}

/// Resolves on the next poll; used by tests and when latency is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPause;

#[async_trait]
impl Pause for InstantPause {
    async fn pause(&self, _latency: Duration) {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_pause_sleeps_for_the_scaled_latency() {
        let pause = TokioPause::new(0.5);
        let start = tokio::time::Instant::now();
        pause.pause(Duration::from_millis(2000)).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_pause_follows_the_configured_scale() {
        let config = crate::SimConfig::default().with_latency_scale(0.25);
        let pause = TokioPause::new(config.latency_scale);
        let start = tokio::time::Instant::now();
        pause.pause(Duration::from_millis(2000)).await;
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(start.elapsed() < Duration::from_millis(1000));

        let pause = TokioPause::new(-1.0);
        let start = tokio::time::Instant::now();
        pause.pause(Duration::from_secs(3600)).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn instant_pause_resolves() {
        InstantPause.pause(Duration::from_secs(3600)).await;
    }
}
