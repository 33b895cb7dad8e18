use std::time::Duration;
use tracing::trace;

use crate::config::Config;

/// Spaces out detail requests with a fixed pause before each one.
///
/// The pause is unconditional: it is taken before every request, whatever the
/// previous response was. Actual 429 responses are handled by the retry logic
/// in `fetch_utils`, which honours `Retry-After`.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    delay: Duration,
    paced: u32,
}

impl RequestPacer {
    pub fn new(delay: Duration) -> Self {
        RequestPacer { delay, paced: 0 }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_millis(config.request_delay_ms))
    }

    /// Suspends the current task for the configured delay.
    pub async fn wait_turn(&mut self) {
        self.paced += 1;
        if self.delay.is_zero() {
            return;
        }
        trace!("Pacing request #{} by {:?}", self.paced, self.delay);
        tokio::time::sleep(self.delay).await;
    }

    /// Number of requests that went through [`RequestPacer::wait_turn`].
    #[cfg(test)]
    pub fn paced_requests(&self) -> u32 {
        self.paced
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
