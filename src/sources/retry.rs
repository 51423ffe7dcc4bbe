use std::time::Duration;
use tokio::time::sleep;

/// Delay used when an upstream 429 carries no usable Retry-After header
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Bounded retry budget for upstream rate-limit responses
#[derive(Debug)]
pub struct RateLimitRetry {
    default_delay: Duration,
    max_retries: u32,
    current_attempt: u32,
}

#[derive(Debug)]
pub struct RetriesExhausted;

impl std::fmt::Display for RetriesExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Maximum retry attempts exceeded")
    }
}

impl std::error::Error for RetriesExhausted {}

impl RateLimitRetry {
    pub fn new(default_delay: Duration, retries: u32) -> Self {
        Self {
            default_delay,
            max_retries: retries,
            current_attempt: 0,
        }
    }

    /// One retry after the upstream's Retry-After delay
    pub fn once() -> Self {
        Self::new(DEFAULT_RETRY_AFTER, 1)
    }

    pub async fn sleep(&mut self, retry_after: Option<Duration>) -> Result<(), RetriesExhausted> {
        if self.current_attempt >= self.max_retries {
            return Err(RetriesExhausted);
        }

        let delay = retry_after.unwrap_or(self.default_delay);

        log::warn!(
            "⏳ Rate limited upstream, retry {} of {} in {}s",
            self.current_attempt + 1,
            self.max_retries,
            delay.as_secs()
        );

        sleep(delay).await;
        self.current_attempt += 1;
        Ok(())
    }

    pub fn attempts(&self) -> u32 {
        self.current_attempt
    }
}

/// Parse a Retry-After header given in whole seconds
pub fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
