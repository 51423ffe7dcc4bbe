//! Sliding-window request limiter, one per source client

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct SlidingWindowLimiter {
    source: &'static str,
    max_requests: usize,
    window: Duration,
    stamps: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// Allow `requests_per_minute` requests in any trailing 60s window
    pub fn per_minute(source: &'static str, requests_per_minute: u32) -> Self {
        Self::with_window(source, requests_per_minute, WINDOW)
    }

    pub fn with_window(source: &'static str, max_requests: u32, window: Duration) -> Self {
        Self {
            source,
            max_requests: max_requests.max(1) as usize,
            window,
            stamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Wait until a request slot is free, then claim it
    ///
    /// When saturated, sleeps until the oldest timestamp leaves the window.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut stamps = self.stamps.lock().await;
                let now = Instant::now();

                while let Some(&oldest) = stamps.front() {
                    if now.duration_since(oldest) >= self.window {
                        stamps.pop_front();
                    } else {
                        break;
                    }
                }

                if stamps.len() < self.max_requests {
                    stamps.push_back(now);
                    return;
                }

                let oldest = stamps.front().copied().unwrap_or(now);
                self.window.saturating_sub(now.duration_since(oldest))
            };

            log::info!(
                "⏳ {} rate limit reached, waiting {:.1}s",
                self.source,
                wait.as_secs_f64()
            );
            sleep(wait).await;
        }
    }

    /// Requests claimed in the current window
    pub async fn in_flight(&self) -> usize {
        let stamps = self.stamps.lock().await;
        let now = Instant::now();
        stamps
            .iter()
            .filter(|&&t| now.duration_since(t) < self.window)
            .count()
    }
}
