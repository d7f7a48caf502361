use async_trait::async_trait;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("hayfrp-autosign/", env!("CARGO_PKG_VERSION"));

/// Default HayFrp API base used when none is configured
pub const DEFAULT_API_BASE: &str = "https://api.hayfrp.com";

/// HTTP retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one (default: 3)
    pub max_retries: u32,
    /// Delay between attempts unless the server asks for another (default: 1s)
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Suspends the current task between two attempts
#[async_trait]
pub trait RetryDelay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl RetryDelay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Parse a `Retry-After` header given in whole seconds
pub(super) fn parse_retry_after(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}
