mod api_call;
mod sign_in;
mod types;

pub use api_call::ApiClient;
pub use sign_in::{LoginResponse, SignResponse};
pub use types::{RetryConfig, RetryDelay, TokioDelay, DEFAULT_API_BASE};

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{header, Client, Request, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use super::RequestError;
use crate::config::TimeoutConfig;
use types::{parse_retry_after, USER_AGENT};

#[derive(Clone)]
pub struct HttpClient {
    pub(super) client: Client,
    pub(super) retry_config: RetryConfig,
    delay: Arc<dyn RetryDelay>,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_retry_config(RetryConfig::default())
    }

    pub fn with_retry_config(retry_config: RetryConfig) -> Result<Self> {
        let timeouts = TimeoutConfig::global();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.http_connect)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            retry_config,
            delay: Arc::new(TokioDelay),
        })
    }

    /// Replace the timer used between attempts
    pub fn with_delay(mut self, delay: Arc<dyn RetryDelay>) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn request(&self, method: reqwest::Method, url: url::Url) -> reqwest::RequestBuilder {
        self.client.request(method, url)
    }

    /// Execute a request, retrying on failure
    ///
    /// Retries on:
    /// - Network errors (connection failures, timeouts)
    /// - Any non-2xx response, honouring `Retry-After` on 429
    ///
    /// The last allowed attempt is returned as-is even when not successful;
    /// if it failed at the transport level the error is wrapped in
    /// [`RequestError::RetriesExhausted`]. Requests whose body cannot be
    /// cloned get a single attempt.
    pub async fn execute(&self, request: Request) -> Result<Response, RequestError> {
        let max_retries = self.retry_config.max_retries;
        let target = format!("{} {}", request.method(), request.url());
        let mut pending = Some(request);

        for attempt in 1..=max_retries {
            let Some(current) = pending.take() else {
                break;
            };
            pending = if attempt < max_retries {
                current.try_clone()
            } else {
                None
            };
            let can_retry = pending.is_some();

            match self.client.execute(current).await {
                Ok(response) if response.status().is_success() || !can_retry => {
                    if attempt > 1 {
                        debug!(
                            "{} finished after {} attempts with {}",
                            target,
                            attempt,
                            response.status()
                        );
                    }
                    return Ok(response);
                }
                Ok(response) => {
                    let delay = self.delay_after(&response);
                    warn!(
                        "{} returned {} (attempt {}/{}). Retrying in {}s...",
                        target,
                        response.status(),
                        attempt,
                        max_retries,
                        delay.as_secs()
                    );
                    self.delay.wait(delay).await;
                }
                Err(e) if !can_retry => {
                    warn!("{} failed after {} attempts: {}", target, attempt, e);
                    return Err(RequestError::RetriesExhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let delay = self.retry_config.base_delay;
                    warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {}s...",
                        target,
                        attempt,
                        max_retries,
                        e,
                        delay.as_secs()
                    );
                    self.delay.wait(delay).await;
                }
            }
        }

        Err(RequestError::MaxRetriesReached)
    }

    /// How long to wait after an unsuccessful response
    fn delay_after(&self, response: &Response) -> Duration {
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let hint = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok());
            if let Some(secs) = parse_retry_after(hint) {
                return Duration::from_secs(secs);
            }
        }
        self.retry_config.base_delay
    }
}
