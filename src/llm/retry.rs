//! Bounded retry around any [`LLMClient`]
//!
//! Only errors for which [`BackendError::is_retryable`] holds are repeated.
//! The delay doubles after every failed attempt.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

pub struct RetryingClient {
    inner: Arc<dyn LLMClient>,
    max_retries: u32,
    base_delay: Duration,
}

impl RetryingClient {
    pub fn new(inner: Arc<dyn LLMClient>, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry number `attempt` (1-based)
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

#[async_trait]
impl LLMClient for RetryingClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let mut attempt: u32 = 0;

        loop {
            match self.inner.chat(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        client = self.inner.name(),
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Retrying chat request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model_info(&self) -> Option<String> {
        self.inner.model_info()
    }
}

impl std::fmt::Debug for RetryingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingClient")
            .field("client", &self.inner.name())
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .finish()
    }
}
