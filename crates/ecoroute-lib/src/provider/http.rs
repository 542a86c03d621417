use std::fmt;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ProviderSettings;
use crate::error::{Error, Result};

/// Bounded retry with exponential backoff for provider requests.
///
/// Retry `n` (zero-based) waits `backoff_base * 2^n`, so the default policy
/// sleeps 1 s, 2 s, then 4 s before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            retryable_statuses: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (zero-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.backoff_base.saturating_mul(2u32.saturating_pow(retry))
    }

    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status.as_u16())
    }
}

/// Why a request produced no usable JSON document.
#[derive(Debug)]
pub(crate) enum FetchError {
    /// The request never completed (timeout, refused connection, ...).
    Transport(reqwest::Error),
    /// The server answered with a non-success status.
    Status(StatusCode),
    /// The body arrived but is not valid JSON.
    Decode(String),
}

impl FetchError {
    /// Transport and status failures are recovered with fallback data.
    pub(crate) fn is_unavailable(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Status(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(err) => write!(f, "request failed: {err}"),
            FetchError::Status(status) => write!(f, "unexpected status {status}"),
            FetchError::Decode(message) => write!(f, "invalid JSON body: {message}"),
        }
    }
}

/// Blocking JSON fetcher shared by the live providers.
#[derive(Debug, Clone)]
pub(crate) struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub(crate) fn new(settings: &ProviderSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(user_agent());
        if !settings.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(Error::Http)?;

        Ok(Self {
            client,
            retry: settings.retry.clone(),
        })
    }

    /// GET `url` with `query` and decode the body as JSON, retrying per policy.
    ///
    /// `label` names the endpoint in logs; the URL itself is not logged
    /// because the query carries the API key.
    pub(crate) fn get_json(
        &self,
        label: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<Value, FetchError> {
        let mut retry = 0;
        loop {
            let outcome = self
                .client
                .get(url)
                .header(ACCEPT, "application/json")
                .query(query)
                .send();

            let failure = match outcome {
                Ok(response) if response.status().is_success() => {
                    let body = response.text().map_err(FetchError::Transport)?;
                    return serde_json::from_str(&body)
                        .map_err(|err| FetchError::Decode(err.to_string()));
                }
                Ok(response) => {
                    let status = response.status();
                    if !self.retry.is_retryable_status(status) {
                        return Err(FetchError::Status(status));
                    }
                    FetchError::Status(status)
                }
                Err(err) => {
                    if !(err.is_timeout() || err.is_connect()) {
                        return Err(FetchError::Transport(err));
                    }
                    FetchError::Transport(err)
                }
            };

            if retry >= self.retry.max_retries {
                warn!(endpoint = label, attempts = retry + 1, "giving up after retries");
                return Err(failure);
            }

            let delay = self.retry.backoff(retry);
            debug!(
                endpoint = label,
                retry = retry + 1,
                delay_ms = delay.as_millis() as u64,
                error = %failure,
                "retrying request"
            );
            thread::sleep(delay);
            retry += 1;
        }
    }
}

fn user_agent() -> String {
    format!("ecoroute-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_backs_off_exponentially() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
    }

    #[test]
    fn retryable_statuses() {
        let policy = RetryPolicy::default();
        for code in [408, 429, 500, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(policy.is_retryable_status(status), "{code} should retry");
        }
        for code in [400, 401, 403, 404, 501] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!policy.is_retryable_status(status), "{code} should not retry");
        }
    }

    #[test]
    fn none_policy_keeps_statuses() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.retryable_statuses.len(), 6);
    }

    #[test]
    fn decode_errors_are_not_unavailability() {
        assert!(FetchError::Status(StatusCode::BAD_GATEWAY).is_unavailable());
        assert!(!FetchError::Decode("eof".to_string()).is_unavailable());
    }
}
