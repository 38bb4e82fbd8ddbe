//! Pwned Passwords range API client.

use std::time::Duration;

use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode};

use super::{BreachLookup, HashPrefix, RangeEntry, parse_range_body};
use crate::config::BreachConfig;
use crate::error::LookupError;

pub struct HibpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    padding: bool,
}

impl HibpClient {
    pub fn new(config: &BreachConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LookupError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            timeout: config.timeout,
            padding: config.padding,
        })
    }

    /// URL queried for `prefix`. Nothing but the prefix is appended.
    pub fn range_url(&self, prefix: &HashPrefix) -> String {
        format!("{}{}", self.base_url, prefix)
    }

    fn transport_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else {
            LookupError::Unavailable(err.to_string())
        }
    }
}

fn retry_after(value: Option<&HeaderValue>) -> Option<Duration> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

impl BreachLookup for HibpClient {
    async fn query(&self, prefix: &HashPrefix) -> Result<Vec<RangeEntry>, LookupError> {
        let url = self.range_url(prefix);

        #[cfg(feature = "tracing")]
        tracing::debug!(prefix = %prefix, "querying breach range");

        let mut request = self.client.get(&url);
        if self.padding {
            request = request.header("Add-Padding", "true");
        }

        let resp = request.send().await.map_err(|e| self.transport_error(e))?;

        match resp.status() {
            StatusCode::OK => {
                let body = resp.text().await.map_err(|e| self.transport_error(e))?;
                let entries = parse_range_body(&body)?;

                #[cfg(feature = "tracing")]
                tracing::debug!(prefix = %prefix, candidates = entries.len(), "breach range received");

                Ok(entries)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = retry_after(resp.headers().get(RETRY_AFTER));

                #[cfg(feature = "tracing")]
                tracing::warn!(?retry_after, "breach range rate limited");

                Err(LookupError::RateLimited { retry_after })
            }
            status => {
                #[cfg(feature = "tracing")]
                tracing::warn!(status = status.as_u16(), "breach range lookup failed");

                Err(LookupError::Status(status.as_u16()))
            }
        }
    }
}
