//! Daily motivational quote, fetched once per day from an external
//! source.
//!
//! The source is an external collaborator that may be unreachable or
//! return text outside the accepted length window. Fetching is bounded:
//! at most `max_attempts` requests per stale day, each under the
//! configured HTTP timeout, after which the configured fallback text is
//! cached for the day so renders stop hitting the network until
//! rollover.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::QuoteConfig;
use crate::daily::cache::DailyCache;
use crate::error::{Error, Result};

/// Cache key for the daily quote.
const QUOTE_KEY: &str = "quote";

/// A quote returned by the upstream source.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Quote {
    /// Quote text; some upstreams name the field `affirmation`
    #[serde(alias = "affirmation")]
    pub text: String,
}

/// An upstream daily-quote provider.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_daily(&self) -> Result<Quote>;
}

/// HTTP client for the quote endpoint.
pub struct HttpQuoteSource {
    http_client: reqwest::Client,
    url: String,
}

impl HttpQuoteSource {
    /// Create a client from configuration.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: config.url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch_daily(&self) -> Result<Quote> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Quote(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Quote(format!("API error ({}): {}", status, error_text)));
        }

        response
            .json::<Quote>()
            .await
            .map_err(|e| Error::Quote(format!("failed to parse response: {}", e)))
    }
}

/// Today's quote: the cached value while FRESH, otherwise a bounded
/// re-request loop against `source`.
///
/// A fetched quote is accepted only when its character count falls in
/// `[min_len, max_len]`. When no attempt yields an acceptable quote the
/// fallback text is cached for the day, so the source is not retried on
/// every render.
pub async fn daily_quote(
    cache: &mut DailyCache,
    source: &dyn QuoteSource,
    config: &QuoteConfig,
    today: NaiveDate,
) -> String {
    if let Some(Value::String(text)) = cache.get(QUOTE_KEY, today) {
        return text.clone();
    }

    let text = fetch_acceptable(source, config).await.unwrap_or_else(|| {
        tracing::warn!(
            attempts = config.max_attempts,
            "no acceptable quote obtained, caching fallback for the day"
        );
        config.fallback.clone()
    });

    if let Err(error) = cache.put(QUOTE_KEY, Value::String(text.clone()), today) {
        tracing::warn!(%error, "failed to persist daily quote");
    }
    text
}

/// Run the bounded attempt loop, returning the first in-range quote.
async fn fetch_acceptable(source: &dyn QuoteSource, config: &QuoteConfig) -> Option<String> {
    let mut delay = Duration::from_millis(250);

    for attempt in 1..=config.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(delay).await;
            delay = std::cmp::min(delay * 2, Duration::from_secs(2));
        }

        match source.fetch_daily().await {
            Ok(quote) => {
                let len = quote.text.chars().count();
                if (config.min_len..=config.max_len).contains(&len) {
                    return Some(quote.text);
                }
                tracing::debug!(attempt, len, "quote length out of range, retrying");
            }
            Err(error) => {
                tracing::warn!(attempt, %error, "quote fetch failed");
            }
        }
    }
    None
}
