//! Page retrieval over HTTP(S).
//!
//! The fetcher sits behind a trait so the pipeline can be exercised without
//! network access.

use log::debug;
use std::io::ErrorKind;
use std::time::Duration;
use thiserror::Error;

/// Trait for retrieving the vendor download page.
///
/// # Examples
///
/// ```
/// use ica_detect_cli::fetch::HttpFetcher;
/// use std::time::Duration;
///
/// let fetcher = HttpFetcher::new("test-agent", Duration::from_secs(5));
/// assert_eq!(fetcher.timeout(), Duration::from_secs(5));
/// // Use fetcher.fetch("https://...") in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait PageFetcher {
    /// Fetch `url` and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request times out, the server answers
    /// with an error status, or the body cannot be read.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Errors arising while fetching the page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("timed out after {}s fetching {url}", .timeout.as_secs())]
    Timeout {
        /// The URL that was requested.
        url: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {code} fetching {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code.
        code: u16,
    },

    /// The request failed before a response arrived.
    #[error("request failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The response body could not be read as text.
    #[error("failed to read response body from {url}: {reason}")]
    Body {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },
}

/// HTTP fetcher using `ureq` with a global timeout and fixed `User-Agent`.
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    #[must_use]
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// The global request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("fetching {url} (timeout {}s)", self.timeout.as_secs());
        let response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| map_ureq_error(url, self.timeout, &e))?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| match map_ureq_error(url, self.timeout, &e) {
                FetchError::Http { url, reason } => FetchError::Body { url, reason },
                other => other,
            })?;
        debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, timeout: Duration, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::Timeout(_) => FetchError::Timeout {
            url: url.to_owned(),
            timeout,
        },
        ureq::Error::Io(io) if io.kind() == ErrorKind::TimedOut => FetchError::Timeout {
            url: url.to_owned(),
            timeout,
        },
        ureq::Error::StatusCode(code) => FetchError::Status {
            url: url.to_owned(),
            code: *code,
        },
        other => FetchError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
