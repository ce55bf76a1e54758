use std::time::Duration;

/// Where the verification service listens unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// How long a health probe may take unless configured otherwise.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Builder for [`HttpVerifierConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpVerifierConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    probe_timeout: Option<Duration>,
}

impl HttpVerifierConfigBuilder {
    /// Creates a builder with everything left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the service, e.g. `http://localhost:8000`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Gives up on a request after `timeout`. Without it, a request waits
    /// as long as the service takes.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Gives up on a health probe after `timeout`. Probes are never left
    /// waiting indefinitely, the default is [`DEFAULT_PROBE_TIMEOUT`].
    #[inline]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> HttpVerifierConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        HttpVerifierConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: self.timeout,
            probe_timeout: self.probe_timeout.unwrap_or(DEFAULT_PROBE_TIMEOUT),
        }
    }
}

/// Configuration for [`crate::HttpVerifier`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpVerifierConfig {
    pub(crate) base_url: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) probe_timeout: Duration,
}

impl HttpVerifierConfig {
    /// Returns the base URL, without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout, if any.
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the health probe timeout.
    #[inline]
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpVerifierConfigBuilder::new().build();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.probe_timeout(), DEFAULT_PROBE_TIMEOUT);
        assert_eq!(
            config.url("/api/verify-text"),
            "http://127.0.0.1:8000/api/verify-text"
        );
    }

    #[test]
    fn test_trailing_slash() {
        let config = HttpVerifierConfigBuilder::new()
            .with_base_url("https://verify.example.com/")
            .with_timeout(Duration::from_secs(30))
            .build();
        assert_eq!(config.url("/"), "https://verify.example.com/");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }
}
