//! Client configuration.

use std::time::Duration;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the remote service. Endpoint paths are appended to it.
    pub base_url: Url,

    /// Deadline for a single round trip, connect to last body byte.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// Production origin of the bdsaas open API.
    pub const DEFAULT_BASE_URL: &'static str = "https://openapi.bdsaas.com";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Sets the service origin.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or is not
    /// an `http`/`https` URL.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> ClientResult<Self> {
        let parsed = Url::parse(url.as_ref()).map_err(|e| {
            ClientError::configuration(format!("invalid base URL {:?}: {}", url.as_ref(), e))
                .with_source(e)
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::configuration(format!(
                "unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }
        self.base_url = parsed;
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Joins an endpoint path onto the base URL.
    ///
    /// The path is appended verbatim, so a base URL carrying a path prefix
    /// (e.g. a reverse proxy mount point) keeps it.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("bdsaas-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://openapi.bdsaas.com/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("bdsaas-client/"));
    }

    #[test]
    fn endpoint_joins_paths() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint("/bdsaas/call/phoneApi/callPhone.do"),
            "https://openapi.bdsaas.com/bdsaas/call/phoneApi/callPhone.do"
        );
        assert_eq!(
            config.endpoint("ping"),
            "https://openapi.bdsaas.com/ping"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080/proxy/")
            .unwrap();
        assert_eq!(
            config.endpoint("/bdsaas/x.do"),
            "http://127.0.0.1:8080/proxy/bdsaas/x.do"
        );
    }

    #[test]
    fn builder_methods() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("crm-sync/2.1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "crm-sync/2.1");
    }

    #[test]
    fn invalid_base_url_returns_error() {
        let err = ClientConfig::default()
            .with_base_url("not a url")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = ClientConfig::default()
            .with_base_url("ftp://openapi.bdsaas.com")
            .unwrap_err();
        assert!(err.message().contains("ftp"));
    }
}
