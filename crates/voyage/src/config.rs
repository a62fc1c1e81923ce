use std::fmt;

use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://api.voyageai.com";
pub const API_KEY_ENV: &str = "VOYAGE_API_KEY";

/// Settings for [`crate::VoyageClient`]. Empty or absent fields fall back to
/// defaults when the client is built.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Bearer token. Falls back to `VOYAGE_API_KEY` when empty.
    pub api_key: String,
    /// Falls back to [`DEFAULT_BASE_URL`] when empty.
    pub base_url: String,
    /// Timeouts, proxies and TLS settings live on this client; the Voyage
    /// client adds none of its own.
    pub http_client: Option<Client>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

pub(crate) const fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_api_key() {
        let cfg = ClientConfig::new("sk-secret").with_base_url("http://localhost:1234");
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("***"));
        assert!(printed.contains("http://localhost:1234"));
    }
}
