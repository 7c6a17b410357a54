// HTTP plumbing shared by the network-using runners

use std::time::Duration;

use crate::errors::GrabError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Configuration for outbound requests
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// SOCKS5/HTTP proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Build a reqwest client from the config
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, GrabError> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone());

    if let Some(proxy_url) = config.proxy.as_deref() {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| GrabError::Network(format!("Invalid proxy {}: {}", proxy_url, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| GrabError::Network(format!("Failed to build HTTP client: {}", e)))
}

/// GET a page body as text, treating non-2xx statuses as errors
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, GrabError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GrabError::Network(format!(
            "GET {} returned {}",
            url, status
        )));
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = FetchConfig::default()
            .with_proxy(Some("socks5://127.0.0.1:1080".to_string()))
            .with_timeout(10);
        assert_eq!(config.timeout_seconds, 10);
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let config = FetchConfig::default().with_proxy(Some("not a proxy".to_string()));
        assert!(build_client(&config).is_err());
    }
}
