//! Package name availability on the npm registry

use crate::manifest::PackageName;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use url::Url;

/// Answers whether a package name is still free to publish
#[allow(async_fn_in_trait)]
pub trait NameRegistry {
    async fn is_available(&self, name: &PackageName) -> Result<bool>;
}

/// Registry client backed by the npm HTTP API
pub struct NpmRegistry {
    base_url: Url,
    client: reqwest::Client,
}

impl NpmRegistry {
    /// Create a client with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a product config, honoring its URL override env var
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid registry URL: {}", url_str))?;
        Ok(Self::new(url, config.user_agent()))
    }

    /// Metadata URL for a package; the scope separator is percent-encoded
    pub fn package_url(&self, name: &PackageName) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", self.base_url))?
            .pop_if_empty()
            .push(name.as_str());
        Ok(url)
    }
}

impl NameRegistry for NpmRegistry {
    async fn is_available(&self, name: &PackageName) -> Result<bool> {
        let url = self.package_url(name)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach the package registry at {}", url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(true),
            status if status.is_success() => Ok(false),
            status => anyhow::bail!("Registry lookup for {} failed: HTTP {}", name, status),
        }
    }
}

/// Registry that accepts every name, for offline runs
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRegistry;

impl NameRegistry for OfflineRegistry {
    async fn is_available(&self, _name: &PackageName) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(base: &str) -> NpmRegistry {
        NpmRegistry::new(Url::parse(base).unwrap(), "test-agent")
    }

    #[test]
    fn test_package_url_plain_name() {
        let name = PackageName::parse("suite-metrics").unwrap();
        let url = registry("https://registry.npmjs.org").package_url(&name).unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/suite-metrics");
    }

    #[test]
    fn test_package_url_encodes_scope_separator() {
        let name = PackageName::parse("@acme/widgets").unwrap();
        let url = registry("https://registry.example.com/npm/").package_url(&name).unwrap();
        assert_eq!(
            url.as_str(),
            "https://registry.example.com/npm/@acme%2Fwidgets"
        );
    }

    #[tokio::test]
    async fn test_offline_registry_accepts_everything() {
        let name = PackageName::parse("react").unwrap();
        assert!(OfflineRegistry.is_available(&name).await.unwrap());
    }
}
