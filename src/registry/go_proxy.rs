//! Go Module Proxy client
//!
//! Lists published module versions from a Go module proxy:
//! - List versions: {proxy}/{module}/@v/list

use crate::error::RegistryError;
use crate::registry::client::Fetched;
use crate::registry::{HttpClient, RegistryClient};
use async_trait::async_trait;
use tracing::debug;

/// Public Go Module Proxy base URL
pub const GO_PROXY_URL: &str = "https://proxy.golang.org";

/// Go Module Proxy client
pub struct GoProxyClient {
    client: HttpClient,
    base_url: String,
}

impl GoProxyClient {
    /// Create a client for the proxy at `base_url`
    pub fn new(base_url: &str, client: HttpClient) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for listing versions
    fn build_list_url(&self, module: &str) -> String {
        format!("{}/{}/@v/list", self.base_url, encode_module_path(module))
    }
}

/// Encode a module path for proxy URLs
///
/// The proxy uses case-encoded paths where uppercase letters become
/// `!lowercase`.
fn encode_module_path(module: &str) -> String {
    let mut encoded = String::with_capacity(module.len());
    for ch in module.chars() {
        if ch.is_ascii_uppercase() {
            encoded.push('!');
            encoded.push(ch.to_ascii_lowercase());
        } else {
            encoded.push(ch);
        }
    }
    encoded
}

#[async_trait]
impl RegistryClient for GoProxyClient {
    fn registry_name(&self) -> &'static str {
        "Go Proxy"
    }

    async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_list_url(module);

        let body = match self
            .client
            .get_text(&url, module, self.registry_name())
            .await?
        {
            Fetched::Body(body) => body,
            Fetched::Missing => {
                debug!(module, "module not published on proxy");
                return Ok(Vec::new());
            }
        };

        let versions: Vec<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        debug!(module, count = versions.len(), "listed versions");
        Ok(versions)
    }
}
