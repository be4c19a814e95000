//! OCI Distribution API registry implementation

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use indexmap::IndexSet;
use oci_client::client::{ClientConfig, ClientProtocol};
use oci_client::secrets::RegistryAuth;
use oci_client::{Client, Reference};
use tracing::debug;

use crate::config::RegistryConfig;
use crate::image::ImageReference;
use crate::registry::TagRegistry;
use crate::registry::error::RegistryError;

const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (+",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// Registry implementation for the OCI Distribution API.
///
/// Anonymous bearer tokens are negotiated by the underlying client.
pub struct OciRegistry {
    client: Client,
    page_size: usize,
    mirrors: HashMap<String, String>,
}

impl OciRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        let timeout = Some(Duration::from_millis(config.timeout_ms));
        let client = Client::new(ClientConfig {
            protocol: protocol_for(&config.insecure),
            user_agent: USER_AGENT,
            read_timeout: timeout,
            connect_timeout: timeout,
            ..Default::default()
        });

        Self {
            client,
            page_size: config.page_size.max(1),
            mirrors: config
                .mirrors
                .iter()
                .map(|(domain, host)| (domain.clone(), host.trim_end_matches('/').to_string()))
                .collect(),
        }
    }

    /// Reference to query for `image`, moved to its mirror when one is configured
    fn target(&self, image: &ImageReference) -> Reference {
        match self.mirrors.get(image.registry()) {
            Some(mirror) => Reference::with_tag(
                mirror.clone(),
                image.repository().to_string(),
                image.tag().unwrap_or("latest").to_string(),
            ),
            None => image.reference().clone(),
        }
    }
}

/// Plain HTTP for the hosts in `insecure`, HTTPS everywhere else
fn protocol_for(insecure: &HashSet<String>) -> ClientProtocol {
    if insecure.is_empty() {
        ClientProtocol::Https
    } else {
        ClientProtocol::HttpsExcept(insecure.iter().cloned().collect())
    }
}

#[async_trait::async_trait]
impl TagRegistry for OciRegistry {
    async fn fetch_all_tags(&self, image: &ImageReference) -> Result<Vec<String>, RegistryError> {
        let target = self.target(image);
        let mut tags: IndexSet<String> = IndexSet::new();

        // Stop on an empty page or on a page without new tags, which covers
        // registries that ignore the `last` parameter.
        loop {
            let page = self
                .client
                .list_tags(
                    &target,
                    &RegistryAuth::Anonymous,
                    Some(self.page_size),
                    tags.last().map(String::as_str),
                )
                .await
                .map_err(|e| RegistryError::from_distribution(e, image.repository()))?;

            let before = tags.len();
            tags.extend(page.tags);

            debug!(
                "Fetched page for {}/{}: {} tags so far",
                target.registry(),
                target.repository(),
                tags.len()
            );

            if tags.len() == before {
                break;
            }
        }

        Ok(tags.into_iter().collect())
    }
}
