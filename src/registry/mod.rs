//! Retrieval of repository tag lists
//!
//! # Modules
//!
//! - [`oci`]: Distribution API client (`/v2/<name>/tags/list`) with anonymous
//!   token negotiation
//! - [`cache`]: SQLite cache of fetched tag lists
//! - [`error`]: error types for cache and registry operations

pub mod cache;
pub mod error;
pub mod oci;

#[cfg(test)]
use mockall::automock;

use crate::image::ImageReference;
use crate::registry::error::RegistryError;

pub use cache::{Cache, TagStore};
pub use oci::OciRegistry;

/// Trait for fetching the tags of an image repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagRegistry: Send + Sync {
    /// Fetches every tag of the repository `image` belongs to
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - All tags, in the order the registry reported them
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_all_tags(&self, image: &ImageReference) -> Result<Vec<String>, RegistryError>;
}
