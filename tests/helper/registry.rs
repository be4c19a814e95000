//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use tagwatch::image::ImageReference;
use tagwatch::registry::error::RegistryError;
use tagwatch::registry::{Cache, TagRegistry, TagStore};

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    tags: HashMap<String, Vec<String>>,
    fetches: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the tags of `repository` (e.g. `library/nginx`)
    pub fn with_tags(mut self, repository: &str, tags: Vec<&str>) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.into_iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Number of fetches served so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagRegistry for MockRegistry {
    async fn fetch_all_tags(&self, image: &ImageReference) -> Result<Vec<String>, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.tags.get(image.repository()) {
            Some(tags) => Ok(tags.clone()),
            None => Err(RegistryError::NotFound(image.repository().to_string())),
        }
    }
}

/// Create a test cache with pre-populated tags
pub fn create_test_cache(
    registry: &str,
    tags: &[(&str, Vec<&str>)],
) -> (TempDir, Arc<Cache>) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let cache = Cache::new(&db_path, 86_400_000).unwrap();

    for (repository, repository_tags) in tags {
        cache
            .replace_tags(
                registry,
                repository,
                repository_tags.iter().map(|t| t.to_string()).collect(),
            )
            .unwrap();
    }

    (temp_dir, Arc::new(cache))
}
