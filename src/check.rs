//! Newest-tag lookup for a set of images
//!
//! Ties the registry client, the tag cache and [`resolve`] together. Every
//! image is checked independently: a failure for one image is reported in its
//! own result and never stops the others.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::image::{ImageReference, ReferenceError};
use crate::registry::error::RegistryError;
use crate::registry::{TagRegistry, TagStore};
use crate::tag::{Outcome, resolve};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("image reference has no tag to match on")]
    MissingTag,

    #[error("no similar tag format found in registry")]
    NoSimilarTag,

    #[error(transparent)]
    InvalidReference(#[from] ReferenceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Outcome of checking one image given on the command line
#[derive(Debug)]
pub struct ImageCheck {
    /// The image as it was given
    pub image: String,
    /// The tag the image currently uses
    pub current_tag: Option<String>,
    pub result: Result<String, CheckError>,
}

impl ImageCheck {
    /// Returns true when the image already uses its newest tag
    pub fn is_unchanged(&self) -> bool {
        matches!(&self.result, Ok(tag) if self.current_tag.as_deref() == Some(tag.as_str()))
    }
}

/// Looks up the newest tag sharing the format of an image's current tag
pub struct TagChecker {
    registry: Arc<dyn TagRegistry>,
    store: Option<Arc<dyn TagStore>>,
}

impl TagChecker {
    /// Create a checker that always asks the registry
    pub fn new(registry: Arc<dyn TagRegistry>) -> Self {
        Self {
            registry,
            store: None,
        }
    }

    /// Serve tag lists from `store` while they are fresh, and save fetched
    /// lists into it
    pub fn with_store(mut self, store: Arc<dyn TagStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Returns the newest tag with the same format as the image's tag.
    ///
    /// The result equals the image's own tag when nothing newer exists.
    pub async fn latest_similar_tag(&self, image: &ImageReference) -> Result<String, CheckError> {
        let current = image.tag().ok_or(CheckError::MissingTag)?;
        let tags = self.tags_for(image).await?;

        match resolve(current, &tags) {
            Outcome::Found(tag) => {
                debug!("{}: {} -> {}", image, current, tag);
                Ok(tag)
            }
            Outcome::NoCandidates => Err(CheckError::NoSimilarTag),
        }
    }

    /// Parses and checks every input with at most `concurrency` lookups in
    /// flight, keeping the order of `inputs`.
    ///
    /// Inputs that are not valid image references fail individually.
    pub async fn check_inputs<S: AsRef<str>>(
        &self,
        inputs: &[S],
        concurrency: usize,
    ) -> Vec<ImageCheck> {
        info!(
            "Checking {} images with concurrency {}",
            inputs.len(),
            concurrency
        );

        stream::iter(inputs)
            .map(|input| self.check_input(input.as_ref()))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    async fn check_input(&self, input: &str) -> ImageCheck {
        match input.parse::<ImageReference>() {
            Ok(image) => ImageCheck {
                image: image.to_string(),
                current_tag: image.tag().map(str::to_string),
                result: self.latest_similar_tag(&image).await,
            },
            Err(e) => {
                warn!("Invalid image reference {:?}: {}", input, e);
                ImageCheck {
                    image: input.trim().to_string(),
                    current_tag: None,
                    result: Err(e.into()),
                }
            }
        }
    }

    async fn tags_for(&self, image: &ImageReference) -> Result<Vec<String>, CheckError> {
        let (registry, repository) = (image.registry(), image.repository());

        if let Some(store) = &self.store {
            match store.cached_tags(registry, repository) {
                Ok(Some(tags)) => {
                    debug!("Using {} cached tags for {}/{}", tags.len(), registry, repository);
                    return Ok(tags);
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to read cached tags for {}/{}: {}", registry, repository, e),
            }
        }

        let tags = self.registry.fetch_all_tags(image).await?;
        info!("Fetched {} tags for {}/{}", tags.len(), registry, repository);

        if let Some(store) = &self.store {
            let _ = store
                .replace_tags(registry, repository, tags.clone())
                .inspect_err(|e| {
                    warn!("Failed to cache tags for {}/{}: {}", registry, repository, e)
                });
        }

        Ok(tags)
    }
}
