//! Image references such as `ghcr.io/org/app:v1.2.3`
//!
//! Parsing follows the Docker distribution grammar through
//! [`oci_client::Reference`]; this wrapper also keeps the text as the user
//! wrote it, which is what reports show.

use std::fmt;
use std::str::FromStr;

use oci_client::{ParseError, Reference};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("image reference is empty")]
    Empty,

    #[error("invalid image reference {input:?}: {source}")]
    Invalid { input: String, source: ParseError },
}

/// A parsed image reference: `[registry/]repository[:tag][@digest]`
#[derive(Debug, Clone)]
pub struct ImageReference {
    raw: String,
    reference: Reference,
}

impl ImageReference {
    /// Registry domain, e.g. `docker.io` or `localhost:5000`
    pub fn registry(&self) -> &str {
        self.reference.registry()
    }

    /// Repository path within the registry, e.g. `library/nginx`
    pub fn repository(&self) -> &str {
        self.reference.repository()
    }

    pub fn tag(&self) -> Option<&str> {
        self.reference.tag()
    }

    pub fn digest(&self) -> Option<&str> {
        self.reference.digest()
    }

    /// The normalized reference used to talk to the registry
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// The reference as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ImageReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ReferenceError::Empty);
        }

        let reference = raw
            .parse::<Reference>()
            .map_err(|source| ReferenceError::Invalid {
                input: raw.to_string(),
                source,
            })?;

        Ok(Self {
            raw: raw.to_string(),
            reference,
        })
    }
}
