use oci_client::errors::{OciDistributionError, OciErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Cache lock poisoned")]
    LockPoisoned,

    #[error("Failed to create cache directory: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Rate limited by registry")]
    RateLimited,

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Distribution(OciDistributionError),
}

impl RegistryError {
    /// Classifies a distribution client error for `repository`.
    pub fn from_distribution(err: OciDistributionError, repository: &str) -> Self {
        match err {
            OciDistributionError::UnauthorizedError { url } => Self::Unauthorized(url),
            OciDistributionError::AuthenticationFailure(reason) => Self::Unauthorized(reason),
            OciDistributionError::ServerError { code: 404, .. } => {
                Self::NotFound(repository.to_string())
            }
            OciDistributionError::ServerError { code: 429, .. } => Self::RateLimited,
            OciDistributionError::RegistryError { envelope, url } => {
                let codes: Vec<&OciErrorCode> = envelope.errors.iter().map(|e| &e.code).collect();
                if codes.iter().any(|c| matches!(c, OciErrorCode::NameUnknown)) {
                    Self::NotFound(repository.to_string())
                } else if codes.iter().any(|c| matches!(c, OciErrorCode::Toomanyrequests)) {
                    Self::RateLimited
                } else if codes
                    .iter()
                    .any(|c| matches!(c, OciErrorCode::Unauthorized | OciErrorCode::Denied))
                {
                    Self::Unauthorized(url)
                } else {
                    Self::Distribution(OciDistributionError::RegistryError { envelope, url })
                }
            }
            other => Self::Distribution(other),
        }
    }
}
