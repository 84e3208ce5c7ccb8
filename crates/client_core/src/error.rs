use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog api url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("unsupported catalog api url scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("video game not found")]
    NotFound,
    #[error("catalog api returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),
    #[error("catalog request timed out after {0:?}")]
    Timeout(Duration),
}

impl CatalogError {
    pub fn is_timeout(&self) -> bool {
        match self {
            CatalogError::Timeout(_) => true,
            CatalogError::Transport(err) => err.is_timeout(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound)
    }
}
