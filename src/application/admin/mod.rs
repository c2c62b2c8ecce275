//! Admin mutation services.
//!
//! Writes go straight to the repositories; the services own input validation
//! and the cache-tag invalidation contract described in [`crate::cache`].

pub mod pages;
pub mod posts;

use thiserror::Error;

use crate::application::repos::RepoError;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl AdminError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<RepoError> for AdminError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AdminError::NotFound,
            RepoError::InvalidInput { message } => AdminError::Validation(message),
            other => AdminError::Repo(other),
        }
    }
}
