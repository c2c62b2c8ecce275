use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::application::repos::RepoError;
use crate::domain::error::DomainError;
use crate::infra::error::InfraError;

/// Failure modes of the content read layer.
///
/// `NotFound` is an expected absence and must stay distinguishable from a
/// failing repository: the former renders a not-found page, the latter an
/// error page.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound)
    }
}

/// Top-level application error used by the binary and HTTP boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("resource not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::NotFound { .. })
            | AppError::Repo(RepoError::NotFound)
            | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Domain(DomainError::Validation { .. }) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Repo(RepoError::Duplicate { .. }) => StatusCode::CONFLICT,
            AppError::Repo(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Infra(InfraError::Database { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Infra(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::NotFound { .. })
            | AppError::Repo(RepoError::NotFound)
            | AppError::NotFound => "Resource not found",
            AppError::Domain(DomainError::Validation { .. }) | AppError::Validation(_) => {
                "Request could not be processed"
            }
            AppError::Repo(RepoError::Duplicate { .. }) => "Duplicate record",
            AppError::Repo(_) | AppError::Infra(InfraError::Database { .. }) => {
                "Service temporarily unavailable"
            }
            AppError::Infra(InfraError::Configuration { .. }) => "Service misconfigured",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
            AppError::Infra(InfraError::Io(_)) => "I/O failure during request",
            AppError::Unexpected(_) => "Unexpected error occurred",
        }
    }
}

impl From<ContentError> for AppError {
    fn from(error: ContentError) -> Self {
        match error {
            ContentError::NotFound => AppError::NotFound,
            ContentError::Repo(err) => AppError::Repo(err),
        }
    }
}

impl From<crate::application::admin::AdminError> for AppError {
    fn from(error: crate::application::admin::AdminError) -> Self {
        use crate::application::admin::AdminError;
        match error {
            AdminError::Validation(message) => AppError::Validation(message),
            AdminError::NotFound => AppError::NotFound,
            AdminError::Repo(err) => AppError::Repo(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.presentation_message();
        (status, message).into_response()
    }
}
