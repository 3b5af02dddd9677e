//! Service layer orchestrating document assembly and generation.

use thiserror::Error;

use crate::domain::types::ApplicationId;
use crate::rendering::errors::RenderError;
use crate::repository::errors::RepositoryError;

pub mod document;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository failure: {0}")]
    Repository(#[from] RepositoryError),

    #[error("rendering failure: {0}")]
    Render(#[from] RenderError),

    #[error("application {0} is in review but carries no review record")]
    MissingReview(ApplicationId),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
