//! Collaborator seam for application lookup.

use crate::domain::application::Application;
use crate::domain::types::ApplicationId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Read-only access to the application store.
///
/// A store holds at most one application per identifier; a store that
/// discovers duplicates must report
/// [`RepositoryError::DataIntegrity`](errors::RepositoryError::DataIntegrity)
/// instead of picking one.
pub trait ApplicationReader {
    fn get_by_id(&self, id: &ApplicationId) -> RepositoryResult<Option<Application>>;
}
