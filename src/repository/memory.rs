//! In-memory application store for tests and embedding scenarios.

use std::sync::RwLock;

use crate::domain::application::Application;
use crate::domain::types::ApplicationId;
use crate::repository::ApplicationReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Table-like store keeping applications in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    applications: RwLock<Vec<Application>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an application to the store.
    ///
    /// Duplicate identifiers are accepted here and reported on lookup,
    /// mirroring a backing store whose integrity is enforced elsewhere.
    pub fn insert(&self, application: Application) -> RepositoryResult<()> {
        let mut table = self
            .applications
            .write()
            .map_err(|_| RepositoryError::Unexpected("application table lock poisoned".into()))?;
        table.push(application);
        Ok(())
    }
}

impl ApplicationReader for InMemoryApplicationStore {
    fn get_by_id(&self, id: &ApplicationId) -> RepositoryResult<Option<Application>> {
        let table = self
            .applications
            .read()
            .map_err(|_| RepositoryError::Unexpected("application table lock poisoned".into()))?;

        let mut matches = table.iter().filter(|application| application.id == *id);
        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(RepositoryError::DataIntegrity(format!(
                "more than one application stored for id {id}"
            )));
        }

        Ok(first)
    }
}
