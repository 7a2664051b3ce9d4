use std::sync::RwLock;

use moneyflow_core::{DomainError, DomainResult};

use super::r#trait::RecordStore;

/// In-memory record store.
///
/// Intended for tests/dev. `absent()` models a backing file that does not exist
/// yet: loads fail with `StoreNotFound` until the first save.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    records: RwLock<Option<Vec<R>>>,
    name: String,
}

impl<R> InMemoryStore<R> {
    /// Empty, existing store.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_records(name, Vec::new())
    }

    pub fn with_records(name: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(Some(records)),
            name: name.into(),
        }
    }

    /// Store with no backing data at all.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            records: RwLock::new(None),
            name: name.into(),
        }
    }
}

impl<R> RecordStore<R> for InMemoryStore<R>
where
    R: Clone + Send + Sync,
{
    fn load(&self) -> DomainResult<Vec<R>> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::store_io(format!("{}: lock poisoned", self.name)))?;
        records
            .clone()
            .ok_or_else(|| DomainError::store_not_found(self.location()))
    }

    fn save(&self, records: &[R]) -> DomainResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| DomainError::store_io(format!("{}: lock poisoned", self.name)))?;
        *guard = Some(records.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory:{}", self.name)
    }
}
