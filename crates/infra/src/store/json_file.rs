use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use moneyflow_core::{DomainError, DomainResult};

use super::r#trait::RecordStore;

/// What loading a store whose file does not exist yields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MissingFile {
    /// Treat as an empty list (stores that are appended to).
    Empty,
    /// Fail with `StoreNotFound` (stores expected to pre-exist).
    Fail,
}

/// Store backed by one file holding a JSON array of records.
///
/// Saves rewrite the whole file, pretty-printed with two-space indentation.
#[derive(Debug, Clone)]
pub struct JsonFileStore<R> {
    path: PathBuf,
    missing: MissingFile,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonFileStore<R> {
    pub fn new(path: impl Into<PathBuf>, missing: MissingFile) -> Self {
        Self {
            path: path.into(),
            missing,
            _record: PhantomData,
        }
    }

    /// A store whose absent file reads as empty.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self::new(path, MissingFile::Empty)
    }

    /// A store whose absent file is an error.
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self::new(path, MissingFile::Fail)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R> RecordStore<R> for JsonFileStore<R>
where
    R: Serialize + DeserializeOwned,
{
    fn load(&self) -> DomainResult<Vec<R>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return match self.missing {
                    MissingFile::Empty => {
                        tracing::debug!(store = %self.path.display(), "store file absent, starting empty");
                        Ok(Vec::new())
                    }
                    MissingFile::Fail => Err(DomainError::store_not_found(self.location())),
                };
            }
            Err(e) => {
                return Err(DomainError::store_io(format!("{}: {e}", self.location())));
            }
        };

        let records: Vec<R> = serde_json::from_slice(&raw)
            .map_err(|e| DomainError::store_corrupt(format!("{}: {e}", self.location())))?;

        tracing::debug!(store = %self.path.display(), records = records.len(), "store loaded");
        Ok(records)
    }

    fn save(&self, records: &[R]) -> DomainResult<()> {
        let body = serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::store_corrupt(format!("{}: {e}", self.location())))?;

        fs::write(&self.path, body).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::store_not_found(self.location()),
            _ => DomainError::store_io(format!("{}: {e}", self.location())),
        })?;

        tracing::debug!(store = %self.path.display(), records = records.len(), "store saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
