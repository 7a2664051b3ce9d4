use std::sync::Arc;

use moneyflow_core::DomainResult;

/// Array-of-records store for one entity type.
///
/// Every mutation is a full read-modify-write: callers load the whole list,
/// change it in memory and save it back. There is no locking, so two writers on
/// the same backing store can lose updates.
pub trait RecordStore<R>: Send + Sync {
    /// Load every record.
    ///
    /// A missing backing store is either an empty list or `StoreNotFound`,
    /// depending on how the store was opened. Undecodable content is always
    /// `StoreCorrupt`.
    fn load(&self) -> DomainResult<Vec<R>>;

    /// Replace the stored list.
    fn save(&self, records: &[R]) -> DomainResult<()>;

    /// Human-readable location, for log fields and error reasons.
    fn location(&self) -> String;

    /// Load, push `record`, save.
    fn append_and_save(&self, record: R) -> DomainResult<()> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}

impl<R, S> RecordStore<R> for Arc<S>
where
    S: RecordStore<R> + ?Sized,
{
    fn load(&self) -> DomainResult<Vec<R>> {
        (**self).load()
    }

    fn save(&self, records: &[R]) -> DomainResult<()> {
        (**self).save(records)
    }

    fn location(&self) -> String {
        (**self).location()
    }

    fn append_and_save(&self, record: R) -> DomainResult<()> {
        (**self).append_and_save(record)
    }
}
