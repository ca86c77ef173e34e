//! In-memory implementation of RecordSource for testing and development

use crate::core::record::Record;
use crate::core::source::{ClientContext, RecordSource};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory record source
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same collection, so a test can keep one clone to mutate
/// while a poller reads through another.
#[derive(Clone)]
pub struct InMemoryRecordSource<T: Record> {
    records: Arc<RwLock<Vec<T>>>,
    failing: Arc<AtomicBool>,
    fetches: Arc<AtomicUsize>,
}

impl<T: Record> InMemoryRecordSource<T> {
    /// Create an empty source
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a source holding `records`
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            failing: Arc::new(AtomicBool::new(false)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the whole collection
    pub fn replace(&self, records: Vec<T>) -> Result<()> {
        let mut current = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        *current = records;
        Ok(())
    }

    /// Append one record
    pub fn push(&self, record: T) -> Result<()> {
        let mut current = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        current.push(record);
        Ok(())
    }

    /// Remove the record with `key`, returning it if present
    pub fn remove(&self, key: &str) -> Result<Option<T>> {
        let mut current = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        Ok(current
            .iter()
            .position(|r| r.key() == key)
            .map(|idx| current.remove(idx)))
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every following fetch fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of fetches served so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<T: Record> Default for InMemoryRecordSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordSource<T> for InMemoryRecordSource<T> {
    async fn fetch_records(&self, ctx: &ClientContext) -> Result<Vec<T>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!(
                "{} unavailable for client {}",
                T::resource_name(),
                ctx.client_id
            ));
        }

        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }
}
