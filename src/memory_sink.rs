use crate::record::LogRecord;
use crate::sink::{Sink, SinkError};
use std::sync::{Arc, Mutex, MutexGuard};

/// A sink that keeps every record in memory.
///
/// Clones share the same buffer, so one clone can be installed as the
/// destination while another is used to inspect what was logged.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        // A panic while holding the lock cannot leave a Vec half-pushed.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of all records captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<LogRecord> {
        self.lock().last().cloned()
    }

    /// Remove and return all captured records.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        self.lock().push(record.clone());
        Ok(())
    }
}
