//! Append-only feedback storage.

use super::FeedbackRecord;
use crate::JourneyError;

/// Storage for feedback records.
///
/// Records are appended in arrival order; readers get them back in the same
/// order and decide how to present them.
pub trait FeedbackStore {
    /// Append one record.
    fn append(&mut self, record: FeedbackRecord) -> Result<(), JourneyError>;

    /// All records, oldest first.
    fn records(&self) -> Result<Vec<FeedbackRecord>, JourneyError>;

    /// Remove every record.
    fn clear(&mut self) -> Result<(), JourneyError>;
}

/// Volatile store, used by tests and as a no-persistence fallback.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeedbackStore {
    records: Vec<FeedbackRecord>,
}

impl MemoryFeedbackStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FeedbackStore for MemoryFeedbackStore {
    fn append(&mut self, record: FeedbackRecord) -> Result<(), JourneyError> {
        self.records.push(record);
        Ok(())
    }

    fn records(&self) -> Result<Vec<FeedbackRecord>, JourneyError> {
        Ok(self.records.clone())
    }

    fn clear(&mut self) -> Result<(), JourneyError> {
        self.records.clear();
        Ok(())
    }
}
