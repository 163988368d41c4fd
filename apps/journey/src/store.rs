//! # JSON File Store
//!
//! Feedback records persisted as one pretty-printed JSON array.
//!
//! Every operation re-reads the file, so several processes (a journey and a
//! `messages` command) see each other's writes. Writes go to a sibling
//! temporary file first and are renamed into place.

use journey_core::{
    FeedbackRecord, FeedbackStore, JourneyError, MAX_STORE_BYTES, records_from_json,
    records_to_json,
};
use std::path::{Path, PathBuf};

/// [`FeedbackStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<FeedbackRecord>, JourneyError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| JourneyError::IoError(format!("Cannot read file metadata: {}", e)))?;
        if metadata.len() > MAX_STORE_BYTES as u64 {
            return Err(JourneyError::SerializationError(format!(
                "Store file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_STORE_BYTES
            )));
        }

        let bytes = std::fs::read(&self.path).map_err(|e| {
            JourneyError::IoError(format!("Cannot read '{}': {}", self.path.display(), e))
        })?;
        records_from_json(&bytes)
    }

    fn save(&self, records: &[FeedbackRecord]) -> Result<(), JourneyError> {
        let bytes = records_to_json(records)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, &bytes).map_err(|e| {
            JourneyError::IoError(format!("Cannot write '{}': {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            JourneyError::IoError(format!("Cannot replace '{}': {}", self.path.display(), e))
        })
    }
}

impl FeedbackStore for JsonFileStore {
    fn append(&mut self, record: FeedbackRecord) -> Result<(), JourneyError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;

        tracing::info!(
            event = "feedback_stored",
            path = %self.path.display(),
            total = records.len(),
            "Feedback message stored"
        );
        Ok(())
    }

    fn records(&self) -> Result<Vec<FeedbackRecord>, JourneyError> {
        self.load()
    }

    fn clear(&mut self) -> Result<(), JourneyError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                JourneyError::IoError(format!("Cannot remove '{}': {}", self.path.display(), e))
            })?;
        }
        tracing::info!(event = "feedback_cleared", path = %self.path.display(), "Feedback store cleared");
        Ok(())
    }
}
