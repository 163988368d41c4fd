//! # Feedback Formats
//!
//! JSON encoding of the record list and the plain-text export.
//!
//! ## Security
//!
//! The encoded list is size-checked before deserialization so a corrupted
//! or hostile store file cannot force a huge allocation.

use super::FeedbackRecord;
use crate::JourneyError;

/// Maximum accepted size of an encoded record list (8 MB).
pub const MAX_STORE_BYTES: usize = 8 * 1024 * 1024;

const EXPORT_HEADER: &str = "🎉 Birthday Feedback Messages\n\n";
const EXPORT_SEPARATOR: &str = "----------------------------------------\n";

/// Records ordered most recent first.
#[must_use]
pub fn newest_first(records: &[FeedbackRecord]) -> Vec<&FeedbackRecord> {
    records.iter().rev().collect()
}

/// Plain-text export of every record, numbered in arrival order.
///
/// Returns `None` when there is nothing to export.
#[must_use]
pub fn export_text(records: &[FeedbackRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut text = String::from(EXPORT_HEADER);
    for (i, m) in records.iter().enumerate() {
        text.push_str(&format!(
            "Message #{}\nFrom: {}\nTime: {}\n",
            i + 1,
            m.name,
            m.time
        ));
        text.push_str(&format!(
            "Message: {}\nReflection: {}\nMemory: {}\nGallery: {}\n",
            m.message, m.quiz_answer, m.memory_choice, m.gallery_choice
        ));
        text.push_str(EXPORT_SEPARATOR);
    }
    Some(text)
}

/// Encode the record list as a JSON array.
pub fn records_to_json(records: &[FeedbackRecord]) -> Result<Vec<u8>, JourneyError> {
    serde_json::to_vec_pretty(records).map_err(|e| JourneyError::SerializationError(e.to_string()))
}

/// Decode a JSON array of records. Empty input decodes to an empty list.
pub fn records_from_json(bytes: &[u8]) -> Result<Vec<FeedbackRecord>, JourneyError> {
    if bytes.len() > MAX_STORE_BYTES {
        return Err(JourneyError::SerializationError(format!(
            "Record list of {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_STORE_BYTES
        )));
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes).map_err(|e| JourneyError::SerializationError(e.to_string()))
}
