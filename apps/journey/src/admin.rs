//! # Admin Access
//!
//! Passphrase gate for the message viewer.
//!
//! The expected passphrase comes from the configuration
//! (`admin_key`, `JOURNEY_ADMIN_KEY`).

use journey_core::JourneyError;
use subtle::ConstantTimeEq;

/// Compare a provided passphrase with the expected one in constant time.
///
/// Both sides are padded to the same length so the comparison always runs
/// over the same number of bytes; the lengths are compared separately.
#[must_use]
pub fn passphrase_matches(provided: &str, expected: &str) -> bool {
    let provided_bytes = provided.as_bytes();
    let expected_bytes = expected.as_bytes();

    let max_len = provided_bytes.len().max(expected_bytes.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided_bytes.len()].copy_from_slice(provided_bytes);
    padded_expected[..expected_bytes.len()].copy_from_slice(expected_bytes);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided_bytes.len() == expected_bytes.len()
}

/// Admit the caller or fail with [`JourneyError::AccessDenied`].
pub fn authorize(provided: &str, expected: &str) -> Result<(), JourneyError> {
    if passphrase_matches(provided.trim(), expected) {
        Ok(())
    } else {
        tracing::warn!(
            event = "auth_failure",
            reason = "invalid_admin_key",
            "Message viewer access denied"
        );
        Err(JourneyError::AccessDenied)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_passes() {
        assert!(passphrase_matches("ivankey123", "ivankey123"));
    }

    #[test]
    fn prefix_and_extension_fail() {
        assert!(!passphrase_matches("ivankey", "ivankey123"));
        assert!(!passphrase_matches("ivankey1234", "ivankey123"));
        assert!(!passphrase_matches("", "ivankey123"));
    }

    #[test]
    fn authorize_trims_and_denies() {
        assert!(authorize(" ivankey123\n", "ivankey123").is_ok());
        assert!(matches!(
            authorize("IVANKEY123", "ivankey123"),
            Err(JourneyError::AccessDenied)
        ));
    }
}
