//! SHA-256 digest newtype for published package checksums.
//!
//! Stored digests are always 64 lowercase hexadecimal characters. Vendor pages
//! publish either case, so [`Sha256Digest::normalised`] accepts both and folds
//! to lowercase, while the `TryFrom` conversions stay strict.

use super::error::{ReleaseError, Result};
use std::fmt;

/// Expected length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A validated hex-encoded SHA-256 digest string.
///
/// # Examples
///
/// ```
/// use ica_detect::release::Sha256Digest;
///
/// let hex = "A".repeat(64);
/// let digest = Sha256Digest::normalised(&hex).unwrap();
/// assert_eq!(digest.as_str(), "a".repeat(64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Validate a digest in either case and fold it to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidSha256Digest`] when the value is not
    /// exactly 64 hexadecimal characters.
    pub fn normalised(value: &str) -> Result<Self> {
        let lowered = value.to_ascii_lowercase();
        validate_sha256(&lowered)?;
        Ok(Self(lowered))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = ReleaseError;

    fn try_from(value: &str) -> Result<Self> {
        validate_sha256(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        validate_sha256(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed lowercase SHA-256 digest.
fn validate_sha256(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(ReleaseError::InvalidSha256Digest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ReleaseError::InvalidSha256Digest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ReleaseError::InvalidSha256Digest {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_digest() -> String {
        "a".repeat(64)
    }

    #[test]
    fn accepts_valid_sixty_four_char_hex() {
        let digest = Sha256Digest::try_from(valid_digest().as_str());
        assert!(digest.is_ok());
    }

    #[rstest]
    #[case::too_short(63)]
    #[case::too_long(65)]
    fn rejects_wrong_length(#[case] len: usize) {
        let value = "a".repeat(len);
        assert!(Sha256Digest::try_from(value.as_str()).is_err());
        assert!(Sha256Digest::normalised(&value).is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        let mut bad = "a".repeat(63);
        bad.push('g');
        let result = Sha256Digest::try_from(bad.as_str());
        assert!(result.is_err());
    }

    #[test]
    fn strict_conversion_rejects_uppercase_hex() {
        let result = Sha256Digest::try_from("A".repeat(64));
        assert!(matches!(
            result,
            Err(ReleaseError::InvalidSha256Digest { .. })
        ));
    }

    #[test]
    fn normalised_folds_mixed_case_to_lowercase() {
        let mixed = "aBcDeF0123456789".repeat(4);
        let digest = Sha256Digest::normalised(&mixed).expect("mixed case is valid hex");
        assert_eq!(digest.as_str(), mixed.to_ascii_lowercase());
    }

    #[test]
    fn display_shows_full_digest() {
        let hex = valid_digest();
        let digest = Sha256Digest::try_from(hex.as_str()).expect("known good");
        assert_eq!(format!("{digest}"), hex);
    }
}
