//! Error types for release metadata values.
//!
//! Each variant names the rejected input and the constraint it violated so a
//! vendor page change can be diagnosed from the message alone.

use thiserror::Error;

/// Errors arising from invalid release metadata values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    /// A version string does not follow the `N.N.N.N-N` layout.
    #[error("invalid release version \"{value}\": expected N.N.N.N-N")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
    },

    /// A SHA-256 digest is not a valid 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A download URL does not use the `https` scheme.
    #[error("insecure download URL \"{value}\": expected an https:// URL")]
    InsecureUrl {
        /// The rejected URL.
        value: String,
    },
}

/// Result type alias using [`ReleaseError`].
pub type Result<T> = std::result::Result<T, ReleaseError>;
