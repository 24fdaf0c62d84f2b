//! Release metadata domain types.
//!
//! # Sub-modules
//!
//! - [`error`] - Validation errors for release values.
//! - [`version`] - Package version newtype (`ReleaseVersion`).
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`download_url`] - Secure download URL newtype and link normalisation.
//! - [`fields`] - Partial extraction results and the checksum policy.

pub mod download_url;
pub mod error;
pub mod fields;
pub mod sha256_digest;
pub mod version;

pub use download_url::{DownloadUrl, normalise_link};
pub use error::ReleaseError;
pub use fields::{ChecksumPolicy, ExtractedFields, Field, IncompleteRelease, ReleaseInfo};
pub use sha256_digest::Sha256Digest;
pub use version::ReleaseVersion;
