//! Locate and extract ICA Client release metadata from vendor download pages.
//!
//! The vendor page lists several platform packages side by side without a
//! stable schema. This crate finds the block for one platform and reads the
//! package version, its SHA-256 checksum, and the tokenised download URL.
//! It performs no I/O; fetching and output belong to `ica-detect-cli`.
//!
//! # Modules
//!
//! - [`profile`] - Configurable markers for one platform variant
//! - [`patterns`] - Compiled matchers shared by locator and extractor
//! - [`section`](mod@section) - Section locator
//! - [`extract`](mod@extract) - Field extractor
//! - [`detect`](mod@detect) - Parse, locate, and extract in one call
//! - [`release`] - Validated release metadata types

pub mod detect;
pub mod extract;
pub mod patterns;
pub mod profile;
pub mod release;
pub mod section;

pub use detect::detect;
pub use extract::extract;
pub use patterns::{PatternError, SectionPatterns};
pub use profile::PlatformProfile;
pub use section::{Containment, Section, locate, locate_with};
