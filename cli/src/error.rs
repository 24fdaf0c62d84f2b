//! Error types for the `ica-detect` CLI.
//!
//! Each concern keeps its own error enum; [`DetectorError`] gathers them for
//! the entrypoint, which maps any error to a non-zero exit code.

use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::output::NOT_AVAILABLE;
use camino::Utf8PathBuf;
use ica_detect::PatternError;
use ica_detect::release::IncompleteRelease;
use std::fmt::Display;
use thiserror::Error;

/// Errors that can end a detection run.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A platform profile pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A local page given with `--input` could not be read.
    #[error("failed to read page from {path}")]
    Input {
        /// Path of the page.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Extraction finished without every required field.
    #[error("{}", incomplete_report(.platform, .origin, .release))]
    Incomplete {
        /// Platform name from the profile.
        platform: String,
        /// Where the page came from.
        origin: String,
        /// The partial extraction.
        #[source]
        release: IncompleteRelease,
    },

    /// The release could not be encoded as JSON.
    #[error("failed to encode release as JSON")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for detector results.
pub type Result<T> = std::result::Result<T, DetectorError>;

fn incomplete_report(platform: &str, origin: &str, release: &IncompleteRelease) -> String {
    let fields = release.fields();
    format!(
        concat!(
            "Could not extract {platform} information from {origin}\n",
            "Found version: {version}\n",
            "Found sha256: {checksum}\n",
            "Found download_url: {url}"
        ),
        platform = platform,
        origin = origin,
        version = or_not_available(fields.version.as_ref()),
        checksum = or_not_available(fields.checksum.as_ref()),
        url = or_not_available(fields.download_url.as_ref()),
    )
}

fn or_not_available(value: Option<&impl Display>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), ToString::to_string)
}
