//! Detection pipeline: load the page, extract fields, apply the policy.
//!
//! The page comes either from the network through a [`PageFetcher`] or from a
//! local file. Everything after that is delegated to the core library.

use crate::config::DetectorConfig;
use crate::error::{DetectorError, Result};
use crate::fetch::PageFetcher;
use camino::Utf8PathBuf;
use ica_detect::release::{ChecksumPolicy, ReleaseInfo};
use ica_detect::{SectionPatterns, detect};
use log::{debug, info};
use std::fmt;

/// Where the page is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Fetch the page over HTTP(S).
    Url(String),
    /// Read a saved page from disk.
    File(Utf8PathBuf),
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

/// Load the page text from `source`.
///
/// # Errors
///
/// Returns [`DetectorError::Fetch`] when the fetch fails and
/// [`DetectorError::Input`] when a local file cannot be read.
pub fn load_page(source: &PageSource, fetcher: &dyn PageFetcher) -> Result<String> {
    match source {
        PageSource::Url(url) => Ok(fetcher.fetch(url)?),
        PageSource::File(path) => {
            debug!("reading page from {path}");
            std::fs::read_to_string(path).map_err(|source| DetectorError::Input {
                path: path.clone(),
                source,
            })
        }
    }
}

/// Extract a release from page text.
///
/// # Errors
///
/// Returns [`DetectorError::Incomplete`] when a required field is missing.
pub fn release_from_page(
    html: &str,
    origin: &PageSource,
    patterns: &SectionPatterns,
    policy: ChecksumPolicy,
) -> Result<ReleaseInfo> {
    let fields = detect(html, patterns);
    let release = fields
        .into_release(policy)
        .map_err(|release| DetectorError::Incomplete {
            platform: patterns.name().to_owned(),
            origin: origin.to_string(),
            release,
        })?;
    info!("detected {} {}", patterns.name(), release.version);
    Ok(release)
}

/// Run one detection with `config` against `source`.
///
/// # Errors
///
/// Returns [`DetectorError`] when the profile does not compile, the page
/// cannot be loaded, or extraction is incomplete.
pub fn run_detection(
    config: &DetectorConfig,
    source: &PageSource,
    fetcher: &dyn PageFetcher,
) -> Result<ReleaseInfo> {
    let patterns = SectionPatterns::compile(&config.platform)?;
    let html = load_page(source, fetcher)?;
    release_from_page(&html, source, &patterns, config.checksum_policy())
}
