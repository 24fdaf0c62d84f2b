//! Field extractor: read version, checksum, and URL from a located section.
//!
//! Each field is matched independently so that a diagnostic can say exactly
//! which one a vendor markup change broke.

use crate::patterns::SectionPatterns;
use crate::release::{DownloadUrl, ExtractedFields, ReleaseVersion};
use crate::section::Section;
use log::{debug, warn};

/// Extract the three release fields from `section`.
///
/// The first anchor whose link attribute names the artefact supplies both the
/// version and the URL. The checksum is the first labelled 64-digit token in
/// the section text. Missing fields are left as `None`.
#[must_use]
pub fn extract(section: Section<'_>, patterns: &SectionPatterns) -> ExtractedFields {
    let (version, download_url) = extract_link_fields(section, patterns);
    let checksum = patterns.find_checksum(&section.text());
    if checksum.is_none() {
        warn!(
            "{} section <{}> has no labelled SHA-256 checksum",
            patterns.name(),
            section.tag_name()
        );
    }

    ExtractedFields {
        version,
        checksum,
        download_url,
    }
}

fn extract_link_fields(
    section: Section<'_>,
    patterns: &SectionPatterns,
) -> (Option<ReleaseVersion>, Option<DownloadUrl>) {
    let Some(value) = section
        .link_values(patterns.link_attribute())
        .find(|value| patterns.is_artefact_link(value))
    else {
        warn!(
            "{} section has no anchor whose `{}` names the artefact",
            patterns.name(),
            patterns.link_attribute()
        );
        return (None, None);
    };
    debug!("artefact link candidate: {value}");

    let version = patterns
        .capture_version(value)
        .and_then(|raw| ReleaseVersion::try_from(raw).ok());
    if version.is_none() {
        warn!("artefact link does not embed an N.N.N.N-N version: {value}");
    }

    let download_url = DownloadUrl::from_link(value, patterns.download_origin())
        .inspect_err(|err| warn!("discarding artefact link: {err}"))
        .ok();

    (version, download_url)
}
