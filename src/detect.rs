//! Parse a page and run the locator and extractor over it.

use crate::extract::extract;
use crate::patterns::SectionPatterns;
use crate::release::ExtractedFields;
use crate::section::{Containment, locate, locate_with};
use log::{debug, warn};
use scraper::Html;

/// Detect release fields in an HTML page.
///
/// The section must hold an artefact link and a checksum. When none does,
/// a link-only section is tried so that the version and URL can still be
/// reported; its checksum is then absent. A warning is logged when the
/// checksum-bearing section is wider than the block holding the link, since
/// the checksum may then come from a neighbouring platform. When neither
/// qualifies, every field
/// is absent. The parsed document lives only for the duration of this call.
///
/// # Examples
///
/// ```
/// use ica_detect::{PlatformProfile, SectionPatterns, detect};
///
/// let patterns = SectionPatterns::compile(&PlatformProfile::red_hat()).unwrap();
/// let html = format!(
///     "<div><p>Red Hat Full Package</p><a rel=\"//dl.test/ICAClient-rhel-23.11.0.1-1.x86_64.rpm?token=abc\">Get</a>SHA-256 - {}</div>",
///     "A".repeat(64)
/// );
///
/// let fields = detect(&html, &patterns);
/// assert_eq!(fields.version.unwrap().as_str(), "23.11.0.1-1");
/// assert_eq!(fields.checksum.unwrap().as_str(), "a".repeat(64));
/// assert_eq!(
///     fields.download_url.unwrap().as_str(),
///     "https://dl.test/ICAClient-rhel-23.11.0.1-1.x86_64.rpm?token=abc"
/// );
/// ```
#[must_use]
pub fn detect(html: &str, patterns: &SectionPatterns) -> ExtractedFields {
    let document = Html::parse_document(html);
    let tight = locate_with(&document, patterns, Containment::LinkOnly);
    let section = match (locate(&document, patterns), tight) {
        (Some(strict), Some(tight)) => {
            if strict.element().id() != tight.element().id() {
                warn!(
                    "{} checksum read from <{}> above the link block <{}>; it may belong to a sibling platform",
                    patterns.name(),
                    strict.tag_name(),
                    tight.tag_name()
                );
            }
            Some(strict)
        }
        (Some(strict), None) => Some(strict),
        (None, tight) => {
            debug!("no section with a checksum; using link-only containment");
            tight
        }
    };
    match section {
        Some(section) => extract(section, patterns),
        None => {
            warn!("no {} section found in document", patterns.name());
            ExtractedFields::default()
        }
    }
}
