//! Compiled matchers derived from a [`PlatformProfile`].
//!
//! Patterns are compiled once per run and shared by the locator and the
//! extractor so both agree on what an artefact link and a checksum look like.

use crate::profile::PlatformProfile;
use crate::release::Sha256Digest;
use crate::release::sha256_digest::DIGEST_HEX_LEN;
use log::trace;
use regex::Regex;
use thiserror::Error;

/// Four dotted integers, a hyphen, and a build number.
const VERSION_CAPTURE: &str = r"([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+-[0-9]+)";

/// A profile pattern failed to compile.
#[derive(Debug, Error)]
#[error("invalid {field} pattern \"{pattern}\": {source}")]
pub struct PatternError {
    field: &'static str,
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    /// The profile field whose pattern was rejected.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

/// Regexes and settings used to locate and read one platform section.
#[derive(Debug, Clone)]
pub struct SectionPatterns {
    name: String,
    platform_marker: Regex,
    companion_marker: Regex,
    artefact_link: Regex,
    version: Regex,
    checksum: Regex,
    link_attribute: String,
    download_origin: String,
    max_ascent: usize,
}

impl SectionPatterns {
    /// Compile the matchers for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the platform, companion, or checksum
    /// label pattern is not a valid regex.
    ///
    /// # Examples
    ///
    /// ```
    /// use ica_detect::{PlatformProfile, SectionPatterns};
    ///
    /// let patterns = SectionPatterns::compile(&PlatformProfile::red_hat()).unwrap();
    /// assert!(patterns.is_platform_marker("Red-Hat Enterprise Linux"));
    /// ```
    pub fn compile(profile: &PlatformProfile) -> Result<Self, PatternError> {
        let prefix = regex::escape(&profile.artefact_prefix);
        let arch = regex::escape(&profile.artefact_arch);
        let extension = regex::escape(&profile.artefact_extension);

        Ok(Self {
            name: profile.name.clone(),
            platform_marker: build("platform_marker", &format!("(?i){}", profile.platform_marker))?,
            companion_marker: build(
                "companion_marker",
                &format!("(?i){}", profile.companion_marker),
            )?,
            artefact_link: build("artefact", &format!("{prefix}.*{extension}"))?,
            version: build(
                "version",
                &format!(r"{prefix}{VERSION_CAPTURE}\.{arch}{extension}"),
            )?,
            checksum: build(
                "checksum_label",
                &format!(r"(?i)(?:{})\s*[-:]?\s*([0-9A-Fa-f]+)", profile.checksum_label),
            )?,
            link_attribute: profile.link_attribute.clone(),
            download_origin: profile.download_origin.clone(),
            max_ascent: profile.max_ascent,
        })
    }

    /// Human-readable platform name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return true when a text node names the platform.
    #[must_use]
    pub fn is_platform_marker(&self, text: &str) -> bool {
        self.platform_marker.is_match(text)
    }

    /// Return true when a container's text carries the companion phrase.
    #[must_use]
    pub fn has_companion_marker(&self, text: &str) -> bool {
        self.companion_marker.is_match(text)
    }

    /// Return true when a link value holds the artefact prefix followed later
    /// by the extension.
    ///
    /// The locator and the extractor share this test. The version is captured
    /// separately so that a malformed version still yields a URL.
    #[must_use]
    pub fn is_artefact_link(&self, value: &str) -> bool {
        self.artefact_link.is_match(value)
    }

    /// Capture the version embedded in an artefact link value.
    #[must_use]
    pub fn capture_version<'v>(&self, value: &'v str) -> Option<&'v str> {
        self.version
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Find the first labelled 64-digit checksum in `text`.
    ///
    /// The whole hex run after the label is considered, so a 63- or
    /// 65-digit token is skipped rather than truncated.
    #[must_use]
    pub fn find_checksum(&self, text: &str) -> Option<Sha256Digest> {
        self.checksum
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .inspect(|token| trace!("checksum candidate of {} digits", token.len()))
            .find(|token| token.len() == DIGEST_HEX_LEN)
            .and_then(|token| Sha256Digest::normalised(token).ok())
    }

    /// Anchor attribute holding the artefact URL.
    #[must_use]
    pub fn link_attribute(&self) -> &str {
        &self.link_attribute
    }

    /// Origin used for root-relative links.
    #[must_use]
    pub fn download_origin(&self) -> &str {
        &self.download_origin
    }

    /// Number of containers tested during ascent.
    #[must_use]
    pub const fn max_ascent(&self) -> usize {
        self.max_ascent
    }
}

fn build(field: &'static str, pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError {
        field,
        pattern: pattern.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn patterns() -> SectionPatterns {
        SectionPatterns::compile(&PlatformProfile::red_hat()).expect("default profile compiles")
    }

    #[rstest]
    #[case("Red Hat")]
    #[case("Red-Hat")]
    #[case("RedHat")]
    #[case("red hat enterprise")]
    #[case("Red - Hat")]
    fn platform_marker_is_fuzzy(patterns: SectionPatterns, #[case] text: &str) {
        assert!(patterns.is_platform_marker(text));
    }

    #[rstest]
    #[case("Ubuntu")]
    #[case("Red Had")]
    #[case("Redd Hat")]
    fn platform_marker_rejects_other_text(patterns: SectionPatterns, #[case] text: &str) {
        assert!(!patterns.is_platform_marker(text));
    }

    #[rstest]
    fn companion_marker_tolerates_whitespace(patterns: SectionPatterns) {
        assert!(patterns.has_companion_marker("Red Hat Full\n   Package (x86_64)"));
        assert!(!patterns.has_companion_marker("Red Hat Web Package"));
    }

    #[rstest]
    fn captures_version_from_artefact_link(patterns: SectionPatterns) {
        let value = "//downloads.citrix.com/22629/ICAClient-rhel-23.11.0.1-1.x86_64.rpm?__gda__=exp=1";
        assert!(patterns.is_artefact_link(value));
        assert_eq!(patterns.capture_version(value), Some("23.11.0.1-1"));
    }

    #[rstest]
    fn version_requires_architecture(patterns: SectionPatterns) {
        let value = "ICAClient-rhel-23.11.0.1-1.aarch64.rpm";
        assert!(patterns.is_artefact_link(value));
        assert_eq!(patterns.capture_version(value), None);
    }

    #[rstest]
    #[case::hyphen("SHA-256 - ")]
    #[case::colon("SHA-256:")]
    #[case::lowercase_label("sha-256 : ")]
    #[case::newline("SHA-256 -\n\t")]
    #[case::no_separator("SHA-256 ")]
    fn finds_labelled_checksum(patterns: SectionPatterns, #[case] label: &str) {
        let hex = "ABCDEF0123456789".repeat(4);
        let text = format!("Full Package {label}{hex} Download");
        let digest = patterns.find_checksum(&text).expect("checksum present");
        assert_eq!(digest.as_str(), hex.to_ascii_lowercase());
    }

    #[rstest]
    #[case::suffix_before_prefix("//dl.test/x.rpm/ICAClient-rhel-23.11.0.1-1.x86_64")]
    #[case::no_suffix("//dl.test/ICAClient-rhel-23.11.0.1-1.x86_64.deb")]
    #[case::no_prefix("//dl.test/icaclient-23.11.0.1-1.x86_64.rpm")]
    fn artefact_link_needs_prefix_then_extension(patterns: SectionPatterns, #[case] value: &str) {
        assert!(!patterns.is_artefact_link(value));
    }

    #[rstest]
    #[case::short(63)]
    #[case::long(65)]
    fn rejects_checksum_of_wrong_length(patterns: SectionPatterns, #[case] len: usize) {
        let text = format!("SHA-256 - {} ", "a".repeat(len));
        assert!(patterns.find_checksum(&text).is_none());
    }

    #[rstest]
    fn skips_malformed_checksum_for_later_one(patterns: SectionPatterns) {
        let text = format!("SHA-256: {} SHA-256: {}", "a".repeat(65), "b".repeat(64));
        let digest = patterns.find_checksum(&text).expect("second checksum");
        assert_eq!(digest.as_str(), "b".repeat(64));
    }

    #[rstest]
    fn invalid_marker_reports_field() {
        let profile = PlatformProfile {
            platform_marker: "Red(Hat".to_owned(),
            ..PlatformProfile::red_hat()
        };
        let err = SectionPatterns::compile(&profile).expect_err("unbalanced group");
        assert_eq!(err.field(), "platform_marker");
    }
}
