//! Platform profile describing which release block to extract.
//!
//! Vendor pages list several platform variants side by side. A
//! `PlatformProfile` captures the markers that single out one of them: the
//! platform name, the companion phrase, the artefact filename layout, and the
//! checksum label. Every field deserialises from TOML and falls back to the
//! Red Hat RPM defaults when omitted, so a configuration file only needs to
//! name what differs.

use serde::Deserialize;

/// Markers and patterns identifying one platform's release block.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformProfile {
    /// Human-readable platform name used in diagnostics.
    pub name: String,
    /// Case-insensitive regex matched against individual text nodes.
    pub platform_marker: String,
    /// Case-insensitive regex that must appear in the marker's parent text.
    pub companion_marker: String,
    /// Literal filename prefix of the artefact, up to the version.
    pub artefact_prefix: String,
    /// Literal architecture component following the version.
    pub artefact_arch: String,
    /// Literal package suffix, including the leading dot.
    pub artefact_extension: String,
    /// Case-insensitive regex for the label preceding the checksum.
    pub checksum_label: String,
    /// Anchor attribute holding the artefact URL.
    pub link_attribute: String,
    /// Secure origin prepended to root-relative links.
    pub download_origin: String,
    /// Number of containers tested while ascending from the marker.
    pub max_ascent: usize,
}

impl PlatformProfile {
    /// The Red Hat RPM profile for the Citrix Workspace app.
    ///
    /// # Examples
    ///
    /// ```
    /// use ica_detect::PlatformProfile;
    ///
    /// let profile = PlatformProfile::red_hat();
    /// assert_eq!(profile.artefact_prefix, "ICAClient-rhel-");
    /// assert_eq!(profile.max_ascent, 5);
    /// ```
    #[must_use]
    pub fn red_hat() -> Self {
        Self {
            name: "Red Hat RPM".to_owned(),
            platform_marker: r"Red\s*-?\s*Hat".to_owned(),
            companion_marker: r"Full\s+Package".to_owned(),
            artefact_prefix: "ICAClient-rhel-".to_owned(),
            artefact_arch: "x86_64".to_owned(),
            artefact_extension: ".rpm".to_owned(),
            checksum_label: "SHA-256".to_owned(),
            link_attribute: "rel".to_owned(),
            download_origin: "https://downloads.citrix.com".to_owned(),
            max_ascent: Self::default_max_ascent(),
        }
    }

    const fn default_max_ascent() -> usize {
        5
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::red_hat()
    }
}
