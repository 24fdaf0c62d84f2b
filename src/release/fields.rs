//! Extraction results and the policy that turns them into a release.
//!
//! [`ExtractedFields`] records whatever the extractor managed to find, field
//! by field. [`ExtractedFields::into_release`] is the single place where
//! partial results become a hard failure.

use super::{DownloadUrl, ReleaseVersion, Sha256Digest};
use std::fmt;
use thiserror::Error;

/// One of the three release metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The package version.
    Version,
    /// The SHA-256 checksum.
    Checksum,
    /// The download URL.
    DownloadUrl,
}

impl Field {
    /// Lower-case label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Checksum => "sha256",
            Self::DownloadUrl => "download_url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a missing checksum fails the release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// A release without a checksum is incomplete.
    #[default]
    Required,
    /// A release may be reported without a checksum.
    Optional,
}

impl ChecksumPolicy {
    /// Build the policy from a `require_checksum` flag.
    #[must_use]
    pub const fn from_required(required: bool) -> Self {
        if required {
            Self::Required
        } else {
            Self::Optional
        }
    }
}

/// Fields recovered from one section, each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// The package version, when a conforming artefact link was found.
    pub version: Option<ReleaseVersion>,
    /// The lowercase SHA-256 checksum, when a labelled digest was found.
    pub checksum: Option<Sha256Digest>,
    /// The secure download URL, when an artefact link normalised to `https`.
    pub download_url: Option<DownloadUrl>,
}

impl ExtractedFields {
    /// Return true when all three fields are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.version.is_some() && self.checksum.is_some() && self.download_url.is_some()
    }

    /// List the absent fields in output order.
    #[must_use]
    pub fn missing(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.version.is_none() {
            missing.push(Field::Version);
        }
        if self.checksum.is_none() {
            missing.push(Field::Checksum);
        }
        if self.download_url.is_none() {
            missing.push(Field::DownloadUrl);
        }
        missing
    }

    /// Turn the fields into a release under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`IncompleteRelease`] when the version or URL is absent, or when
    /// the checksum is absent and `policy` is [`ChecksumPolicy::Required`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ica_detect::release::{ChecksumPolicy, ExtractedFields, Field};
    ///
    /// let err = ExtractedFields::default()
    ///     .into_release(ChecksumPolicy::Required)
    ///     .unwrap_err();
    /// assert_eq!(err.missing(), vec![Field::Version, Field::Checksum, Field::DownloadUrl]);
    /// ```
    pub fn into_release(self, policy: ChecksumPolicy) -> Result<ReleaseInfo, IncompleteRelease> {
        let checksum_ok = self.checksum.is_some() || policy == ChecksumPolicy::Optional;
        match self {
            Self {
                version: Some(version),
                checksum,
                download_url: Some(download_url),
            } if checksum_ok => Ok(ReleaseInfo {
                version,
                checksum,
                download_url,
            }),
            fields => Err(IncompleteRelease { fields, policy }),
        }
    }
}

/// A complete release record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// The package version.
    pub version: ReleaseVersion,
    /// The checksum; absent only under [`ChecksumPolicy::Optional`].
    pub checksum: Option<Sha256Digest>,
    /// The secure download URL, query parameters intact.
    pub download_url: DownloadUrl,
}

/// Extraction finished without every required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("release metadata incomplete; missing: {}", describe_missing(.fields, .policy))]
pub struct IncompleteRelease {
    fields: ExtractedFields,
    policy: ChecksumPolicy,
}

impl IncompleteRelease {
    /// The partial fields that were recovered.
    #[must_use]
    pub const fn fields(&self) -> &ExtractedFields {
        &self.fields
    }

    /// Every absent field, required or not.
    #[must_use]
    pub fn missing(&self) -> Vec<Field> {
        self.fields.missing()
    }

    /// The absent fields that caused the failure under the active policy.
    #[must_use]
    pub fn required_missing(&self) -> Vec<Field> {
        required_missing(&self.fields, self.policy)
    }
}

fn required_missing(fields: &ExtractedFields, policy: ChecksumPolicy) -> Vec<Field> {
    fields
        .missing()
        .into_iter()
        .filter(|field| *field != Field::Checksum || policy == ChecksumPolicy::Required)
        .collect()
}

fn describe_missing(fields: &ExtractedFields, policy: &ChecksumPolicy) -> String {
    required_missing(fields, *policy)
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn complete() -> ExtractedFields {
        ExtractedFields {
            version: ReleaseVersion::try_from("23.11.0.1-1").ok(),
            checksum: Sha256Digest::try_from("0".repeat(64)).ok(),
            download_url: DownloadUrl::try_from("https://a.test/x.rpm?t=1").ok(),
        }
    }

    #[rstest]
    fn complete_fields_become_a_release(complete: ExtractedFields) {
        assert!(complete.is_complete());
        let release = complete
            .into_release(ChecksumPolicy::Required)
            .expect("complete release");
        assert_eq!(release.version.as_str(), "23.11.0.1-1");
        assert!(release.checksum.is_some());
    }

    #[rstest]
    fn missing_checksum_fails_when_required(mut complete: ExtractedFields) {
        complete.checksum = None;
        let err = complete
            .into_release(ChecksumPolicy::Required)
            .expect_err("checksum required");
        assert_eq!(err.required_missing(), vec![Field::Checksum]);
        assert_eq!(
            err.to_string(),
            "release metadata incomplete; missing: sha256"
        );
    }

    #[rstest]
    fn missing_checksum_is_tolerated_when_optional(mut complete: ExtractedFields) {
        complete.checksum = None;
        let release = complete
            .into_release(ChecksumPolicy::Optional)
            .expect("checksum optional");
        assert!(release.checksum.is_none());
    }

    #[rstest]
    fn optional_policy_still_requires_version_and_url(mut complete: ExtractedFields) {
        complete.checksum = None;
        complete.download_url = None;
        let err = complete
            .into_release(ChecksumPolicy::Optional)
            .expect_err("url required");
        assert_eq!(err.required_missing(), vec![Field::DownloadUrl]);
        assert_eq!(err.missing(), vec![Field::Checksum, Field::DownloadUrl]);
    }

    #[rstest]
    #[case::required(true, ChecksumPolicy::Required)]
    #[case::optional(false, ChecksumPolicy::Optional)]
    fn policy_follows_flag(#[case] flag: bool, #[case] expected: ChecksumPolicy) {
        assert_eq!(ChecksumPolicy::from_required(flag), expected);
    }
}
