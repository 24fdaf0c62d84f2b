//! Release version newtype.
//!
//! ICA Client packages carry a four-part dotted version followed by a hyphen
//! and a build number, for example `23.11.0.1-1`.

use super::error::{ReleaseError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static VERSION_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+-[0-9]+$").unwrap_or_else(|err| {
        panic!("version pattern is a compile-time constant: {err}")
    })
});

/// A validated `N.N.N.N-N` package version.
///
/// # Examples
///
/// ```
/// use ica_detect::release::ReleaseVersion;
///
/// let version = ReleaseVersion::try_from("23.11.0.1-1").unwrap();
/// assert_eq!(version.as_str(), "23.11.0.1-1");
/// assert!(ReleaseVersion::try_from("23.11.0-1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for ReleaseVersion {
    type Error = ReleaseError;

    fn try_from(value: &str) -> Result<Self> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_version(value: &str) -> Result<()> {
    if VERSION_SHAPE.is_match(value) {
        Ok(())
    } else {
        Err(ReleaseError::InvalidVersion {
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("23.11.0.1-1")]
    #[case("24.2.0.65-1")]
    #[case("0.0.0.0-0")]
    fn accepts_four_part_version_with_build(#[case] value: &str) {
        let version = ReleaseVersion::try_from(value).expect("valid version");
        assert_eq!(version.as_str(), value);
    }

    #[rstest]
    #[case::three_parts("23.11.0-1")]
    #[case::no_build("23.11.0.1")]
    #[case::five_parts("23.11.0.1.2-1")]
    #[case::letters("23.11.0.a-1")]
    #[case::trailing_text("23.11.0.1-1.x86_64")]
    #[case::empty("")]
    fn rejects_malformed_versions(#[case] value: &str) {
        let err = ReleaseVersion::try_from(value).expect_err("malformed version");
        assert_eq!(
            err,
            ReleaseError::InvalidVersion {
                value: value.to_owned()
            }
        );
    }
}
