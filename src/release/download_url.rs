//! Download URL newtype and link normalisation.
//!
//! Vendor pages publish artefact links as absolute, protocol-relative, or
//! host-relative values. [`normalise_link`] turns each form into an absolute
//! URL without touching the query string, which carries the access token the
//! download needs. [`DownloadUrl`] only admits `https://` results.

use super::error::{ReleaseError, Result};
use std::fmt;

/// Scheme prefix every accepted download URL must start with.
pub const SECURE_PREFIX: &str = "https://";

/// A validated absolute `https://` download URL.
///
/// # Examples
///
/// ```
/// use ica_detect::release::DownloadUrl;
///
/// let url = DownloadUrl::from_link("//downloads.example.com/a.rpm?t=1", "https://downloads.example.com")
///     .unwrap();
/// assert_eq!(url.as_str(), "https://downloads.example.com/a.rpm?t=1");
/// assert!(DownloadUrl::try_from("http://downloads.example.com/a.rpm").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadUrl(String);

impl DownloadUrl {
    /// Normalise a raw link value against `origin` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InsecureUrl`] when the normalised URL does not
    /// use the `https` scheme.
    pub fn from_link(raw: &str, origin: &str) -> Result<Self> {
        Self::try_from(normalise_link(raw, origin))
    }

    /// Return the URL as a string slice.
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

impl TryFrom<&str> for DownloadUrl {
    type Error = ReleaseError;

    fn try_from(value: &str) -> Result<Self> {
        validate_secure(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for DownloadUrl {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        validate_secure(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for DownloadUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DownloadUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turn a link attribute value into an absolute URL.
///
/// - values with an explicit scheme are returned unchanged;
/// - protocol-relative values (`//host/...`) gain `https:`;
/// - root-relative values (`/path`) are joined onto `origin`;
/// - anything else is treated as `host/path` and gains `https://`.
///
/// Only surrounding whitespace is removed; the query string is preserved
/// byte-for-byte.
///
/// # Examples
///
/// ```
/// use ica_detect::release::normalise_link;
///
/// let origin = "https://downloads.example.com";
/// assert_eq!(normalise_link("https://a.test/x?q=1", origin), "https://a.test/x?q=1");
/// assert_eq!(normalise_link("//a.test/x?q=1", origin), "https://a.test/x?q=1");
/// assert_eq!(normalise_link("/x?q=1", origin), "https://downloads.example.com/x?q=1");
/// assert_eq!(normalise_link("a.test/x", origin), "https://a.test/x");
/// ```
#[must_use]
pub fn normalise_link(raw: &str, origin: &str) -> String {
    let value = raw.trim();
    if has_scheme(value) {
        value.to_owned()
    } else if value.starts_with("//") {
        format!("https:{value}")
    } else if value.starts_with('/') {
        format!("{}{value}", origin.trim_end_matches('/'))
    } else {
        format!("{SECURE_PREFIX}{value}")
    }
}

/// Return true when `value` starts with `scheme://`.
fn has_scheme(value: &str) -> bool {
    value.split_once("://").is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn validate_secure(value: &str) -> Result<()> {
    if value.starts_with(SECURE_PREFIX) && value.len() > SECURE_PREFIX.len() {
        Ok(())
    } else {
        Err(ReleaseError::InsecureUrl {
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn origin() -> &'static str {
        "https://downloads.citrix.com"
    }

    #[rstest]
    fn secure_absolute_url_is_unchanged(origin: &str) {
        let url = "https://downloads.citrix.com/22/ICAClient-rhel-23.11.0.1-1.x86_64.rpm?__gda__=exp=1~acl=*~hmac=ab12";
        assert_eq!(normalise_link(url, origin), url);
        assert_eq!(normalise_link(&normalise_link(url, origin), origin), url);
    }

    #[rstest]
    fn protocol_relative_gains_exactly_the_scheme(origin: &str) {
        let url = "//downloads.citrix.com/a.rpm?b=2&a=1";
        assert_eq!(
            normalise_link(url, origin),
            "https://downloads.citrix.com/a.rpm?b=2&a=1"
        );
    }

    #[rstest]
    fn root_relative_joins_origin(origin: &str) {
        assert_eq!(
            normalise_link("/22/a.rpm?t=x", origin),
            "https://downloads.citrix.com/22/a.rpm?t=x"
        );
        assert_eq!(
            normalise_link("/22/a.rpm", "https://downloads.citrix.com/"),
            "https://downloads.citrix.com/22/a.rpm"
        );
    }

    #[rstest]
    fn bare_host_path_gains_secure_prefix(origin: &str) {
        assert_eq!(
            normalise_link("downloads.citrix.com:443/a.rpm?x=1", origin),
            "https://downloads.citrix.com:443/a.rpm?x=1"
        );
    }

    #[rstest]
    fn query_parameters_survive_verbatim(origin: &str) {
        let query = "?z=9&a=%2F1&__gda__=exp%3D1~hmac%3Dff&a=2";
        let url = format!("//host.test/file.rpm{query}");
        let normalised = normalise_link(&url, origin);
        assert!(normalised.ends_with(query));
    }

    #[rstest]
    #[case::plain_http("http://downloads.citrix.com/a.rpm")]
    #[case::ftp("ftp://downloads.citrix.com/a.rpm")]
    #[case::uppercase_scheme("HTTPS://downloads.citrix.com/a.rpm")]
    fn insecure_links_are_rejected(origin: &str, #[case] raw: &str) {
        let err = DownloadUrl::from_link(raw, origin).expect_err("insecure link");
        assert!(matches!(err, ReleaseError::InsecureUrl { .. }));
    }

    #[rstest]
    fn insecure_origin_rejects_root_relative_links() {
        let result = DownloadUrl::from_link("/a.rpm", "http://downloads.citrix.com");
        assert!(result.is_err());
    }

    #[test]
    fn bare_scheme_is_not_a_url() {
        assert!(DownloadUrl::try_from(SECURE_PREFIX).is_err());
    }
}
