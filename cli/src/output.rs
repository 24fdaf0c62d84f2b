//! Output formatting for a detected release.
//!
//! Three renderings are offered: a human-readable summary, a JSON object for
//! scripting, and shell `export` statements for `eval` in packaging scripts.
//! All three share the `ICA_CLIENT_*` variable names where keys are visible.

use ica_detect::release::ReleaseInfo;
use serde::Serialize;

/// Placeholder for a field absent from a release or a partial extraction.
pub const NOT_AVAILABLE: &str = "N/A";

/// How a release is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Version:`, `SHA256:` and `URL:` lines.
    #[default]
    Human,
    /// A pretty-printed JSON object.
    Json,
    /// `export NAME="value"` statements.
    Shell,
}

/// Render `release` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(release: &ReleaseInfo, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(format_human(release)),
        OutputFormat::Json => format_json(release),
        OutputFormat::Shell => Ok(ShellExports::new(release).display_text()),
    }
}

/// Format a release for human-readable output.
///
/// # Examples
///
/// ```
/// use ica_detect::release::{DownloadUrl, ReleaseInfo, ReleaseVersion};
/// use ica_detect_cli::output::format_human;
///
/// let release = ReleaseInfo {
///     version: ReleaseVersion::try_from("23.11.0.1-1").unwrap(),
///     checksum: None,
///     download_url: DownloadUrl::try_from("https://dl.test/a.rpm").unwrap(),
/// };
/// let output = format_human(&release);
/// assert!(output.contains("Version: 23.11.0.1-1"));
/// assert!(output.contains("SHA256: N/A"));
/// ```
#[must_use]
pub fn format_human(release: &ReleaseInfo) -> String {
    format!(
        "Version: {}\nSHA256: {}\nURL: {}",
        release.version,
        release
            .checksum
            .as_ref()
            .map_or(NOT_AVAILABLE, |digest| digest.as_str()),
        release.download_url
    )
}

/// JSON representation of a release.
#[derive(Debug, Serialize)]
struct JsonRelease<'a> {
    #[serde(rename = "ICA_CLIENT_VERSION")]
    version: &'a str,
    #[serde(rename = "ICA_CLIENT_SHASUM")]
    shasum: Option<&'a str>,
    #[serde(rename = "ICA_CLIENT_DOWNLOAD_URL")]
    download_url: &'a str,
}

/// Format a release as pretty-printed JSON.
///
/// An absent checksum is written as `null`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_json(release: &ReleaseInfo) -> Result<String, serde_json::Error> {
    let json = JsonRelease {
        version: release.version.as_str(),
        shasum: release.checksum.as_ref().map(|digest| digest.as_str()),
        download_url: release.download_url.as_str(),
    };
    serde_json::to_string_pretty(&json)
}

/// Shell `export` statements for a release.
#[derive(Debug, Clone)]
pub struct ShellExports {
    /// Export line for the version.
    pub version: String,
    /// Export line for the checksum; empty value when absent.
    pub shasum: String,
    /// Export line for the download URL.
    pub download_url: String,
}

impl ShellExports {
    /// Build the export lines for `release`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ica_detect::release::{DownloadUrl, ReleaseInfo, ReleaseVersion};
    /// use ica_detect_cli::output::ShellExports;
    ///
    /// let release = ReleaseInfo {
    ///     version: ReleaseVersion::try_from("23.11.0.1-1").unwrap(),
    ///     checksum: None,
    ///     download_url: DownloadUrl::try_from("https://dl.test/a.rpm").unwrap(),
    /// };
    /// let exports = ShellExports::new(&release);
    /// assert_eq!(exports.version, "export ICA_CLIENT_VERSION=\"23.11.0.1-1\"");
    /// assert_eq!(exports.shasum, "export ICA_CLIENT_SHASUM=\"\"");
    /// ```
    #[must_use]
    pub fn new(release: &ReleaseInfo) -> Self {
        let shasum = release
            .checksum
            .as_ref()
            .map_or("", |digest| digest.as_str());
        Self {
            version: export_line("ICA_CLIENT_VERSION", release.version.as_str()),
            shasum: export_line("ICA_CLIENT_SHASUM", shasum),
            download_url: export_line("ICA_CLIENT_DOWNLOAD_URL", release.download_url.as_str()),
        }
    }

    /// The three export lines joined by newlines.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{}\n{}\n{}", self.version, self.shasum, self.download_url)
    }
}

fn export_line(name: &str, value: &str) -> String {
    format!("export {name}=\"{}\"", shell_escape(value))
}

/// Escape characters that keep their meaning inside double quotes.
fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use ica_detect::release::{DownloadUrl, ReleaseVersion, Sha256Digest};
    use rstest::{fixture, rstest};

    const URL: &str = "https://downloads.citrix.com/22629/ICAClient-rhel-23.11.0.1-1.x86_64.rpm?__gda__=exp=1~hmac=0a&token=abc";

    #[fixture]
    fn release() -> ReleaseInfo {
        ReleaseInfo {
            version: ReleaseVersion::try_from("23.11.0.1-1").expect("version"),
            checksum: Some(Sha256Digest::try_from("ab".repeat(32)).expect("digest")),
            download_url: DownloadUrl::try_from(URL).expect("url"),
        }
    }

    #[rstest]
    fn human_output_lists_three_lines(release: ReleaseInfo) {
        let output = format_human(&release);
        assert_eq!(
            output,
            format!("Version: 23.11.0.1-1\nSHA256: {}\nURL: {URL}", "ab".repeat(32))
        );
    }

    #[rstest]
    fn json_output_uses_client_variable_names(release: ReleaseInfo) {
        let output = format_json(&release).expect("json");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(value["ICA_CLIENT_VERSION"], "23.11.0.1-1");
        assert_eq!(value["ICA_CLIENT_SHASUM"], "ab".repeat(32));
        assert_eq!(value["ICA_CLIENT_DOWNLOAD_URL"], URL);
    }

    #[rstest]
    fn json_output_writes_null_for_absent_checksum(mut release: ReleaseInfo) {
        release.checksum = None;
        let output = format_json(&release).expect("json");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert!(value["ICA_CLIENT_SHASUM"].is_null());
    }

    #[rstest]
    fn shell_output_exports_each_variable(release: ReleaseInfo) {
        let output = ShellExports::new(&release).display_text();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "export ICA_CLIENT_VERSION=\"23.11.0.1-1\"".to_owned(),
                format!("export ICA_CLIENT_SHASUM=\"{}\"", "ab".repeat(32)),
                format!("export ICA_CLIENT_DOWNLOAD_URL=\"{URL}\""),
            ]
        );
    }

    #[rstest]
    #[case::plain("abc", "abc")]
    #[case::dollar("a$b", "a\\$b")]
    #[case::quote("a\"b", "a\\\"b")]
    #[case::backtick("a`b", "a\\`b")]
    #[case::backslash("a\\b", "a\\\\b")]
    fn shell_escape_protects_double_quoted_values(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(shell_escape(input), expected);
    }

    #[rstest]
    #[case::human(OutputFormat::Human, "Version: ")]
    #[case::json(OutputFormat::Json, "{")]
    #[case::shell(OutputFormat::Shell, "export ")]
    fn render_dispatches_on_format(
        release: ReleaseInfo,
        #[case] format: OutputFormat,
        #[case] prefix: &str,
    ) {
        let output = render(&release, format).expect("render");
        assert!(output.starts_with(prefix), "unexpected output: {output}");
    }
}
