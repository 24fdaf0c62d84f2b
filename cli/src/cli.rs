//! CLI argument definitions for the `ica-detect` binary.
//!
//! Parsing lives here so the entrypoint stays focused on orchestration.

use crate::config::DetectorConfig;
use crate::output::OutputFormat;
use camino::Utf8PathBuf;
use clap::Parser;

/// Detect the latest Citrix ICA Client Red Hat RPM release.
#[derive(Parser, Debug, Default)]
#[command(name = "ica-detect")]
#[command(version, about)]
#[command(long_about = concat!(
    "Detect the latest Citrix ICA Client Red Hat RPM release.\n\n",
    "Fetches the Citrix Workspace app for Linux download page, locates the Red Hat ",
    "full package block, and prints its version, SHA-256 checksum, and download URL.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Print the release summary:\n",
    "    $ ica-detect\n\n",
    "  Export variables for a packaging script:\n",
    "    $ eval \"$(ica-detect --shell)\"\n\n",
    "  Inspect a saved page offline:\n",
    "    $ ica-detect --input page.html --json",
))]
pub struct Cli {
    /// Print a JSON object with `ICA_CLIENT_*` keys.
    #[arg(long, conflicts_with = "shell")]
    pub json: bool,

    /// Print shell `export` statements.
    #[arg(long, conflicts_with = "json")]
    pub shell: bool,

    /// Configuration file [default: per-user config.toml when present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Override the download page URL.
    #[arg(long, value_name = "URL", conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the page from a local HTML file instead of fetching it.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<Utf8PathBuf>,

    /// Request timeout in seconds (1-600) [default: 60].
    #[arg(
        short,
        long,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub timeout: Option<u64>,

    /// Succeed even when no checksum is published.
    #[arg(long)]
    pub allow_missing_checksum: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// The output format selected by `--json` or `--shell`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use ica_detect_cli::cli::Cli;
    /// use ica_detect_cli::output::OutputFormat;
    ///
    /// let cli = Cli::parse_from(["ica-detect", "--shell"]);
    /// assert_eq!(cli.output_format(), OutputFormat::Shell);
    /// ```
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.shell {
            OutputFormat::Shell
        } else {
            OutputFormat::Human
        }
    }

    /// The log level implied by `-q` and `-v`.
    #[must_use]
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Apply command-line overrides on top of file configuration.
    #[must_use]
    pub fn apply_overrides(&self, mut config: DetectorConfig) -> DetectorConfig {
        if let Some(url) = &self.url {
            config.page_url.clone_from(url);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.allow_missing_checksum {
            config.require_checksum = false;
        }
        config
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
