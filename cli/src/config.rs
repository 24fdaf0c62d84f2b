//! Detector configuration loaded from TOML.
//!
//! Every field is optional in the file; omitted values fall back to the
//! built-in defaults. Command-line flags are applied on top by the caller.

use camino::{Utf8Path, Utf8PathBuf};
use ica_detect::PlatformProfile;
use ica_detect::release::ChecksumPolicy;
use log::debug;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

/// The vendor page listing the latest Linux builds.
pub const DEFAULT_PAGE_URL: &str =
    "https://www.citrix.com/downloads/workspace-app/linux/workspace-app-for-linux-latest.html";

/// Browser identity sent with the page request.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
);

/// Accepted range for the fetch timeout, in seconds.
pub const TIMEOUT_RANGE_SECS: RangeInclusive<u64> = 1..=600;

/// Directory and file name of the per-user configuration.
const CONFIG_DIR_NAME: &str = "ica-detect";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}")]
    Read {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid configuration file {path}")]
    Parse {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The configured timeout lies outside the accepted range.
    #[error("timeout_secs must be between 1 and 600, got {value}")]
    TimeoutOutOfRange {
        /// The rejected value.
        value: u64,
    },
}

/// Settings for one detection run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Page to fetch.
    pub page_url: String,
    /// `User-Agent` header sent with the request.
    pub user_agent: String,
    /// Global request timeout in seconds.
    #[serde(default = "DetectorConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether a missing checksum fails the run.
    #[serde(default = "DetectorConfig::default_require_checksum")]
    pub require_checksum: bool,
    /// Markers identifying the release block.
    pub platform: PlatformProfile,
}

impl DetectorConfig {
    const fn default_timeout_secs() -> u64 {
        60
    }

    const fn default_require_checksum() -> bool {
        true
    }

    /// Resolve configuration from an explicit path or the per-user file.
    ///
    /// An explicit path must exist. The per-user file is optional; when it is
    /// absent the built-in defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a file cannot be read, does not parse, or
    /// holds an out-of-range timeout.
    pub fn resolve(explicit: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        Self::resolve_with(explicit, default_config_path())
    }

    /// Resolve configuration with the per-user path supplied by the caller.
    ///
    /// # Errors
    ///
    /// See [`DetectorConfig::resolve`].
    pub fn resolve_with(
        explicit: Option<&Utf8Path>,
        user_path: Option<Utf8PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match user_path {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                debug!("no configuration file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, does not parse,
    /// or holds an out-of-range timeout.
    pub fn load_from(path: &Utf8Path) -> Result<Self, ConfigError> {
        debug!("loading configuration from {path}");
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = toml::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()
    }

    /// Check that values the schema cannot constrain are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeoutOutOfRange`] for a timeout outside
    /// 1 to 600 seconds.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if TIMEOUT_RANGE_SECS.contains(&self.timeout_secs) {
            Ok(self)
        } else {
            Err(ConfigError::TimeoutOutOfRange {
                value: self.timeout_secs,
            })
        }
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The checksum policy implied by `require_checksum`.
    #[must_use]
    pub const fn checksum_policy(&self) -> ChecksumPolicy {
        ChecksumPolicy::from_required(self.require_checksum)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: Self::default_timeout_secs(),
            require_checksum: Self::default_require_checksum(),
            platform: PlatformProfile::default(),
        }
    }
}

/// The per-user configuration path, `<config_dir>/ica-detect/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = directories_next::BaseDirs::new()?;
    let path = dirs
        .config_dir()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    Utf8PathBuf::from_path_buf(path).ok()
}
