//! Suite configuration
//!
//! Loaded from an optional YAML file, then overridden by `RESTCHECK_*`
//! environment variables. Every field has a default, so an absent file and
//! an empty environment yield a runnable configuration.

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;

use restcheck_domain::{ServiceConventions, ServiceEndpoint};
use serde::{Deserialize, Serialize};

use crate::adapters::{DEFAULT_USER_AGENT, TransportOptions};

/// Default base URL of the service under test.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: serde_yaml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("{name} {reason}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
}

/// Environment variables that override file values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigEnv {
    /// Path of the YAML config file.
    ConfigPath,
    /// Base URL of the service.
    BaseUrl,
    /// Transport timeout in milliseconds.
    TimeoutMs,
    /// Evidence directory.
    ReportDir,
    /// Failure log file.
    FailureLog,
}

impl ConfigEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "RESTCHECK_CONFIG",
            Self::BaseUrl => "RESTCHECK_BASE_URL",
            Self::TimeoutMs => "RESTCHECK_TIMEOUT_MS",
            Self::ReportDir => "RESTCHECK_REPORT_DIR",
            Self::FailureLog => "RESTCHECK_FAILURE_LOG",
        }
    }
}

/// Settings of one suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Base URL every resource path is resolved against.
    pub base_url: String,
    /// Transport timeout in milliseconds. Absent means no timeout; zero is
    /// rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<NonZeroU64>,
    /// Directory for evidence files.
    pub report_dir: PathBuf,
    /// File receiving one line per failed scenario.
    pub failure_log: PathBuf,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Success status per operation.
    pub conventions: ServiceConventions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
            report_dir: PathBuf::from("reports"),
            failure_log: PathBuf::from("test-failures.txt"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            conventions: ServiceConventions::default(),
        }
    }
}

impl SuiteConfig {
    /// Loads the configuration the binary runs with.
    ///
    /// `path` wins over `RESTCHECK_CONFIG`; without either, defaults are
    /// used. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, read_env_strict)
    }

    /// Same as `load`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See `load`.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigError>,
    {
        let config_path = ConfigEnv::ConfigPath.as_str();
        let env_path = nonempty(config_path, lookup(config_path)?)?.map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.endpoint()?;
        Ok(config)
    }

    /// Reads a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses YAML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Applies `RESTCHECK_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable is empty or, for the timeout,
    /// not a positive integer.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigError>,
    {
        let read = |env: ConfigEnv| nonempty(env.as_str(), lookup(env.as_str())?);

        if let Some(base_url) = read(ConfigEnv::BaseUrl)? {
            self.base_url = base_url;
        }
        if let Some(raw) = read(ConfigEnv::TimeoutMs)? {
            self.timeout_ms = Some(parse_timeout_ms(ConfigEnv::TimeoutMs.as_str(), &raw)?);
        }
        if let Some(dir) = read(ConfigEnv::ReportDir)? {
            self.report_dir = PathBuf::from(dir);
        }
        if let Some(log) = read(ConfigEnv::FailureLog)? {
            self.failure_log = PathBuf::from(log);
        }
        Ok(())
    }

    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not an absolute http(s) URL.
    pub fn endpoint(&self) -> Result<ServiceEndpoint, ConfigError> {
        ServiceEndpoint::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))
    }

    /// Transport options for the HTTP adapter.
    #[must_use]
    pub fn transport(&self) -> TransportOptions {
        TransportOptions {
            timeout: self.timeout_ms.map(|ms| Duration::from_millis(ms.get())),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &'static str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidEnv {
            name,
            reason: "must be valid UTF-8".to_string(),
        })
    })
}

fn nonempty(name: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnv {
            name,
            reason: "must not be empty".to_string(),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_timeout_ms(name: &'static str, raw: &str) -> Result<NonZeroU64, ConfigError> {
    raw.trim()
        .parse::<NonZeroU64>()
        .map_err(|_| ConfigError::InvalidEnv {
            name,
            reason: "must be a positive integer number of milliseconds".to_string(),
        })
}
