use crate::client::SuggestionBackend;
use crate::deck::DEFAULT_PAGE_SIZE;
use giftwise_backend::{HttpBackend, MockBackend, DEFAULT_MOCK_DELAY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "GIFTWISE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },
    #[error("Failed to read config file: {source}")]
    IoError { source: std::io::Error },
    #[error("Failed to parse TOML config: {source}")]
    TomlParseError { source: toml::de::Error },
    #[error("Invalid configuration value: {field} = {value}")]
    InvalidValue { field: String, value: String },
    #[error("Missing required configuration: {field}")]
    MissingField { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Mock,
    Http,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(BackendKind::Mock),
            "http" => Ok(BackendKind::Http),
            _ => Err(ConfigError::InvalidValue {
                field: "backend".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Mock => f.write_str("mock"),
            BackendKind::Http => f.write_str("http"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendKind,
    /// Suggestion endpoint, required for the `http` backend.
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub mock_delay_ms: u64,
    /// Cards shown per results page.
    pub page_size: usize,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Mock,
            endpoint: None,
            timeout_secs: None,
            mock_delay_ms: DEFAULT_MOCK_DELAY.as_millis() as u64,
            page_size: DEFAULT_PAGE_SIZE,
            log_path: None,
        }
    }
}

/// Where the file layer of a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => f.write_str("defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (explicit path or `GIFTWISE_CONFIG`), then
    /// `GIFTWISE_*` environment variables.
    ///
    /// Loading usually happens before a subscriber exists, so the source is
    /// returned for the caller to log instead of being logged here.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let env_path = std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty());
        let (mut config, source) = match path.map(Path::to_path_buf).or(env_path.map(PathBuf::from)) {
            Some(path) => (Self::from_file(&path)?, ConfigSource::File(path)),
            None => (Self::default(), ConfigSource::Defaults),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError { source })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::TomlParseError { source })
    }

    /// Overlays environment values; `lookup` stands in for `std::env::var`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = get("GIFTWISE_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(endpoint) = get("GIFTWISE_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(timeout) = get("GIFTWISE_TIMEOUT_SECS") {
            self.timeout_secs = Some(parse_number("timeout_secs", &timeout)?);
        }
        if let Some(size) = get("GIFTWISE_PAGE_SIZE") {
            self.page_size = parse_number("page_size", &size)?;
        }
        if let Some(path) = get("GIFTWISE_LOG_PATH") {
            self.log_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BackendKind::Http
            && self.endpoint.as_deref().map_or(true, |e| e.trim().is_empty())
        {
            return Err(ConfigError::MissingField {
                field: "endpoint".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the configured transport.
    pub fn build_backend(&self) -> Result<Box<dyn SuggestionBackend>, ConfigError> {
        self.validate()?;
        match self.backend {
            BackendKind::Mock => Ok(Box::new(MockBackend::new(Duration::from_millis(
                self.mock_delay_ms,
            )))),
            BackendKind::Http => {
                let endpoint = self.endpoint.clone().ok_or_else(|| ConfigError::MissingField {
                    field: "endpoint".to_string(),
                })?;
                let backend = HttpBackend::with_timeout(
                    endpoint.clone(),
                    self.timeout_secs.map(Duration::from_secs),
                )
                .map_err(|e| ConfigError::InvalidValue {
                    field: "endpoint".to_string(),
                    value: format!("{endpoint} ({e})"),
                })?;
                tracing::debug!(endpoint = backend.endpoint(), "using http backend");
                Ok(Box::new(backend))
            }
        }
    }
}

fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}
