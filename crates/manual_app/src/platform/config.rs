//! Application configuration, read from an optional RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context as _};
use manual_core::Timings;
use manual_engine::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use manual_logging::{LogDestination, LogLevel, LogSettings};
use serde::Deserialize;

use super::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "web2manual.ron";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub timings: TimingsConfig,
    pub output_dir: PathBuf,
    pub log: LogSettings,
    /// File the values were read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            timings: TimingsConfig::default(),
            output_dir: PathBuf::from("output"),
            log: LogSettings::default(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
    pub thinking_budget: u32,
    pub search_grounding: bool,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let defaults = ClientSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            thinking_budget: defaults.thinking_budget,
            search_grounding: defaults.search_grounding,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            max_response_bytes: defaults.max_response_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    pub analyzing_after_ms: u64,
    pub structuring_after_ms: u64,
    pub export_delay_ms: u64,
    pub downloaded_flash_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        let defaults = Timings::default();
        Self {
            analyzing_after_ms: defaults.analyzing_after.as_millis() as u64,
            structuring_after_ms: defaults.structuring_after.as_millis() as u64,
            export_delay_ms: defaults.export_delay.as_millis() as u64,
            downloaded_flash_ms: defaults.downloaded_flash.as_millis() as u64,
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `web2manual.ron` from the working directory when no
    /// path is given. Only an explicitly named file is required to exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read config {}", path.display()));
            }
        };

        let mut config = Self::parse(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        config.source = Some(path);
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.timings.structuring_after_ms <= self.timings.analyzing_after_ms {
            bail!(
                "timings.structuring_after_ms ({}) must be greater than timings.analyzing_after_ms ({})",
                self.timings.structuring_after_ms,
                self.timings.analyzing_after_ms
            );
        }
        if self.api.model.trim().is_empty() {
            bail!("api.model must not be empty");
        }
        Ok(())
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(out) = &cli.out {
            self.output_dir = out.clone();
        }
        if let Some(model) = &cli.model {
            self.api.model = model.clone();
        }
        if cli.verbose {
            self.log.destination = LogDestination::Both;
            self.log.level = LogLevel::Debug;
        }
        self
    }

    pub fn core_timings(&self) -> Timings {
        Timings {
            analyzing_after: Duration::from_millis(self.timings.analyzing_after_ms),
            structuring_after: Duration::from_millis(self.timings.structuring_after_ms),
            export_delay: Duration::from_millis(self.timings.export_delay_ms),
            downloaded_flash: Duration::from_millis(self.timings.downloaded_flash_ms),
        }
    }

    pub fn client_settings(&self, api_key: Option<String>) -> ClientSettings {
        ClientSettings {
            base_url: self.api.base_url.clone(),
            model: self.api.model.clone(),
            api_key,
            thinking_budget: self.api.thinking_budget,
            search_grounding: self.api.search_grounding,
            connect_timeout: Duration::from_millis(self.api.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.api.request_timeout_ms),
            max_response_bytes: self.api.max_response_bytes,
        }
    }
}

/// Service credential from the environment, first match wins.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
