use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ai::gemini::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ai::prompts::DEFAULT_PORTRAIT_STYLE;
use crate::core::profile::{SectionCatalog, SectionSpec};

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["CHARFORGE_API_KEY", "GEMINI_API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub tui: TuiConfig,
    pub export: ExportConfig,
    pub profile: ProfileConfig,
    pub data: DataConfig,
}

/// Generative AI access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// API key; environment variables override this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub portrait_style: String,
    /// Skip the portrait call entirely when false.
    pub portraits: bool,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory; defaults to `<data_dir>/exports`.
    pub out_dir: Option<PathBuf>,
    /// Also write the JSON bundle next to the HTML document.
    pub json: bool,
}

/// Section layout override. Empty means the standard eleven sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub sections: Vec<SectionSpec>,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: None,
            portrait_style: DEFAULT_PORTRAIT_STYLE.to_string(),
            portraits: true,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: None,
            json: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/charforge/config.toml`, then apply
    /// environment overrides. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Load an explicitly requested file. Unlike [`AppConfig::load`], a
    /// missing or broken file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`; the first non-empty API key variable wins.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty());
        if let Some(key) = key {
            self.ai.api_key = Some(key);
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.ai
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Section catalog to parse profiles with.
    pub fn catalog(&self) -> SectionCatalog {
        if self.profile.sections.is_empty() {
            SectionCatalog::standard()
        } else {
            SectionCatalog::new(self.profile.sections.clone())
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("charforge"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export
            .out_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("exports"))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("charforge").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
