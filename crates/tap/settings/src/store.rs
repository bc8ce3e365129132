use std::path::{Path, PathBuf};

use tap_core::OpenSettings;
use tap_resolve::SettingsSource;
use thiserror::Error;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "TAPTHROUGH_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Config file not found at {}", .0.display())]
    NotFound(PathBuf),
}

/// Open settings loaded from a TOML file.
///
/// The resolver only ever reads the in-memory snapshot; changes are written
/// back with [`SettingsStore::save`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: OpenSettings,
}

impl SettingsStore {
    /// Create a store holding `settings` for `path` without touching disk.
    pub fn new(path: impl Into<PathBuf>, settings: OpenSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let content = std::fs::read_to_string(&path)?;
        let settings: OpenSettings = toml::from_str(&content)?;
        Ok(Self { path, settings })
    }

    /// Load settings, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::new(path, OpenSettings::default()))
            }
            other => other,
        }
    }

    /// Load from the default location.
    pub fn open() -> Result<Self, ConfigError> {
        Self::load_or_default(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        settings_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.settings)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> OpenSettings {
        self.settings
    }

    pub fn set_open_app_on_click(&mut self, open_app: bool) {
        self.settings.open_app_on_notification_click = open_app;
    }

    pub fn set_suppress_launch_url(&mut self, suppress: bool) {
        self.settings.suppress_launch_url = suppress;
    }
}

impl SettingsSource for SettingsStore {
    fn open_app_on_click(&self) -> bool {
        self.settings.open_app_on_notification_click
    }

    fn suppress_launch_url(&self) -> bool {
        self.settings.suppress_launch_url
    }
}

fn settings_path(env_override: Option<PathBuf>) -> PathBuf {
    env_override.unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("tapthrough")
            .join("open.toml")
    })
}
