use crate::error::{Result, SlidezError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LAYOUT: &str = "BLANK";
const DEFAULT_SLIDES_ENDPOINT: &str = "https://slides.googleapis.com/v1";
const DEFAULT_DRIVE_ENDPOINT: &str = "https://www.googleapis.com/drive/v3";

pub const KEYS: [&str; 4] = [
    "default-layout",
    "credentials-dir",
    "slides-endpoint",
    "drive-endpoint",
];

/// Configuration for slidez, stored as config.json in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlidezConfig {
    /// Predefined layout for new slides (e.g. "BLANK", "TITLE_AND_BODY")
    #[serde(default = "default_layout")]
    pub default_layout: String,

    /// Where credentials.json and token.json live; the config directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_dir: Option<PathBuf>,

    #[serde(default = "default_slides_endpoint")]
    pub slides_endpoint: String,

    #[serde(default = "default_drive_endpoint")]
    pub drive_endpoint: String,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

fn default_slides_endpoint() -> String {
    DEFAULT_SLIDES_ENDPOINT.to_string()
}

fn default_drive_endpoint() -> String {
    DEFAULT_DRIVE_ENDPOINT.to_string()
}

impl Default for SlidezConfig {
    fn default() -> Self {
        Self {
            default_layout: default_layout(),
            credentials_dir: None,
            slides_endpoint: default_slides_endpoint(),
            drive_endpoint: default_drive_endpoint(),
        }
    }
}

impl SlidezConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SlidezConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn credentials_dir(&self, config_dir: &Path) -> PathBuf {
        self.credentials_dir
            .clone()
            .unwrap_or_else(|| config_dir.to_path_buf())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-layout" => Some(self.default_layout.clone()),
            "credentials-dir" => Some(
                self.credentials_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "slides-endpoint" => Some(self.slides_endpoint.clone()),
            "drive-endpoint" => Some(self.drive_endpoint.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "default-layout" => {
                if value.is_empty() {
                    return Err(SlidezError::MalformedInput("layout must not be empty".to_string()));
                }
                self.default_layout = value.to_ascii_uppercase();
            }
            // An empty value resets to the config directory.
            "credentials-dir" => {
                self.credentials_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "slides-endpoint" => self.slides_endpoint = endpoint(value)?,
            "drive-endpoint" => self.drive_endpoint = endpoint(value)?,
            _ => {
                return Err(SlidezError::MalformedInput(format!(
                    "unknown config key '{}' (expected one of: {})",
                    key,
                    KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn endpoint(value: &str) -> Result<String> {
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(SlidezError::MalformedInput(format!(
            "endpoint must be an http(s) URL, got '{}'",
            value
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}
