use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_CODE_LENGTH, DEFAULT_MIN_LETTER_SPACING};

/// Configuration for a code input box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub font: FontConfig,
    pub decoration: DecorationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Number of input slots; also the length-filter target
    pub code_length: usize,
    /// Spacing floor (em units) applied when measuring the desired width
    pub min_letter_spacing: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family for the reference monospace typeface
    pub font_family: String,
    /// Font size in points
    pub font_size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecorationConfig {
    /// Inset of each underline mark from its slot edges, in pixels
    pub padding: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                code_length: DEFAULT_CODE_LENGTH,
                min_letter_spacing: DEFAULT_MIN_LETTER_SPACING,
            },
            font: FontConfig {
                font_family: "JetBrains Mono".to_string(),
                font_size: 14.0,
            },
            decoration: DecorationConfig { padding: 10.0 },
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            // Create default config
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = toml::to_string_pretty(&config)?;
            std::fs::write(&config_path, contents)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> anyhow::Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    fn default_path() -> PathBuf {
        let mut p = dirs::config_dir().expect("No config directory");
        p.push("pinbox");
        p.push("config.toml");
        p
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            let mut path = PathBuf::from(home);
            path.push(".config");
            path
        })
    }
}
