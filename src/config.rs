//! Configuration and color scheme management for mockterm.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.mockterm/config.toml`
//! - Built-in color schemes (default, solarized-dark, nord, green-screen)
//!
//! # Configuration File
//!
//! Every key is optional:
//!
//! ```toml
//! prompt = "you@PC$ "
//! greeting = "Want to play a game? Type 'games' to see available games."
//! scrollback = 1000
//! log_level = "info"
//! color_scheme = "nord"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text drawn before the input line
    pub prompt: String,
    /// First line shown at startup (empty for none)
    pub greeting: String,
    /// Output lines kept for redraws
    pub scrollback: usize,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
    /// Color scheme name
    pub color_scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "you@PC$ ".to_string(),
            greeting: "Want to play a game? Type 'games' to see available games.".to_string(),
            scrollback: 1000,
            log_level: "info".to_string(),
            color_scheme: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried, and a missing file there just means default settings.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::get_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub name: String,
    pub background: Color,
    /// Scrollback text
    pub output: Color,
    pub prompt: Color,
    /// Text being typed
    pub input: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default color scheme
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),
            background: Color::new(0, 0, 0),
            output: Color::new(204, 204, 204),
            prompt: Color::new(100, 150, 255),
            input: Color::new(255, 255, 255),
        }
    }

    /// Solarized Dark scheme
    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),
            background: Color::new(0, 43, 54),
            output: Color::new(147, 161, 161),
            prompt: Color::new(181, 137, 0),
            input: Color::new(253, 246, 227),
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::new(46, 52, 64),
            output: Color::new(216, 222, 233),
            prompt: Color::new(136, 192, 208),
            input: Color::new(236, 239, 244),
        }
    }

    /// Monochrome phosphor look
    pub fn green_screen() -> Self {
        Self {
            name: "green-screen".to_string(),
            background: Color::new(0, 0, 0),
            output: Color::new(51, 255, 51),
            prompt: Color::new(51, 255, 51),
            input: Color::new(180, 255, 180),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "solarized-dark" | "solarized_dark" => Self::solarized_dark(),
            "nord" => Self::nord(),
            "green-screen" | "green_screen" | "green" => Self::green_screen(),
            _ => Self::default_scheme(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "solarized-dark", "nord", "green-screen"]
    }
}

/// `~/.mockterm`, holding the config file and the log
pub fn data_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".mockterm"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
