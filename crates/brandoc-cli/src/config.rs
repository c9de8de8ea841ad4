//! Configuration
//!
//! Settings are loaded from `brandoc.toml`, either given explicitly or
//! found next to the input file:
//!
//! ```toml
//! [font]
//! path = "fonts/BebasNeue-regular.ttf"
//! embed = true
//!
//! [output]
//! dir = "out/"
//!
//! [document]
//! title = "SEO Market Analysis"
//! recipient = "Acme Plumbing"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file name looked up next to the input
pub const CONFIG_FILE: &str = "brandoc.toml";

/// Default location of the display font
pub const DEFAULT_FONT_PATH: &str = "fonts/BebasNeue-regular.ttf";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Font embedding settings
    pub font: FontSettings,
    /// Output location settings
    pub output: OutputSettings,
    /// Page header and footer defaults
    pub document: DocumentSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// TrueType file embedded as the display face
    pub path: PathBuf,
    /// Embed the font after writing
    pub embed: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FONT_PATH),
            embed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for rendered packages (default: the input's directory)
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentSettings {
    pub title: Option<String>,
    pub recipient: Option<String>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut settings = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        if let Some(base) = path.parent() {
            settings.resolve_paths(base);
        }
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load `brandoc.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.font.path.is_relative() {
            self.font.path = base.join(&self.font.path);
        }
        if let Some(dir) = self.output.dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}
