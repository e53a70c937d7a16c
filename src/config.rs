//! Configuration: TOML file layered under CLI overrides.
//!
//! Lookup order is `./docugen.toml`, then the per-user
//! `<config dir>/docugen/config.toml`. CLI flags always win over file
//! values; the API key additionally falls back to `DOCUGEN_API_KEY`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::PdfOptions;
use crate::generate::ModelNames;
use crate::layout::PageGeometry;

pub const LOCAL_CONFIG: &str = "docugen.toml";
pub const API_KEY_ENV: &str = "DOCUGEN_API_KEY";

/// Config error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no API key: set [api] key, or the {API_KEY_ENV} environment variable")]
    MissingApiKey,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// OpenAI-compatible endpoint base URL
    pub endpoint: Option<String>,
    /// API key; falls back to the environment when unset
    pub key: Option<String>,
    pub model: Option<String>,
    pub pro_model: Option<String>,
    pub image_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page size in points; A4 when unset
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub margin: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Header line on every PDF page
    pub header: Option<String>,
    /// Page-number footer
    pub footer: bool,
    pub watermark: Option<String>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            header: None,
            footer: true,
            watermark: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub page: PageConfig,
    pub branding: BrandingConfig,
}

/// Values the CLI may force over file config. `None` means the flag was not
/// given, so the file value stands.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub header: Option<String>,
    pub watermark: Option<String>,
    pub no_footer: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Config {
    /// Load from the standard locations, first match wins. Missing files
    /// are not an error; a file that fails to parse is.
    pub fn load() -> Result<Self, ConfigError> {
        let local = Path::new(LOCAL_CONFIG);
        if local.exists() {
            return Self::load_from_path(local);
        }
        if let Some(dir) = dirs::config_dir() {
            let user = dir.join("docugen").join("config.toml");
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Merge CLI overrides on top of this config. CLI values take
    /// precedence over file values.
    pub fn merge_with_cli(mut self, overrides: &CliOverrides) -> Self {
        if overrides.endpoint.is_some() {
            self.api.endpoint = overrides.endpoint.clone();
        }
        if overrides.api_key.is_some() {
            self.api.key = overrides.api_key.clone();
        }
        if overrides.model.is_some() {
            self.api.model = overrides.model.clone();
        }
        if overrides.header.is_some() {
            self.branding.header = overrides.header.clone();
        }
        if overrides.watermark.is_some() {
            self.branding.watermark = overrides.watermark.clone();
        }
        if overrides.no_footer {
            self.branding.footer = false;
        }
        self
    }

    /// Resolved API key, trying the config then the environment.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.api.key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    pub fn endpoint(&self) -> String {
        self.api
            .endpoint
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
    }

    pub fn model_names(&self) -> ModelNames {
        let defaults = ModelNames::default();
        ModelNames {
            standard: self.api.model.clone().unwrap_or(defaults.standard),
            pro: self.api.pro_model.clone().unwrap_or(defaults.pro),
            image: self.api.image_model.clone().unwrap_or(defaults.image),
        }
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry {
            width: self.page.width.unwrap_or(PageGeometry::A4.width),
            height: self.page.height.unwrap_or(PageGeometry::A4.height),
            margin: self.page.margin.unwrap_or(PageGeometry::A4.margin),
        }
    }

    pub fn pdf_options(&self, title: &str) -> PdfOptions {
        PdfOptions {
            title: title.to_string(),
            header: self.branding.header.clone(),
            footer: self.branding.footer,
            watermark: self.branding.watermark.clone(),
        }
    }
}

// ============================================================
// Tests
// ============================================================
