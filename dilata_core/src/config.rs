//! # Configuration
//!
//! Loaded once at startup and passed explicitly to the parts that need it.
//!
//! ## Sources
//!
//! - `API_KEY` (or `GEMINI_API_KEY`) environment variable: the explanation
//!   service credential. Required; without it the application must not start.
//! - Optional TOML file: path from `DILATA_CONFIG`, otherwise `dilata.toml`
//!   in the working directory. A missing default file means built-in defaults.
//!
//! ## TOML Example
//!
//! ```toml
//! [sliders.initial_temp_c]
//! min = -50.0
//! max = 50.0
//! step = 0.1
//!
//! [explanation]
//! model = "gemini-2.5-flash"
//! request_timeout_secs = 30
//!
//! [[materials]]
//! key = "lead"
//! name = "Plomo"
//! coefficient_per_c = 29.0e-6
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};
use crate::experiment::SliderBounds;
use crate::explanation::ExplanationSettings;
use crate::materials::{Material, MaterialCatalog};

/// Environment variable holding the explanation service credential
pub const API_KEY_ENV: &str = "API_KEY";

/// Accepted alternative name for the credential
pub const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

/// Environment variable pointing at a config file
pub const CONFIG_PATH_ENV: &str = "DILATA_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dilata.toml";

/// Explanation service credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential, rejecting blank values
    pub fn new(key: impl Into<String>) -> LabResult<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(LabError::configuration(format!(
                "{} environment variable not set",
                API_KEY_ENV
            )));
        }
        Ok(ApiKey(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

/// Contents of the optional config file. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub sliders: SliderBounds,
    pub explanation: ExplanationSettings,
    /// Extra materials, or replacements for builtin keys
    pub materials: Vec<Material>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str) -> LabResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn load_from(path: &Path) -> LabResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LabError::configuration(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Validated configuration for one process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub sliders: SliderBounds,
    pub explanation: ExplanationSettings,
    pub catalog: MaterialCatalog,
}

impl AppConfig {
    /// Combine file settings with the credential and validate everything.
    ///
    /// Every failure is a `Configuration` error.
    pub fn from_parts(file: FileConfig, api_key: Option<String>) -> LabResult<Self> {
        let api_key = ApiKey::new(api_key.unwrap_or_default())?;

        file.sliders.validate().map_err(as_configuration)?;
        file.explanation.validate().map_err(as_configuration)?;
        let catalog = MaterialCatalog::with_overrides(file.materials).map_err(as_configuration)?;

        Ok(AppConfig {
            api_key,
            sliders: file.sliders,
            explanation: file.explanation,
            catalog,
        })
    }

    /// Load from the process environment and the optional config file
    pub fn load() -> LabResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_FALLBACK_ENV).ok());

        let file = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => FileConfig::load_from(&PathBuf::from(path))?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    FileConfig::load_from(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Self::from_parts(file, api_key)
    }
}

fn as_configuration(err: LabError) -> LabError {
    match err {
        LabError::Configuration { .. } => err,
        other => LabError::configuration(other.to_string()),
    }
}
