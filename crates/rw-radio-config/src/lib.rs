//! Configuration of radio list rendering.
//!
//! Reads the `[radio]` section of `rw.toml`. Other sections of the file are
//! ignored, so the radio settings can live next to the rest of the site
//! configuration.
//!
//! ```toml
//! [radio]
//! runtime_js_path = "_assets/radio-extension.js"
//! runtime_css_path = "_assets/radio-extension.css"
//! container_classes = "wide"
//! bundle = true
//! assets_dir = "frontend/dist"   # omit to bundle the built-in runtime
//! output = "${SITE_OUT:-build}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `radio.assets_dir`, `radio.output`. Both are resolved
//! against the directory of the config file after expansion.

mod expand;

use std::path::{Component, Path, PathBuf};

use rw_radio::{RadioOptions, TransformOptions};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output directory.
    pub output: Option<PathBuf>,
    /// Override the bundle flag.
    pub bundle: Option<bool>,
}

/// Contents of `rw.toml` as far as radio lists are concerned.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    radio: RadioConfigRaw,
}

/// `[radio]` section as written, before expansion and resolution.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RadioConfigRaw {
    runtime_js_path: Option<String>,
    runtime_css_path: Option<String>,
    container_classes: Option<String>,
    bundle: Option<bool>,
    assets_dir: Option<String>,
    output: Option<String>,
}

/// Resolved radio configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioConfig {
    /// Script path recorded in page metadata and used as bundle destination.
    pub runtime_js_path: String,
    /// Stylesheet path recorded in page metadata and used as bundle destination.
    pub runtime_css_path: String,
    /// Extra classes for every radio container.
    pub container_classes: String,
    /// Copy runtime files into the output directory.
    pub bundle: bool,
    /// Directory holding custom runtime files. `None` bundles the runtime
    /// built into `rw-radio`.
    pub assets_dir: Option<PathBuf>,
    /// Root of the rendered site.
    pub output: PathBuf,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`radio.output`").
        field: String,
        /// Error message (e.g., "${`SITE_OUT`} not set").
        message: String,
    },
}

impl RadioConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `rw.toml` in the current directory and its parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_base(&std::env::current_dir().unwrap_or_default())
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Options for [`rw_radio::RadioTransform::new`].
    #[must_use]
    pub fn plugin_options(&self) -> RadioOptions {
        let options = RadioOptions::default()
            .with_runtime_js_path(self.runtime_js_path.as_str())
            .with_runtime_css_path(self.runtime_css_path.as_str())
            .with_container_classes(self.container_classes.as_str())
            .with_bundle(self.bundle);
        match &self.assets_dir {
            Some(dir) => options.with_assets_dir(dir.as_path()),
            None => options,
        }
    }

    /// Options for a single transform pass.
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            output: self.output.clone(),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a runtime path is empty, absolute
    /// or escapes the output directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_output_relative(&self.runtime_js_path, "radio.runtime_js_path")?;
        require_output_relative(&self.runtime_css_path, "radio.runtime_css_path")?;
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = &settings.output {
            self.output.clone_from(output);
        }
        if let Some(bundle) = settings.bundle {
            self.bundle = bundle;
        }
    }

    fn default_with_base(base: &Path) -> Self {
        let defaults = RadioOptions::default();
        Self {
            runtime_js_path: defaults.runtime_js_path,
            runtime_css_path: defaults.runtime_css_path,
            container_classes: defaults.container_classes,
            bundle: defaults.bundle,
            assets_dir: defaults.assets_dir.map(|dir| base.join(dir)),
            output: base.to_path_buf(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse, expand, resolve against `config_dir` and validate.
    fn from_toml(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let raw = file.radio;
        let mut config = Self::default_with_base(config_dir);

        if let Some(path) = raw.runtime_js_path {
            config.runtime_js_path = path;
        }
        if let Some(path) = raw.runtime_css_path {
            config.runtime_css_path = path;
        }
        if let Some(classes) = raw.container_classes {
            config.container_classes = classes;
        }
        if let Some(bundle) = raw.bundle {
            config.bundle = bundle;
        }
        if let Some(dir) = raw.assets_dir {
            let dir = expand::expand_env(&dir, "radio.assets_dir")?;
            config.assets_dir = Some(config_dir.join(dir));
        }
        if let Some(dir) = raw.output {
            config.output = config_dir.join(expand::expand_env(&dir, "radio.output")?);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Require a path to be non-empty and to stay inside the output directory.
fn require_output_relative(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    let path = Path::new(value);
    if path.has_root() || path.is_absolute() {
        return Err(ConfigError::Validation(format!(
            "{field} must be relative to the output directory"
        )));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain '..'"
        )));
    }
    Ok(())
}
