//! Configuration management for arrange.
//!
//! Parses `arrange.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.nav_file`

mod expand;

use std::path::{Path, PathBuf};

use arrange_meta::{Order, OrderBy, SortType};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override host nav config file.
    pub nav_file: Option<PathBuf>,
    /// Override the strict policy for nav entries that name nothing.
    pub strict: Option<bool>,
    /// Override the build-wide collapse default.
    pub collapse_single_pages: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "arrange.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Metadata file configuration.
    pub metadata: MetadataConfig,
    /// Build-wide navigation defaults.
    pub navigation: NavigationConfig,
    /// Host plugin list, in execution order.
    pub plugins: Vec<PluginConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    nav_file: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Host-level nav config, if any.
    pub nav_file: Option<PathBuf>,
}

/// Metadata file configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Name of the per-directory metadata file.
    pub filename: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            filename: ".pages".to_owned(),
        }
    }
}

/// Build-wide navigation defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Collapse single-child sections unless a metadata file says otherwise.
    pub collapse_single_pages: bool,
    /// Fail on nav entries that name nothing instead of warning.
    pub strict: bool,
    pub order: Option<Order>,
    pub sort_type: Option<SortType>,
    pub order_by: Option<OrderBy>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            collapse_single_pages: false,
            strict: true,
            order: None,
            sort_type: None,
            order_by: None,
        }
    }
}

/// One entry of the host plugin list.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginConfig {
    pub name: String,
    /// Whether the plugin rewrites navigation.
    #[serde(default)]
    pub handles_nav: bool,
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
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `arrange.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(nav_file) = &settings.nav_file {
            self.docs_resolved.nav_file = Some(nav_file.clone());
        }
        if let Some(strict) = settings.strict {
            self.navigation.strict = strict;
        }
        if let Some(collapse) = settings.collapse_single_pages {
            self.navigation.collapse_single_pages = collapse;
        }
    }

    /// Search for config file in `start` and its parents.
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            metadata: MetadataConfig::default(),
            navigation: NavigationConfig::default(),
            plugins: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                nav_file: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let filename = &self.metadata.filename;
        require_non_empty(filename, "metadata.filename")?;
        if filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "metadata.filename must be a file name, not a path".to_owned(),
            ));
        }
        for plugin in &self.plugins {
            require_non_empty(&plugin.name, "plugins.name")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref file) = self.docs.nav_file {
            self.docs.nav_file = Some(expand::expand_env(file, "docs.nav_file")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            nav_file: self.docs.nav_file.as_deref().map(|f| config_dir.join(f)),
        };
    }
}
