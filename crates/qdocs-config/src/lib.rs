//! Configuration management for qdocs.
//!
//! Parses `qdocs.toml` configuration files with serde and provides
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
//! - `~` - expands to the home directory
//!
//! Expanded fields:
//! - `quarto.renderer_path`

mod expand;

use qdocs_files::mapping;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub docs_dir: Option<PathBuf>,
    /// Override site output directory.
    pub site_dir: Option<PathBuf>,
    /// Override directory URL style.
    pub use_directory_urls: Option<bool>,
    /// Override renderer executable path.
    pub renderer_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "qdocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Quarto plugin configuration.
    pub quarto: QuartoConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    docs_dir: Option<String>,
    site_dir: Option<String>,
    use_directory_urls: Option<bool>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Source directory for documentation files.
    pub docs_dir: PathBuf,
    /// Output directory for the built site.
    pub site_dir: PathBuf,
    /// Whether pages use `slug/` URLs instead of `slug.html`.
    pub use_directory_urls: bool,
}

/// Quarto plugin configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuartoConfig {
    /// Path to the Quarto executable. Searched in `PATH` when unset.
    pub renderer_path: Option<PathBuf>,
    /// Regular expression for source paths to ignore.
    pub ignore: Option<String>,
    /// Keep the renderer's intermediate output. Currently has no effect.
    pub keep_output: bool,
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
        /// Config field path (e.g., "`quarto.renderer_path`").
        field: String,
        /// Error message (e.g., "${`QUARTO_HOME`} not set").
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
    /// Otherwise, searches for `qdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.site_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(site_dir) = &settings.site_dir {
            self.site_resolved.site_dir.clone_from(site_dir);
        }
        if let Some(use_directory_urls) = settings.use_directory_urls {
            self.site_resolved.use_directory_urls = use_directory_urls;
        }
        if let Some(renderer_path) = &settings.renderer_path {
            self.quarto.renderer_path = Some(renderer_path.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            site: SiteConfigRaw::default(),
            quarto: QuartoConfig::default(),
            site_resolved: SiteConfig {
                docs_dir: base.join("docs"),
                site_dir: base.join("site"),
                use_directory_urls: true,
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

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_quarto()?;
        Ok(())
    }

    /// Validate site layout.
    fn validate_site(&self) -> Result<(), ConfigError> {
        // Relative paths (CLI overrides) are taken from the current directory
        let cwd = std::env::current_dir().unwrap_or_default();
        let docs_dir = &mapping::normalize(&cwd.join(&self.site_resolved.docs_dir));
        let site_dir = &mapping::normalize(&cwd.join(&self.site_resolved.site_dir));

        // Building into the docs dir would make the next build discover its own output
        if site_dir == docs_dir || site_dir.starts_with(docs_dir) {
            return Err(ConfigError::Validation(format!(
                "site.site_dir ({}) cannot be inside site.docs_dir ({})",
                site_dir.display(),
                docs_dir.display()
            )));
        }
        if docs_dir.starts_with(site_dir) {
            return Err(ConfigError::Validation(format!(
                "site.docs_dir ({}) cannot be inside site.site_dir ({})",
                docs_dir.display(),
                site_dir.display()
            )));
        }

        Ok(())
    }

    /// Validate Quarto configuration.
    fn validate_quarto(&self) -> Result<(), ConfigError> {
        if let Some(renderer_path) = &self.quarto.renderer_path {
            require_non_empty(&renderer_path.to_string_lossy(), "quarto.renderer_path")?;
        }
        if let Some(ignore) = &self.quarto.ignore {
            require_non_empty(ignore, "quarto.ignore")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.quarto.renderer_path {
            let expanded = expand::expand_env(&path.to_string_lossy(), "quarto.renderer_path")?;
            self.quarto.renderer_path = Some(PathBuf::from(expanded));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// The renderer path is left as written: a bare relative path is only
    /// meaningful to the renderer invocation itself.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            docs_dir: resolve(self.site.docs_dir.as_deref(), "docs"),
            site_dir: resolve(self.site.site_dir.as_deref(), "site"),
            use_directory_urls: self.site.use_directory_urls.unwrap_or(true),
        };
    }
}
