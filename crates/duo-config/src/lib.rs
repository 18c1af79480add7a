//! Configuration management for duo.
//!
//! Parses `duo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path and program settings may reference environment variables:
//!
//! - `$VAR` / `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `media.dir`
//! - `media.link_prefix`
//! - `toolchain.compiler`
//! - `toolchain.compiler_args` (each argument)
//! - `toolchain.rasterizer`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override media output directory.
    pub media_dir: Option<PathBuf>,
    /// Override image format selection.
    pub format: Option<RenderFormat>,
    /// Override the LaTeX compiler program.
    pub compiler: Option<String>,
    /// Override the PDF rasterizer program.
    pub rasterizer: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "duo.toml";

/// Default media directory (relative to the config directory).
const DEFAULT_MEDIA_DIR: &str = "media";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Media configuration (paths are relative strings from TOML).
    media: MediaConfigRaw,
    /// Image format selection.
    pub render: RenderConfig,
    /// External programs used to compile and convert diagrams.
    pub toolchain: ToolchainConfig,
    /// LaTeX template customization.
    pub template: TemplateConfig,

    /// Resolved media configuration (set after loading).
    #[serde(skip)]
    pub media_resolved: MediaConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw media configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MediaConfigRaw {
    dir: Option<String>,
    link_prefix: Option<String>,
}

/// Resolved media configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    /// Directory where rendered images are written.
    pub dir: PathBuf,
    /// Prefix used for image links in generated markup (e.g., `media`).
    pub link_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            link_prefix: DEFAULT_MEDIA_DIR.to_owned(),
        }
    }
}

/// Which image format to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Pick from the Pandoc target format (PDF-based targets get PDF images).
    #[default]
    Auto,
    /// Always produce SVG images.
    Svg,
    /// Always produce PDF images.
    Pdf,
}

/// Render configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image format selection.
    pub format: RenderFormat,
}

/// External toolchain configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// LaTeX compiler producing a PDF.
    pub compiler: String,
    /// Extra arguments passed to the compiler before the input file.
    pub compiler_args: Vec<String>,
    /// PDF to SVG/PDF converter.
    pub rasterizer: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: "lualatex".to_owned(),
            compiler_args: Vec::new(),
            rasterizer: "pdftocairo".to_owned(),
        }
    }
}

/// Template configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Extra LaTeX preamble lines appended after the built-in packages.
    pub preamble: String,
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
        /// Config field path (e.g., "`toolchain.compiler`").
        field: String,
        /// Error message (e.g., "`TEXBIN` is not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `duo.toml` in current directory and parents.
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
        if let Some(media_dir) = &settings.media_dir {
            self.media_resolved.dir.clone_from(media_dir);
            self.media_resolved.link_prefix = link_prefix_for(media_dir);
        }
        if let Some(format) = settings.format {
            self.render.format = format;
        }
        if let Some(compiler) = &settings.compiler {
            self.toolchain.compiler.clone_from(compiler);
        }
        if let Some(rasterizer) = &settings.rasterizer {
            self.toolchain.rasterizer.clone_from(rasterizer);
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
            media: MediaConfigRaw::default(),
            render: RenderConfig::default(),
            toolchain: ToolchainConfig::default(),
            template: TemplateConfig::default(),
            media_resolved: MediaConfig {
                dir: base.join(DEFAULT_MEDIA_DIR),
                link_prefix: DEFAULT_MEDIA_DIR.to_owned(),
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
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_media()?;
        self.validate_toolchain()?;
        Ok(())
    }

    fn validate_media(&self) -> Result<(), ConfigError> {
        if self.media_resolved.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "media.dir cannot be empty".to_owned(),
            ));
        }
        if self.media_resolved.link_prefix.contains('\\') {
            return Err(ConfigError::Validation(
                "media.link_prefix must use forward slashes".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_toolchain(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.toolchain.compiler, "toolchain.compiler")?;
        require_non_empty(&self.toolchain.rasterizer, "toolchain.rasterizer")?;
        Ok(())
    }

    /// Expand environment references in every path and program setting.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_optional("media.dir", self.media.dir.as_mut())?;
        expand::expand_optional("media.link_prefix", self.media.link_prefix.as_mut())?;
        expand::expand_field("toolchain.compiler", &mut self.toolchain.compiler)?;
        expand::expand_field("toolchain.rasterizer", &mut self.toolchain.rasterizer)?;
        for (i, arg) in self.toolchain.compiler_args.iter_mut().enumerate() {
            expand::expand_field(&format!("toolchain.compiler_args[{i}]"), arg)?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// The link prefix defaults to the configured directory string so generated
    /// links stay relative to the document, not to the config file.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let dir = self.media.dir.as_deref().unwrap_or(DEFAULT_MEDIA_DIR);
        let link_prefix = self
            .media
            .link_prefix
            .clone()
            .unwrap_or_else(|| link_prefix_for(Path::new(dir)));

        self.media_resolved = MediaConfig {
            dir: config_dir.join(dir),
            link_prefix,
        };
    }
}

/// Derive a forward-slash link prefix from a directory path.
fn link_prefix_for(dir: &Path) -> String {
    dir.to_string_lossy()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_owned()
}
