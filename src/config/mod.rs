//! Generator configuration management for `json2rss.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── channel    # [channel]
//! │   ├── feed       # [feed]
//! │   ├── input      # [input]
//! │   ├── labels     # [labels]
//! │   └── output     # [output]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # GeneratorConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[feed]`    | `max_items` and `max_age_days`                   |
//! | `[channel]` | Title, link, language, self link, guid base      |
//! | `[input]`   | Record directory, file suffix, skip_invalid      |
//! | `[output]`  | Feed file path                                   |
//! | `[labels]`  | Placeholder and label text                       |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ChannelConfig, InputConfig, LabelsConfig, OutputConfig, RetentionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::BuildArgs, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "json2rss.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing json2rss.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Retention settings
    #[serde(default)]
    pub feed: RetentionConfig,

    /// Channel metadata for new feeds
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Record source
    #[serde(default)]
    pub input: InputConfig,

    /// Feed destination
    #[serde(default)]
    pub output: OutputConfig,

    /// Literal text used in items
    #[serde(default)]
    pub labels: LabelsConfig,
}

impl GeneratorConfig {
    /// Load configuration for a `build` run.
    ///
    /// Searches upward from cwd for `config_name`. A missing config file is
    /// fatal; relative paths resolve against the config file's directory.
    pub fn load(config_name: &Path, args: &BuildArgs) -> Result<Self> {
        let Some(config_path) = find_config_file(config_name) else {
            return Err(ConfigError::NotFound(config_name.to_path_buf()).into());
        };

        let mut config = Self::from_path(&config_path)?;
        config.finalize(config_path, args);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set paths, apply CLI overrides and resolve relative paths.
    fn finalize(&mut self, config_path: PathBuf, args: &BuildArgs) {
        self.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.config_path = config_path;

        self.apply_build_args(args);
        self.normalize_paths();
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the config root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.input.dir, args.input.as_ref());
        Self::update_option(&mut self.output.path, args.output.as_ref());
        Self::update_option(&mut self.feed.max_items, args.max_items.as_ref());
        Self::update_option(&mut self.feed.max_age_days, args.max_age_days.as_ref());
        if args.skip_invalid {
            self.input.skip_invalid = true;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve input and output paths against the root directory.
    fn normalize_paths(&mut self) {
        self.input.dir = self.root.join(&self.input.dir);
        self.output.path = self.root.join(&self.output.path);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.channel.validate(&mut diag);
        self.input.validate(&mut diag);
        self.output.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> GeneratorConfig {
    let (parsed, ignored) = GeneratorConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
