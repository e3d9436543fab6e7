//! Configuration schema for static-finders
//!
//! Configuration is read from `static-finders.toml`, found by walking up
//! from the current directory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default cache directory, relative to the base directory
pub const DEFAULT_CACHE: &str = "static-finders-cache";

/// Default compile rule: transpile every script with babel
pub const DEFAULT_COMPILE_PATTERN: &str = "*.js";
pub const DEFAULT_COMPILE_COMMAND: &str = r#"npm run babel -- "{infile}" --out-file="{outfile}""#;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root that relative paths resolve against.
    /// Filled in from the config file location when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// General settings
    pub general: GeneralConfig,

    /// Source directories and the collect step
    pub staticfiles: StaticFilesConfig,

    /// Vendor and compile finder settings
    pub static_finders: StaticFindersConfig,
}

impl Config {
    /// The project root, or the current directory if none was resolved
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a configured path against the base directory
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Absolute location of the finder cache
    pub fn cache_root(&self) -> PathBuf {
        self.resolve(&self.static_finders.cache)
    }

    /// Absolute location the collect step copies into
    pub fn static_root(&self) -> PathBuf {
        self.resolve(&self.staticfiles.static_root)
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// A static source directory, optionally mounted under a prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDir {
    /// Directory holding the files
    pub path: PathBuf,

    /// Path prefix the files are exposed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Static file discovery and collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Destination of the collect step
    pub static_root: PathBuf,

    /// Enabled finders, queried in order
    pub finders: Vec<String>,

    /// Patterns skipped when listing source directories
    pub ignore_patterns: Vec<String>,

    /// Extra static directories scanned by the filesystem finder
    pub dirs: Vec<StaticDir>,

    /// Application directories whose `static/` subdirectory is scanned
    pub apps: Vec<PathBuf>,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            static_root: PathBuf::from("collected"),
            finders: vec!["filesystem".to_string(), "app_directories".to_string()],
            ignore_patterns: vec!["CVS".to_string(), ".*".to_string(), "*~".to_string()],
            dirs: vec![],
            apps: vec![],
        }
    }
}

/// Settings shared by the vendor and compiled finders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFindersConfig {
    /// Cache directory, relative to the base directory
    pub cache: String,

    /// Asset path -> source URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_map: Option<IndexMap<String, String>>,

    /// TOML or JSON file holding additional vendor map entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_map_file: Option<PathBuf>,

    /// Glob pattern -> command template, first match wins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_map: Option<IndexMap<String, String>>,

    /// Paths matching any of these are never compiled
    #[serde(alias = "ignore_patterns", skip_serializing_if = "Option::is_none")]
    pub no_compile_patterns: Option<Vec<String>>,

    /// Per-download timeout in seconds (none = wait indefinitely)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_timeout_secs: Option<u64>,
}

impl Default for StaticFindersConfig {
    fn default() -> Self {
        Self {
            cache: DEFAULT_CACHE.to_string(),
            vendor_map: None,
            vendor_map_file: None,
            compile_map: None,
            no_compile_patterns: None,
            download_timeout_secs: None,
        }
    }
}

impl StaticFindersConfig {
    /// Compile map with the babel default applied
    pub fn compile_map_or_default(&self) -> IndexMap<String, String> {
        self.compile_map.clone().unwrap_or_else(|| {
            IndexMap::from([(
                DEFAULT_COMPILE_PATTERN.to_string(),
                DEFAULT_COMPILE_COMMAND.to_string(),
            )])
        })
    }

    /// No-compile patterns with the minified-script default applied
    pub fn no_compile_patterns_or_default(&self) -> Vec<String> {
        self.no_compile_patterns
            .clone()
            .unwrap_or_else(|| vec!["*.min.js".to_string()])
    }
}
