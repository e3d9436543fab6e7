//! Configuration management for static-finders

pub mod schema;

pub use schema::{Config, StaticDir, DEFAULT_CACHE};

use crate::error::{FinderError, FinderResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = "static-finders.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Config file in `dir`, whether or not it exists yet
    pub fn in_dir(dir: &Path) -> Self {
        Self::with_path(dir.join(LOCAL_CONFIG_FILE))
    }

    /// Walk up from `start` looking for a project-local config file
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration, falling back to defaults if the file is missing.
    ///
    /// Without a file the base directory is the current directory.
    pub async fn load(&self) -> FinderResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            let mut config = Config::default();
            if config.base_dir.is_none() {
                config.base_dir = Some(
                    std::env::current_dir()
                        .map_err(|e| FinderError::io("getting current directory", e))?,
                );
            }
            return Ok(config);
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file.
    ///
    /// A relative `base_dir` resolves against the file's directory; a missing
    /// one becomes that directory.
    pub async fn load_from_file(&self, path: &Path) -> FinderResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| FinderError::io(format!("reading config from {}", path.display()), e))?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| FinderError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let file_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_dir = std::path::absolute(&file_dir)
            .map_err(|e| FinderError::io("resolving config directory", e))?;

        config.base_dir = Some(match config.base_dir.take() {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => file_dir.join(dir),
            None => file_dir,
        });

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> FinderResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            FinderError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> FinderResult<()> {
        if let Some(parent) = self.config_path.parent() {
            if parent.as_os_str().is_empty() {
                return Ok(());
            }
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FinderError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.static_finders.cache, DEFAULT_CACHE);
        assert!(config.base_dir.is_some());
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.static_finders.cache = "test-cache".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.static_finders.cache, "test-cache");
    }

    #[tokio::test]
    async fn base_dir_defaults_to_config_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, "[staticfiles]\nstatic_root = \"out\"\n").unwrap();

        let config = ConfigManager::with_path(path).load().await.unwrap();
        let base = std::path::absolute(temp.path()).unwrap();
        assert_eq!(config.base_dir(), base);
        assert_eq!(config.static_root(), base.join("out"));
    }

    #[tokio::test]
    async fn relative_base_dir_resolves_against_config_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, "base_dir = \"site\"\n").unwrap();

        let config = ConfigManager::with_path(path).load().await.unwrap();
        let base = std::path::absolute(temp.path()).unwrap().join("site");
        assert_eq!(config.base_dir(), base);
    }

    #[tokio::test]
    async fn invalid_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, "[staticfiles\n").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, FinderError::ConfigInvalid { path: p, .. } if p == path));
    }

    #[test]
    fn find_local_config_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), "").unwrap();

        let found = ConfigManager::find_local_config(&nested).unwrap();
        assert_eq!(found, temp.path().join(LOCAL_CONFIG_FILE));
    }
}
