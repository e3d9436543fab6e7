//! Finder over explicitly configured static directories

use crate::config::{Config, StaticDir};
use crate::error::FinderResult;
use crate::finders::finder::{Finder, ListedFile};
use crate::patterns::{self, PatternSet};
use crate::storage::FileSystemStorage;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Looks files up in `staticfiles.dirs`, in configured order
pub struct FileSystemFinder {
    storages: Vec<FileSystemStorage>,
}

impl FileSystemFinder {
    /// Create a finder over already-resolved directories
    pub fn new(dirs: &[StaticDir]) -> Self {
        let storages = dirs
            .iter()
            .map(|dir| FileSystemStorage::new(&dir.path).with_prefix(dir.prefix.clone()))
            .collect();
        Self { storages }
    }

    /// Create a finder from configuration, resolving paths against the base dir
    pub fn from_config(config: &Config) -> Self {
        let dirs: Vec<StaticDir> = config
            .staticfiles
            .dirs
            .iter()
            .map(|dir| StaticDir {
                path: config.resolve(&dir.path),
                prefix: dir.prefix.clone(),
            })
            .collect();
        Self::new(&dirs)
    }

    fn find_in(storage: &FileSystemStorage, path: &str) -> FinderResult<Option<PathBuf>> {
        let relative = match storage.prefix() {
            Some(prefix) => match path.strip_prefix(prefix).and_then(|p| p.strip_prefix('/')) {
                Some(rest) => rest,
                None => return Ok(None),
            },
            None => path,
        };

        let candidate = storage.path(relative)?;
        Ok(candidate.exists().then_some(candidate))
    }
}

#[async_trait]
impl Finder for FileSystemFinder {
    async fn find(&self, path: &str, all: bool) -> FinderResult<Vec<PathBuf>> {
        let path = patterns::normalize(path);
        let mut found = Vec::new();

        for storage in &self.storages {
            if let Some(location) = Self::find_in(storage, &path)? {
                debug!("{} found in {}", path, storage.location().display());
                found.push(location);
                if !all {
                    break;
                }
            }
        }

        Ok(found)
    }

    async fn list(&self, ignore_patterns: &PatternSet) -> FinderResult<Vec<ListedFile>> {
        let mut listed = Vec::new();
        for storage in &self.storages {
            for path in storage.list_files(ignore_patterns)? {
                listed.push(ListedFile::new(path, storage.clone()));
            }
        }
        Ok(listed)
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
