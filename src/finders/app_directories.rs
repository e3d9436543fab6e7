//! Finder over the `static/` directory of each application

use crate::config::Config;
use crate::error::FinderResult;
use crate::finders::finder::{Finder, ListedFile};
use crate::patterns::{self, PatternSet};
use crate::storage::FileSystemStorage;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Subdirectory of an application that holds its statics
pub const APP_STATIC_DIR: &str = "static";

/// Looks files up in `<app>/static` for every configured application
pub struct AppDirectoriesFinder {
    storages: Vec<FileSystemStorage>,
}

impl AppDirectoriesFinder {
    /// Create a finder over application directories.
    ///
    /// Applications without a `static/` directory are skipped.
    pub fn new<P: AsRef<Path>>(apps: &[P]) -> Self {
        let storages = apps
            .iter()
            .map(|app| app.as_ref().join(APP_STATIC_DIR))
            .filter(|dir| dir.is_dir())
            .map(FileSystemStorage::new)
            .collect();
        Self { storages }
    }

    pub fn from_config(config: &Config) -> Self {
        let apps: Vec<PathBuf> = config
            .staticfiles
            .apps
            .iter()
            .map(|app| config.resolve(app))
            .collect();
        Self::new(&apps)
    }
}

#[async_trait]
impl Finder for AppDirectoriesFinder {
    async fn find(&self, path: &str, all: bool) -> FinderResult<Vec<PathBuf>> {
        let path = patterns::normalize(path);
        let mut found = Vec::new();

        for storage in &self.storages {
            let candidate = storage.path(&path)?;
            if candidate.exists() {
                found.push(candidate);
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
        "app_directories"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn finds_in_app_static_dirs() {
        let root = TempDir::new().unwrap();
        let blog = root.path().join("blog");
        let shop = root.path().join("shop");
        fs::create_dir_all(blog.join("static/blog")).unwrap();
        fs::create_dir_all(&shop).unwrap();
        fs::write(blog.join("static/blog/post.js"), "post").unwrap();

        let finder = AppDirectoriesFinder::new(&[blog.clone(), shop]);
        assert_eq!(
            finder.find("blog/post.js", false).await.unwrap(),
            vec![blog.join("static/blog/post.js")]
        );

        let listed = finder.list(&PatternSet::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, "blog/post.js");
    }

    #[tokio::test]
    async fn traversal_is_an_error() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("app/static")).unwrap();
        let finder = AppDirectoriesFinder::new(&[root.path().join("app")]);
        assert!(finder.find("../../etc/passwd", false).await.is_err());
    }
}
