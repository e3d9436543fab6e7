//! Directory-backed storage for found statics
//!
//! Finders hand out `(path, storage)` pairs; the collect step asks the
//! storage where the file actually lives.

use crate::error::{FinderError, FinderResult};
use crate::patterns::{self, PatternSet};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Storage rooted at a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemStorage {
    location: PathBuf,
    prefix: Option<String>,
}

impl FileSystemStorage {
    /// Create a storage rooted at `location`
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            prefix: None,
        }
    }

    /// Expose the files under a path prefix
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());
        self
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Absolute location of `name`
    pub fn path(&self, name: &str) -> FinderResult<PathBuf> {
        safe_join(&self.location, name)
    }

    /// Whether `name` exists in this storage
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).map(|p| p.exists()).unwrap_or(false)
    }

    /// Modification time of `name`, if it exists
    pub fn modified_time(&self, name: &str) -> Option<SystemTime> {
        let path = self.path(name).ok()?;
        modified_time(&path)
    }

    /// Every file below the storage root as a `/`-separated relative path.
    ///
    /// Files or directories whose name or relative path matches an ignore
    /// pattern are skipped. A missing root lists nothing.
    pub fn list_files(&self, ignore_patterns: &PatternSet) -> FinderResult<Vec<String>> {
        if !self.location.is_dir() {
            return Ok(vec![]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.location)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                let relative = relative_name(&self.location, entry.path());
                !(ignore_patterns.matches(&name) || ignore_patterns.matches(&relative))
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let context = format!("listing {}", self.location.display());
                match e.into_io_error() {
                    Some(source) => FinderError::io(context, source),
                    None => FinderError::Internal(context),
                }
            })?;
            if entry.file_type().is_file() {
                files.push(relative_name(&self.location, entry.path()));
            }
        }

        files.sort();
        Ok(files)
    }
}

fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    patterns::normalize(&relative.to_string_lossy())
}

/// Join a relative asset name under `root`, refusing to escape it
pub fn safe_join(root: &Path, name: &str) -> FinderResult<PathBuf> {
    let name = patterns::normalize(name);
    let relative = Path::new(&name);
    let mut joined = root.to_path_buf();

    for component in relative.components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FinderError::path_invalid(
                    relative,
                    format!("outside of {}", root.display()),
                ));
            }
        }
    }

    Ok(joined)
}

/// Modification time of `path`, `None` if it cannot be read
pub fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
