//! The finder contract
//!
//! Every source of statics answers two questions: where does a single path
//! live (`find`), and which paths can it provide (`list`).

use crate::error::FinderResult;
use crate::patterns::PatternSet;
use crate::storage::FileSystemStorage;
use async_trait::async_trait;
use std::path::PathBuf;

/// A path a finder can provide, paired with the storage holding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    /// Path relative to the storage root
    pub path: String,
    /// Storage the file is read from
    pub storage: FileSystemStorage,
}

impl ListedFile {
    pub fn new(path: impl Into<String>, storage: FileSystemStorage) -> Self {
        Self {
            path: path.into(),
            storage,
        }
    }

    /// Path the file is published under, including the storage prefix
    pub fn prefixed_path(&self) -> String {
        match self.storage.prefix() {
            Some(prefix) => format!("{}/{}", prefix, self.path),
            None => self.path.clone(),
        }
    }

    /// Absolute location of the file
    pub fn source(&self) -> FinderResult<PathBuf> {
        self.storage.path(&self.path)
    }
}

/// Source of static files
#[async_trait]
pub trait Finder: Send + Sync {
    /// Locate `path`.
    ///
    /// Returns an empty vector when the path is unknown. Unless `all` is set,
    /// at most one location is returned.
    async fn find(&self, path: &str, all: bool) -> FinderResult<Vec<PathBuf>>;

    /// Every file this finder can provide
    async fn list(&self, ignore_patterns: &PatternSet) -> FinderResult<Vec<ListedFile>>;

    /// Short name used in configuration and output
    fn name(&self) -> &'static str;
}
