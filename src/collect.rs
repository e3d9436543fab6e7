//! The collect step
//!
//! Lists every finder and copies each published path into the static
//! root. When two finders publish the same path the earlier finder wins.

use crate::config::Config;
use crate::error::{FinderError, FinderResult};
use crate::finders::{Finder, ListedFile};
use crate::patterns::PatternSet;
use crate::storage::{self, safe_join};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Options for a collect run
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Report what would be copied without touching the static root
    pub dry_run: bool,
    /// Remove existing static root contents first
    pub clear: bool,
    /// Patterns ignored in addition to the configured ones
    pub extra_ignore_patterns: Vec<String>,
}

/// Outcome of a collect run
#[derive(Debug, Clone, Default)]
pub struct CollectSummary {
    /// Where files were collected to
    pub destination: PathBuf,
    /// Paths copied (or that would be copied on a dry run)
    pub copied: Vec<String>,
    /// Paths skipped because the destination was already current
    pub unmodified: Vec<String>,
    /// Paths skipped because an earlier finder already provided them
    pub duplicates: Vec<String>,
}

/// Copies finder output into the static root
pub struct Collector<'a> {
    finders: &'a [Box<dyn Finder>],
    static_root: PathBuf,
    ignore_patterns: PatternSet,
    options: CollectOptions,
}

impl<'a> Collector<'a> {
    /// Create a collector for `config`, reading from `finders`
    pub fn new(
        config: &Config,
        finders: &'a [Box<dyn Finder>],
        options: CollectOptions,
    ) -> FinderResult<Self> {
        let mut patterns = config.staticfiles.ignore_patterns.clone();
        patterns.extend(options.extra_ignore_patterns.iter().cloned());

        Ok(Self {
            finders,
            static_root: config.static_root(),
            ignore_patterns: PatternSet::new(&patterns)?,
            options,
        })
    }

    pub fn static_root(&self) -> &Path {
        &self.static_root
    }

    /// Run the collection
    pub async fn run(&self) -> FinderResult<CollectSummary> {
        let mut summary = CollectSummary {
            destination: self.static_root.clone(),
            ..CollectSummary::default()
        };

        if self.options.clear {
            self.clear().await?;
        }

        let mut seen = HashSet::new();
        for finder in self.finders {
            debug!("Collecting from {} finder", finder.name());
            for file in finder.list(&self.ignore_patterns).await? {
                let published = file.prefixed_path();
                if !seen.insert(published.clone()) {
                    debug!(
                        "Found another file with the destination path '{}', ignoring it",
                        published
                    );
                    summary.duplicates.push(published);
                    continue;
                }

                if self.copy(&file, &published).await? {
                    summary.copied.push(published);
                } else {
                    summary.unmodified.push(published);
                }
            }
        }

        info!(
            "{} copied, {} unmodified, {} duplicates",
            summary.copied.len(),
            summary.unmodified.len(),
            summary.duplicates.len()
        );
        Ok(summary)
    }

    /// Copy one file. Returns false when the destination was already current.
    async fn copy(&self, file: &ListedFile, published: &str) -> FinderResult<bool> {
        let source = file.source()?;
        let destination = safe_join(&self.static_root, published)?;

        if let (Some(dest_time), Some(src_time)) = (
            storage::modified_time(&destination),
            storage::modified_time(&source),
        ) {
            if dest_time >= src_time {
                debug!("Skipping '{}' (not modified)", published);
                return Ok(false);
            }
        }

        if self.options.dry_run {
            info!("Pretending to copy '{}'", source.display());
            return Ok(true);
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FinderError::io(format!("creating {}", parent.display()), e))?;
        }

        // replace rather than overwrite so links into the cache are not followed
        if destination.exists() {
            fs::remove_file(&destination)
                .await
                .map_err(|e| FinderError::io(format!("removing {}", destination.display()), e))?;
        }

        fs::copy(&source, &destination).await.map_err(|e| {
            FinderError::io(
                format!("copying {} to {}", source.display(), destination.display()),
                e,
            )
        })?;
        debug!("Copying '{}'", source.display());
        Ok(true)
    }

    async fn clear(&self) -> FinderResult<()> {
        if !self.static_root.exists() {
            return Ok(());
        }
        if self.options.dry_run {
            info!("Pretending to clear {}", self.static_root.display());
            return Ok(());
        }

        info!("Clearing {}", self.static_root.display());
        fs::remove_dir_all(&self.static_root).await.map_err(|e| {
            FinderError::io(format!("clearing {}", self.static_root.display()), e)
        })
    }
}
