//! Compiled statics finder
//!
//! Wraps the filesystem finders and, for paths matching the compile map,
//! serves a compiled copy from the finder cache instead of the source.
//!
//! # Freshness
//!
//! | Cache output              | Action                  |
//! |---------------------------|-------------------------|
//! | missing                   | compile                 |
//! | older than the source     | compile                 |
//! | same age or newer         | serve cached output     |
//!
//! Equal timestamps count as fresh, so on filesystems with coarse mtime
//! resolution an edit landing in the same tick as the compile is not
//! picked up until the source is touched again.
//! Modification time is the only signal. A failed compile leaves no output
//! behind, so the next lookup tries again.

mod command;

pub use command::CommandTemplate;

use crate::config::Config;
use crate::error::{FinderError, FinderResult};
use crate::finders::{Finder, ListedFile};
use crate::patterns::{self, PatternSet};
use crate::storage::{self, safe_join, FileSystemStorage};
use async_trait::async_trait;
use glob::Pattern;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Finders the compiled finder knows how to wrap
pub const SUPPORTED_FINDERS: [&str; 2] = ["filesystem", "app_directories"];

/// A compile-map entry
#[derive(Debug, Clone)]
pub struct CompileRule {
    pub pattern: Pattern,
    pub command: CommandTemplate,
}

/// How a requested path was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No upstream finder has the path
    Missing,
    /// Served as-is from its source
    Source(PathBuf),
    /// Served from the compile cache
    Compiled(PathBuf),
    /// Compiling failed and errors were not requested
    Failed,
}

impl Resolution {
    pub fn location(&self) -> Option<&Path> {
        match self {
            Self::Source(path) | Self::Compiled(path) => Some(path),
            Self::Missing | Self::Failed => None,
        }
    }
}

/// Finder that compiles matching sources into the cache
pub struct CompiledStaticsFinder {
    storage: FileSystemStorage,
    compile_map: Vec<CompileRule>,
    no_compile: PatternSet,
    finders: Vec<Box<dyn Finder>>,
}

impl CompiledStaticsFinder {
    /// Create a finder from configuration over the given upstream finders
    pub fn from_config(config: &Config, finders: Vec<Box<dyn Finder>>) -> FinderResult<Self> {
        let settings = &config.static_finders;
        Self::new(
            config.cache_root(),
            &settings.compile_map_or_default(),
            &settings.no_compile_patterns_or_default(),
            finders,
        )
    }

    /// Create a finder with an explicit compile map.
    ///
    /// Invalid patterns fail construction.
    pub fn new(
        cache_root: impl Into<PathBuf>,
        compile_map: &IndexMap<String, String>,
        no_compile_patterns: &[String],
        finders: Vec<Box<dyn Finder>>,
    ) -> FinderResult<Self> {
        let compile_map = compile_map
            .iter()
            .map(|(pattern, command)| {
                Ok(CompileRule {
                    pattern: patterns::compile(pattern)?,
                    command: CommandTemplate::new(command.as_str()),
                })
            })
            .collect::<FinderResult<Vec<_>>>()?;

        Ok(Self {
            storage: FileSystemStorage::new(cache_root),
            compile_map,
            no_compile: PatternSet::new(no_compile_patterns)?,
            finders,
        })
    }

    pub fn cache_root(&self) -> &Path {
        self.storage.location()
    }

    /// Names of the wrapped finders
    pub fn upstream(&self) -> Vec<&'static str> {
        self.finders.iter().map(|f| f.name()).collect()
    }

    /// First compile rule matching `path`
    pub fn rule_for(&self, path: &str) -> Option<&CompileRule> {
        if self.no_compile.matches(path) {
            return None;
        }
        self.compile_map
            .iter()
            .find(|rule| patterns::matches(&rule.pattern, path))
    }

    async fn find_source(&self, path: &str, all: bool) -> FinderResult<Option<PathBuf>> {
        for finder in &self.finders {
            if let Some(source) = finder.find(path, all).await?.into_iter().next() {
                return Ok(Some(source));
            }
        }
        Ok(None)
    }

    /// Resolve `path`, compiling it when the cached output is stale.
    ///
    /// With `raise_errors` a failed compile is returned as an error,
    /// otherwise it is logged and reported as [`Resolution::Failed`].
    /// Filesystem errors are always returned.
    pub async fn resolve(
        &self,
        path: &str,
        all: bool,
        raise_errors: bool,
    ) -> FinderResult<Resolution> {
        let path = patterns::normalize(path);

        let Some(source) = self.find_source(&path, all).await? else {
            return Ok(Resolution::Missing);
        };

        let Some(rule) = self.rule_for(&path) else {
            return Ok(Resolution::Source(source));
        };

        let out_file = safe_join(self.storage.location(), &path)?;
        if !needs_compile(&out_file, &source) {
            debug!("{} is up to date", out_file.display());
            return Ok(Resolution::Compiled(out_file));
        }

        match compile(rule, &source, &out_file).await {
            Ok(()) => Ok(Resolution::Compiled(out_file)),
            Err(e) => {
                error!("Failed result for {}: {}", path, e);
                if raise_errors || !e.is_compile_error() {
                    Err(e)
                } else {
                    Ok(Resolution::Failed)
                }
            }
        }
    }

    /// `find` with control over compile failures
    pub async fn find_with(
        &self,
        path: &str,
        all: bool,
        raise_errors: bool,
    ) -> FinderResult<Vec<PathBuf>> {
        let resolution = self.resolve(path, all, raise_errors).await?;
        Ok(resolution.location().map(Path::to_path_buf).into_iter().collect())
    }
}

#[async_trait]
impl Finder for CompiledStaticsFinder {
    async fn find(&self, path: &str, all: bool) -> FinderResult<Vec<PathBuf>> {
        self.find_with(path, all, false).await
    }

    /// Upstream listing with compiled paths redirected to the cache.
    /// Compile failures abort the listing.
    async fn list(&self, ignore_patterns: &PatternSet) -> FinderResult<Vec<ListedFile>> {
        let mut listed = Vec::new();

        for finder in &self.finders {
            for file in finder.list(ignore_patterns).await? {
                let published = file.prefixed_path();
                match self.resolve(&published, false, true).await? {
                    Resolution::Compiled(_) => {
                        listed.push(ListedFile::new(published, self.storage.clone()));
                    }
                    Resolution::Source(_) => listed.push(file),
                    Resolution::Missing | Resolution::Failed => {
                        debug!("{} vanished while listing", published);
                    }
                }
            }
        }

        Ok(listed)
    }

    fn name(&self) -> &'static str {
        "compiled"
    }
}

/// Whether `out_file` is missing or older than `source`
pub fn needs_compile(out_file: &Path, source: &Path) -> bool {
    match (storage::modified_time(out_file), storage::modified_time(source)) {
        (None, _) => true,
        (Some(out), Some(src)) => out < src,
        (Some(_), None) => false,
    }
}

async fn compile(rule: &CompileRule, source: &Path, out_file: &Path) -> FinderResult<()> {
    let in_file = std::path::absolute(source)
        .map_err(|e| FinderError::io(format!("resolving {}", source.display()), e))?;
    let out_file = std::path::absolute(out_file)
        .map_err(|e| FinderError::io(format!("resolving {}", out_file.display()), e))?;

    if let Some(parent) = out_file.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FinderError::io(format!("creating {}", parent.display()), e))?;
    }

    let before = storage::modified_time(&out_file);
    let command = rule.command.render(&in_file, &out_file);

    let result = command::run(&command).await;
    if result.is_err() {
        discard_partial_output(&out_file, before).await;
    }
    result
}

/// Remove output a failed command left behind
async fn discard_partial_output(out_file: &Path, before: Option<std::time::SystemTime>) {
    let after = storage::modified_time(out_file);
    if after.is_some() && after != before {
        debug!("Removing partial output {}", out_file.display());
        if let Err(e) = tokio::fs::remove_file(out_file).await {
            error!("Could not remove {}: {}", out_file.display(), e);
        }
    }
}
