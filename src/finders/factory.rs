//! Finder factory
//!
//! Builds the ordered finder list named by `staticfiles.finders`.

use crate::compiled::{CompiledStaticsFinder, SUPPORTED_FINDERS};
use crate::config::Config;
use crate::error::{FinderError, FinderResult};
use crate::finders::app_directories::AppDirectoriesFinder;
use crate::finders::filesystem::FileSystemFinder;
use crate::finders::finder::Finder;
use crate::patterns;
use crate::vendor::VendorFinder;
use std::path::PathBuf;

/// Finder kinds that can be named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderKind {
    FileSystem,
    AppDirectories,
    Vendor,
    Compiled,
}

impl FinderKind {
    /// Parse a configured finder name
    pub fn parse(name: &str) -> FinderResult<Self> {
        match name {
            "filesystem" => Ok(Self::FileSystem),
            "app_directories" => Ok(Self::AppDirectories),
            "vendor" => Ok(Self::Vendor),
            "compiled" => Ok(Self::Compiled),
            other => Err(FinderError::UnknownFinder(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FileSystem => "filesystem",
            Self::AppDirectories => "app_directories",
            Self::Vendor => "vendor",
            Self::Compiled => "compiled",
        }
    }
}

fn create_upstream(kind: FinderKind, config: &Config) -> Box<dyn Finder> {
    match kind {
        FinderKind::AppDirectories => Box::new(AppDirectoriesFinder::from_config(config)),
        _ => Box::new(FileSystemFinder::from_config(config)),
    }
}

/// Create every configured finder, in configured order.
///
/// The compiled finder wraps its own instances of whichever supported
/// filesystem finders are also configured.
pub fn create_finders(config: &Config) -> FinderResult<Vec<Box<dyn Finder>>> {
    let kinds = config
        .staticfiles
        .finders
        .iter()
        .map(|name| FinderKind::parse(name))
        .collect::<FinderResult<Vec<_>>>()?;

    let mut finders: Vec<Box<dyn Finder>> = Vec::with_capacity(kinds.len());
    for kind in &kinds {
        let finder: Box<dyn Finder> = match kind {
            FinderKind::FileSystem | FinderKind::AppDirectories => create_upstream(*kind, config),
            FinderKind::Vendor => Box::new(VendorFinder::from_config(config)?),
            FinderKind::Compiled => {
                let upstream = kinds
                    .iter()
                    .filter(|k| SUPPORTED_FINDERS.contains(&k.name()))
                    .map(|k| create_upstream(*k, config))
                    .collect();
                Box::new(CompiledStaticsFinder::from_config(config, upstream)?)
            }
        };
        finders.push(finder);
    }

    Ok(finders)
}

/// Locate `path` through `finders` in order.
///
/// Without `all` the first finder that knows the path wins; with `all`
/// every location from every finder is returned.
pub async fn find(finders: &[Box<dyn Finder>], path: &str, all: bool) -> FinderResult<Vec<PathBuf>> {
    let path = patterns::normalize(path);
    let mut found = Vec::new();

    for finder in finders {
        let result = finder.find(&path, all).await?;
        if result.is_empty() {
            continue;
        }
        if !all {
            return Ok(result.into_iter().take(1).collect());
        }
        found.extend(result);
    }

    Ok(found)
}
