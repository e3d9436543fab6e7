//! Shell-style pattern matching for asset paths
//!
//! Patterns follow fnmatch rules: `*` and `?` also match `/`, so `*.js`
//! matches `app/main.js`. Matching is case-sensitive.

use crate::error::{FinderError, FinderResult};
use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compile a single pattern, reporting invalid syntax as a config error
pub fn compile(pattern: &str) -> FinderResult<Pattern> {
    Pattern::new(pattern).map_err(|e| FinderError::PatternInvalid {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })
}

/// Whether `path` matches `pattern`
pub fn matches(pattern: &Pattern, path: &str) -> bool {
    pattern.matches_with(path, MATCH_OPTIONS)
}

/// Ordered set of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile every pattern, failing on the first invalid one
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> FinderResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| compile(p.as_ref()))
            .collect::<FinderResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The first pattern matching `path`
    pub fn first_match(&self, path: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| matches(p, path))
    }

    /// Whether any pattern matches `path`
    pub fn matches(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }
}

/// Normalise a requested path to forward slashes
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}
