//! static-finders
//!
//! Finders for a static asset pipeline: a vendor finder that downloads
//! third-party files into a local cache, and a compiled finder that runs an
//! external command over matching sources and serves the cached output.

pub mod cli;
pub mod collect;
pub mod compiled;
pub mod config;
pub mod error;
pub mod finders;
pub mod patterns;
pub mod storage;
pub mod ui;
pub mod vendor;

pub use compiled::CompiledStaticsFinder;
pub use error::{FinderError, FinderResult};
pub use finders::{Finder, ListedFile};
pub use storage::FileSystemStorage;
pub use vendor::VendorFinder;
