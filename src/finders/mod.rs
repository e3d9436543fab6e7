//! Static file finders
//!
//! - `filesystem`: explicitly configured static directories
//! - `app_directories`: the `static/` directory of each application
//! - `vendor` and `compiled` live in their own modules

pub mod app_directories;
mod factory;
pub mod filesystem;
mod finder;

pub use app_directories::AppDirectoriesFinder;
pub use factory::{create_finders, find, FinderKind};
pub use filesystem::FileSystemFinder;
pub use finder::{Finder, ListedFile};
