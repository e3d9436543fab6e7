//! CLI command implementations

pub mod cache;
pub mod collect;
pub mod config;
pub mod find;
pub mod list;

pub use cache::execute as cache;
pub use collect::execute as collect;
pub use config::execute as config;
pub use find::execute as find;
pub use list::execute as list;
