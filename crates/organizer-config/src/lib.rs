#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! File-backed configuration for the organizer.
//!
//! Layout: `model.rs` (typed settings and registries), `validate.rs`
//! (field parsing helpers), `paths.rs` (path resolution), `folders.rs` and
//! `behavior.rs` (section builders), `loader.rs` (`AppConfig` document loading).

pub mod behavior;
mod defaults;
pub mod error;
pub mod folders;
pub mod loader;
pub mod model;
pub mod paths;
mod validate;

pub use defaults::{ALLOWED_MODES, ALLOWED_MOVE_STRATEGIES};
pub use error::{ConfigError, ConfigResult};
pub use loader::AppConfig;
pub use model::{
    BehaviorSettings, ExtensionSections, FolderSet, Mode, MoveStrategy, ValueRegistry,
};
