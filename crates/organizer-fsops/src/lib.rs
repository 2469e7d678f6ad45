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
#![allow(clippy::module_name_repetitions)]

//! Filesystem discovery for the organizer: directory traversal and per-file metadata.

pub mod error;
pub mod metadata;
pub mod model;
pub mod scanner;

pub use error::{FsOpsError, FsOpsResult};
pub use metadata::FileMetadataReader;
pub use model::{DiscoveryResult, FileRecord};
pub use scanner::DirectoryScanner;
