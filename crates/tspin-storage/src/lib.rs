//! Storage abstraction for the tspin guide engine.
//!
//! Provides the [`Storage`] trait for reading and writing flat text content
//! (pages and boards), the [`FsStorage`] filesystem backend, and a
//! [`MockStorage`] for tests behind the `mock` feature.
//!
//! # Path Convention
//!
//! All path parameters are **content paths**: slash-separated relative paths
//! under the content root, e.g. `"basics/overview/page.txt"` or
//! `"basics/overview/boards/main.txt"`. Document paths are the parent
//! directories of [`PAGE_FILE`] markers, e.g. `"basics/overview"`.

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{BOARDS_DIR, PAGE_FILE, RESERVED_DIRS, Storage, StorageError, StorageErrorKind};
