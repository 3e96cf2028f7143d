//! Output handling for sceneforge runs.
//!
//! - [`ImageStore`] / [`FileSystemImageStore`]: the per-run image directory,
//!   reset at the start of every run, with atomic PNG writes
//! - [`archive_directory`] / [`write_archive`]: flattened zip packaging
//! - [`write_report`]: JSON run report persistence

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod filesystem;
mod report;
mod storage;

pub use archive::{archive_directory, write_archive};
pub use filesystem::FileSystemImageStore;
pub use report::write_report;
pub use storage::ImageStore;
