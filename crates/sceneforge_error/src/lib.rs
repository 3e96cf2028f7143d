//! Error types for sceneforge.
//!
//! This crate provides the foundation error types used throughout the sceneforge workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use sceneforge_error::{PipelineError, PipelineErrorKind, SceneforgeResult};
//!
//! fn check_script(script: &str) -> SceneforgeResult<()> {
//!     if script.trim().is_empty() {
//!         Err(PipelineError::new(PipelineErrorKind::EmptyScript))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_script("  ").is_err());
//! assert!(check_script("It rained.").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod json;
mod pipeline;
mod storage;

pub use config::ConfigError;
pub use error::{SceneforgeError, SceneforgeErrorKind, SceneforgeResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use storage::{StorageError, StorageErrorKind};
