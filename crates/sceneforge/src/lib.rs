//! sceneforge - narration scripts to scene illustrations.
//!
//! A script is split into scenes sized to a target narration time, each scene
//! gets an English image prompt from a Gemini text model, and each prompt is
//! rendered by a Gemini image model. Results come back in script order and can
//! be packaged into a single zip archive.
//!
//! # Architecture
//!
//! sceneforge is organized as a workspace with focused crates:
//!
//! - `sceneforge_error` - Error types
//! - `sceneforge_core` - Scenes, chunking, filenames, run reports
//! - `sceneforge_interface` - `TextDriver` / `ImageDriver` traits
//! - `sceneforge_config` - Layered TOML configuration
//! - `sceneforge_models` - Gemini REST client
//! - `sceneforge_storage` - Image directory, archive packaging
//! - `sceneforge_pipeline` - Dispatcher, synthesizers, run orchestration
//!
//! This crate re-exports everything for convenience and ships the
//! `sceneforge` binary.

pub use sceneforge_config::*;
pub use sceneforge_core::*;
pub use sceneforge_error::*;
pub use sceneforge_interface::*;
pub use sceneforge_models::*;
pub use sceneforge_pipeline::*;
pub use sceneforge_storage::*;

pub mod observability;
