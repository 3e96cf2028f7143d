//! Core data types for the sceneforge illustration pipeline.
//!
//! This crate holds the pieces every other crate agrees on: how a script is cut
//! into scenes, how each scene is named on disk, and the run value object that
//! carries scenes through the prompt and image phases.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunker;
mod degraded;
mod filename;
mod report;
mod run;
mod scene;

pub use chunker::split_script;
pub use degraded::{DegradedPrompt, DegradedReason};
pub use filename::scene_filename;
pub use report::{RunReport, SceneResult};
pub use run::{PipelineRun, RunSettings, RunSettingsBuilder, RunSettingsBuilderError};
pub use scene::{Scene, SceneImage, ScenePrompt};
