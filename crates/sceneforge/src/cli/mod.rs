//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the sceneforge binary.

mod commands;
mod package;
mod run;

pub use commands::{Cli, Commands, RunArgs, ScriptArgs};
pub use package::{list_models, package_output};
pub use run::{run_pipeline, split_command};
