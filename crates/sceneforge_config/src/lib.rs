//! Configuration for the sceneforge pipeline.
//!
//! Values come from the bundled `sceneforge.toml`, then
//! `~/.config/sceneforge/sceneforge.toml`, then `./sceneforge.toml`, each
//! later source overriding the earlier ones.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{
    ApiConfig, ImageConfig, OutputConfig, SceneConfig, SceneforgeConfig, StyleConfig, TextConfig,
    MAX_IMAGE_WORKERS, MAX_SECONDS_PER_SCENE, MIN_SECONDS_PER_SCENE,
};
