//! Run summaries written alongside the generated images.

use crate::Scene;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A successfully illustrated scene.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SceneResult {
    /// Scene number.
    scene: usize,
    /// Stored image location.
    path: PathBuf,
    /// Image filename.
    filename: String,
    /// Script text of the scene.
    script: String,
    /// Prompt the image was generated from.
    prompt: String,
}

impl SceneResult {
    /// Builds a result record, or `None` if the scene has no image.
    pub fn from_scene(scene: &Scene) -> Option<Self> {
        let path = scene.image_path().clone()?;
        let prompt = scene
            .prompt()
            .as_ref()
            .map(|p| p.text().to_string())
            .unwrap_or_default();
        Some(Self {
            scene: *scene.index(),
            path,
            filename: scene.filename().clone(),
            script: scene.text().clone(),
            prompt,
        })
    }
}

/// Final record of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RunReport {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    image_model: String,
    total_scenes: usize,
    degraded_prompts: usize,
    results: Vec<SceneResult>,
}

impl RunReport {
    /// Creates a report.
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        image_model: impl Into<String>,
        total_scenes: usize,
        degraded_prompts: usize,
        results: Vec<SceneResult>,
    ) -> Self {
        Self {
            started_at,
            finished_at,
            image_model: image_model.into(),
            total_scenes,
            degraded_prompts,
            results,
        }
    }

    /// Number of scenes that produced an image.
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    /// `"N/total"` summary line.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.succeeded(), self.total_scenes)
    }

    /// Serialises the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
