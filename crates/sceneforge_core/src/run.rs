//! The run value object carried through both pipeline phases.

use crate::{RunReport, Scene, SceneImage, ScenePrompt, SceneResult, split_script};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Per-run parameters chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RunSettings {
    /// Art-direction text injected into every prompt request.
    style_directive: String,

    /// Optional title that anchors prompts to a shared theme.
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    theme_title: Option<String>,

    /// Provider model id used for image generation.
    image_model: String,

    /// Chunk size limit in characters.
    #[builder(default = 160)]
    max_chunk_chars: usize,

    /// Concurrent image requests.
    #[builder(default = 5)]
    image_workers: usize,

    /// Concurrent prompt requests.
    #[builder(default = 10)]
    prompt_workers: usize,

    /// Reject runs that have no theme title.
    #[builder(default)]
    #[serde(default)]
    require_theme: bool,
}

/// One execution of the pipeline over a script.
///
/// The run owns its scenes. Phases return their results to the caller, which
/// applies them here; a scene's prompt and image are each set at most once.
#[derive(Debug, Clone, Getters)]
pub struct PipelineRun {
    settings: RunSettings,
    scenes: Vec<Scene>,
}

impl PipelineRun {
    /// Chunks `script` and numbers the scenes from 1.
    pub fn from_script(script: &str, settings: RunSettings) -> Self {
        let scenes = split_script(script, settings.max_chunk_chars)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Scene::new(i + 1, text))
            .collect();
        Self { settings, scenes }
    }

    /// Number of scenes in the run.
    pub fn total(&self) -> usize {
        self.scenes.len()
    }

    /// Attaches prompt results to their scenes. Returns how many were applied.
    ///
    /// Prompts for unknown indices or scenes that already have one are ignored.
    pub fn apply_prompts(&mut self, prompts: Vec<ScenePrompt>) -> usize {
        let mut applied = 0;
        for prompt in prompts {
            if let Some(scene) = self.scene_mut(prompt.index()) {
                if scene.set_prompt(prompt) {
                    applied += 1;
                }
            }
        }
        applied
    }

    /// Attaches stored image paths to their scenes. Returns how many were applied.
    pub fn apply_images(&mut self, images: Vec<SceneImage>) -> usize {
        let mut applied = 0;
        for image in images {
            if let Some(scene) = self.scene_mut(image.index()) {
                if scene.set_image_path(image.path().to_path_buf()) {
                    applied += 1;
                }
            }
        }
        applied
    }

    /// Scenes that ended with a stored image, in index order.
    pub fn completed(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(|scene| scene.has_image())
    }

    /// Number of scenes whose prompt is a fallback.
    pub fn degraded_prompts(&self) -> usize {
        self.scenes
            .iter()
            .filter(|scene| scene.prompt().as_ref().is_some_and(|p| p.is_degraded()))
            .count()
    }

    /// Result records for every scene with an image, ordered by index.
    pub fn results(&self) -> Vec<SceneResult> {
        self.completed().filter_map(SceneResult::from_scene).collect()
    }

    /// Summarises the run for persistence.
    pub fn report(&self, started_at: DateTime<Utc>) -> RunReport {
        RunReport::new(
            started_at,
            Utc::now(),
            self.settings.image_model.clone(),
            self.total(),
            self.degraded_prompts(),
            self.results(),
        )
    }

    fn scene_mut(&mut self, index: usize) -> Option<&mut Scene> {
        // Indices are contiguous from 1, so position is index - 1.
        index
            .checked_sub(1)
            .and_then(|pos| self.scenes.get_mut(pos))
            .filter(|scene| *scene.index() == index)
    }
}
