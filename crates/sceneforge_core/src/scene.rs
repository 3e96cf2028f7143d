//! Scene value types.

use crate::{DegradedPrompt, DegradedReason, scene_filename};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One contiguous segment of the narration script.
///
/// Scenes are numbered from 1 in script order. The filename is derived once
/// at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position in the script.
    index: usize,
    /// Chunk text exactly as produced by the chunker.
    text: String,
    /// Output filename, e.g. `S001_Hello world.png`.
    filename: String,
    /// Prompt produced for this scene, once the prompt phase has run.
    prompt: Option<ScenePrompt>,
    /// Where the image landed, once the image phase stored it.
    image_path: Option<PathBuf>,
}

impl Scene {
    /// Creates a scene with no prompt and no image yet.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let filename = scene_filename(index, &text);
        Self {
            index,
            text,
            filename,
            prompt: None,
            image_path: None,
        }
    }

    /// True once an image has been stored for this scene.
    pub fn has_image(&self) -> bool {
        self.image_path.is_some()
    }

    pub(crate) fn set_prompt(&mut self, prompt: ScenePrompt) -> bool {
        if self.prompt.is_some() {
            return false;
        }
        self.prompt = Some(prompt);
        true
    }

    pub(crate) fn set_image_path(&mut self, path: PathBuf) -> bool {
        if self.image_path.is_some() {
            return false;
        }
        self.image_path = Some(path);
        true
    }
}

/// Prompt phase result for one scene.
///
/// Either a prompt generated by the text model or a degraded fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePrompt {
    index: usize,
    outcome: Result<String, DegradedPrompt>,
}

impl ScenePrompt {
    /// A prompt the text model produced.
    pub fn generated(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            outcome: Ok(text.into()),
        }
    }

    /// A fallback used in place of a generated prompt.
    pub fn degraded(index: usize, reason: DegradedReason, fallback: impl Into<String>) -> Self {
        Self {
            index,
            outcome: Err(DegradedPrompt::new(reason, fallback)),
        }
    }

    /// Scene index this prompt belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Text handed to the image phase, generated or fallback.
    pub fn text(&self) -> &str {
        match &self.outcome {
            Ok(text) => text,
            Err(degraded) => degraded.fallback(),
        }
    }

    /// The degradation, if this prompt is a fallback.
    pub fn degraded_prompt(&self) -> Option<&DegradedPrompt> {
        self.outcome.as_ref().err()
    }

    /// True if the text model did not produce this prompt.
    pub fn is_degraded(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Image phase result for one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneImage {
    index: usize,
    path: PathBuf,
}

impl SceneImage {
    /// Records that scene `index` was stored at `path`.
    pub fn new(index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
        }
    }

    /// Scene index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Stored image location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
