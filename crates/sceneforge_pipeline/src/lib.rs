//! The sceneforge pipeline.
//!
//! A run splits a script into scenes, synthesizes one image prompt per scene,
//! then one image per prompt. Each phase fans out through a [`Dispatcher`]
//! bounded to a fixed number of concurrent calls and fans back in sorted by
//! scene index. Individual scenes degrade or drop; the run itself only fails
//! on preconditions checked before any work is dispatched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatcher;
mod image_synthesizer;
mod prompt_synthesizer;
mod runner;

pub use dispatcher::{Dispatcher, Keyed, ProgressCallback, ProgressSpan};
pub use image_synthesizer::ImageSynthesizer;
pub use prompt_synthesizer::{DEFAULT_RATE_LIMIT_PAUSE, PromptSynthesizer, build_instruction};
pub use runner::{MAX_PROMPT_WORKERS, PipelineRunner};
