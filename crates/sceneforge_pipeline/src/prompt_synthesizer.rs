//! Image prompt synthesis from narration chunks.

use sceneforge_core::{DegradedReason, ScenePrompt};
use sceneforge_interface::{GenerationOutcome, TextDriver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Pause after a rate-limited prompt request before falling back.
pub const DEFAULT_RATE_LIMIT_PAUSE: Duration = Duration::from_millis(2000);

/// Turns scene text into an English image prompt with a text model.
///
/// [`synthesize`](Self::synthesize) never fails: every provider problem maps
/// to a degraded prompt whose fallback text still feeds the image phase.
#[derive(Clone)]
pub struct PromptSynthesizer {
    driver: Arc<dyn TextDriver>,
    rate_limit_pause: Duration,
}

impl PromptSynthesizer {
    /// Creates a synthesizer over `driver`.
    pub fn new(driver: Arc<dyn TextDriver>) -> Self {
        Self {
            driver,
            rate_limit_pause: DEFAULT_RATE_LIMIT_PAUSE,
        }
    }

    /// Overrides the pause taken after a rate-limited request.
    pub fn with_rate_limit_pause(mut self, pause: Duration) -> Self {
        self.rate_limit_pause = pause;
        self
    }

    /// Produces the prompt for one scene.
    #[instrument(
        skip(self, chunk, style, theme),
        fields(scene = index, model = %self.driver.model_name(), chunk_len = chunk.len())
    )]
    pub async fn synthesize(
        &self,
        chunk: &str,
        index: usize,
        style: &str,
        theme: Option<&str>,
    ) -> ScenePrompt {
        let instruction = build_instruction(chunk, style, theme);

        match self.driver.generate_text(&instruction).await {
            GenerationOutcome::Payload(text) if !text.trim().is_empty() => {
                debug!(prompt_len = text.len(), "Prompt generated");
                ScenePrompt::generated(index, text.trim())
            }
            GenerationOutcome::Payload(_) | GenerationOutcome::NoPayload => {
                warn!("No completion text, using scene text as prompt");
                ScenePrompt::degraded(index, DegradedReason::MissingCompletion, chunk)
            }
            GenerationOutcome::RateLimited => self.rate_limited(index, chunk).await,
            GenerationOutcome::Failed(e) => match e.kind.status_code() {
                Some(status) => {
                    warn!(status, "Prompt request rejected");
                    ScenePrompt::degraded(
                        index,
                        DegradedReason::HttpStatus(status),
                        format!("Error generating prompt: {}", status),
                    )
                }
                None => {
                    warn!(error = %e.kind, "Prompt request failed");
                    ScenePrompt::degraded(
                        index,
                        DegradedReason::Transport(e.kind.to_string()),
                        format!("Error: {}", e.kind),
                    )
                }
            },
        }
    }

    async fn rate_limited(&self, index: usize, chunk: &str) -> ScenePrompt {
        warn!(
            pause_ms = self.rate_limit_pause.as_millis() as u64,
            "Rate limited, pausing before fallback"
        );
        tokio::time::sleep(self.rate_limit_pause).await;
        ScenePrompt::degraded(
            index,
            DegradedReason::RateLimited,
            format!("Scene depicting: {}", chunk),
        )
    }
}

/// Builds the text-model request for one scene.
///
/// The request names the art-director role, carries the style directive and
/// optional theme, then the scene text, and ends with an `Image Prompt:` cue.
pub fn build_instruction(chunk: &str, style: &str, theme: Option<&str>) -> String {
    let mut instruction = String::from("Instruction:\n[Role]\nYou are an expert AI art director.\n\n");

    instruction.push_str("[Style Guideline]\n");
    instruction.push_str(style.trim());
    instruction.push_str("\n\n");

    if let Some(theme) = theme.map(str::trim).filter(|t| !t.is_empty()) {
        instruction.push_str("[Overall Theme]\n");
        instruction.push_str(&format!(
            "Every scene belongs to \"{}\". Keep characters, palette and setting consistent with it.\n\n",
            theme
        ));
    }

    instruction.push_str(
        "[Task]\n\
         Write a detailed image generation prompt for the script segment below.\n\
         Describe the scene visually in English, focusing on the elements the style guideline asks for.\n\
         Output ONLY the prompt text.\n\n",
    );

    instruction.push_str(&format!("Script Segment:\n\"{}\"\n\nImage Prompt:", chunk));
    instruction
}
