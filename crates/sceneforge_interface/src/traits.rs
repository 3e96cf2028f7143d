//! Trait definitions for generation backends.

use crate::{GenerationOutcome, ImagePayload, ImageRequest};
use async_trait::async_trait;

/// Backend that turns an instruction into text.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Sends one text-generation request.
    async fn generate_text(&self, prompt: &str) -> GenerationOutcome<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-pro").
    fn model_name(&self) -> &str;
}

/// Backend that turns a prompt into image bytes.
///
/// The model is chosen per request, so one driver serves every image model a
/// provider offers.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Sends one image-generation request.
    async fn generate_image(&self, request: &ImageRequest) -> GenerationOutcome<ImagePayload>;

    /// Provider name.
    fn provider_name(&self) -> &'static str;
}
