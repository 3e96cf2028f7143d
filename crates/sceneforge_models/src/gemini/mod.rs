//! Google Gemini REST client.
//!
//! Requests and responses are typed; every response is classified into a
//! [`GenerationOutcome`](sceneforge_interface::GenerationOutcome) by status
//! code first and body shape second.

mod client;
mod protocol;

pub use client::{GeminiClient, classify_image, classify_text};
pub use protocol::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageGenerationConfig, InlineData, Part,
};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, sceneforge_error::GeminiError>;
