//! Provider integrations for sceneforge.
//!
//! Only Google Gemini is supported. [`GeminiClient`] implements both
//! [`TextDriver`](sceneforge_interface::TextDriver) and
//! [`ImageDriver`](sceneforge_interface::ImageDriver) over the
//! `generateContent` REST endpoint.
//!
//! ```no_run
//! use sceneforge_config::SceneforgeConfig;
//! use sceneforge_interface::{GenerationOutcome, TextDriver};
//! use sceneforge_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SceneforgeConfig::load()?;
//! let client = GeminiClient::from_env(&config)?;
//! if let GenerationOutcome::Payload(text) = client.generate_text("Describe a harbor").await {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    Candidate, Content, GeminiClient, GeminiResult, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, ImageGenerationConfig, InlineData, Part,
    classify_image, classify_text,
};
