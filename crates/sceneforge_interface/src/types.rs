//! Request and outcome types shared by all drivers.

use derive_getters::Getters;
use sceneforge_error::GeminiError;
use serde::{Deserialize, Serialize};

/// Classified answer from a generation call.
#[derive(Debug)]
pub enum GenerationOutcome<T> {
    /// The provider returned the expected content.
    Payload(T),
    /// The call succeeded but the response held no usable content.
    NoPayload,
    /// The provider rejected the call with HTTP 429.
    RateLimited,
    /// Any other failure, remote or local.
    Failed(GeminiError),
}

/// Output aspect ratio for generated images.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum AspectRatio {
    /// 16:9, used for narration videos.
    #[default]
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16.
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Portrait,
    /// 1:1.
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
    /// 4:3.
    #[strum(serialize = "4:3")]
    #[serde(rename = "4:3")]
    Standard,
}

/// One image-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Provider model id.
    model: String,
    /// Image prompt text.
    prompt: String,
    /// Requested aspect ratio.
    #[builder(default)]
    #[serde(default)]
    aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// Creates a request without going through the builder.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            aspect_ratio,
        }
    }
}

/// Raw image returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ImagePayload {
    mime_type: String,
    data: Vec<u8>,
}

impl ImagePayload {
    /// Wraps decoded image bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}
