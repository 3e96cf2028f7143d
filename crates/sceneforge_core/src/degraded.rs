//! Degraded outcomes for scenes whose provider call did not fully succeed.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Why a scene fell back to a substitute value or was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum DegradedReason {
    /// The provider answered but carried no completion text.
    #[display("completion text missing from response")]
    MissingCompletion,
    /// The provider rejected the call with HTTP 429.
    #[display("rate limited by provider")]
    RateLimited,
    /// A failure carrying a non-success HTTP status.
    #[display("provider returned HTTP {}", _0)]
    HttpStatus(u16),
    /// The call failed before a response was received.
    #[display("transport failure: {}", _0)]
    Transport(String),
    /// The image response carried no inline image data.
    #[display("response carried no image payload")]
    NoImagePayload,
    /// Image bytes could not be decoded.
    #[display("image decode failed: {}", _0)]
    Decode(String),
    /// Image could not be written to disk.
    #[display("image persist failed: {}", _0)]
    Persist(String),
}

/// A prompt that was substituted after the text provider failed.
///
/// The fallback text is still used for image generation so the scene keeps
/// its place in the run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DegradedPrompt {
    /// What went wrong.
    reason: DegradedReason,
    /// Text substituted for the missing prompt.
    fallback: String,
}

impl DegradedPrompt {
    /// Creates a degraded prompt.
    pub fn new(reason: DegradedReason, fallback: impl Into<String>) -> Self {
        Self {
            reason,
            fallback: fallback.into(),
        }
    }
}

impl std::fmt::Display for DegradedPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (fallback: {})", self.reason, self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(
            DegradedReason::HttpStatus(500).to_string(),
            "provider returned HTTP 500"
        );
        assert_eq!(
            DegradedReason::RateLimited.to_string(),
            "rate limited by provider"
        );
    }

    #[test]
    fn test_degraded_prompt_keeps_fallback() {
        let degraded = DegradedPrompt::new(DegradedReason::RateLimited, "Scene depicting: rain");
        assert_eq!(degraded.fallback(), "Scene depicting: rain");
        assert_eq!(degraded.reason(), &DegradedReason::RateLimited);
    }
}
