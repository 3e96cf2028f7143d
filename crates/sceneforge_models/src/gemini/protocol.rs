//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; sceneforge always sends a single entry.
    pub contents: Vec<Content>,
    /// Generation options, image requests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-part text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            generation_config: None,
        }
    }

    /// A single-prompt image request with a fixed aspect ratio.
    pub fn image(prompt: impl Into<String>, aspect_ratio: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            generation_config: Some(GenerationConfig {
                image_config: ImageGenerationConfig {
                    aspect_ratio: aspect_ratio.into(),
                },
            }),
        }
    }
}

/// Generation options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Image output options.
    pub image_config: ImageGenerationConfig,
}

/// Image output options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationConfig {
    /// Aspect ratio such as `16:9`.
    pub aspect_ratio: String,
}

/// One content entry of a request or candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Content parts in order.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

/// A text part or an inline binary part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 encoded binary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. `image/png`.
    #[serde(default)]
    pub mime_type: String,
    /// Base64 payload.
    pub data: String,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate completions.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Candidate {
    /// Candidate content; absent when the candidate was blocked.
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// First inline payload among the first candidate's parts.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::text("hi")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn test_image_request_carries_aspect_ratio() {
        let body = serde_json::to_value(GenerateContentRequest::image("a cat", "16:9")).unwrap();
        assert_eq!(
            body["generationConfig"]["imageConfig"]["aspectRatio"],
            json!("16:9")
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], json!("a cat"));
    }

    #[test]
    fn test_first_text_reads_first_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "one"}, {"text": "two"}]}}]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("one"));
    }

    #[test]
    fn test_first_inline_data_skips_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"text": "here you go"},
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
            ]}}]
        }))
        .unwrap();
        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "AAAA");
        assert_eq!(response.first_text(), Some("here you go"));
    }

    #[test]
    fn test_missing_fields_parse_to_none() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.first_text(), None);

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(response.first_inline_data(), None);
    }
}
