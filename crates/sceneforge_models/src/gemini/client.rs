//! REST client for `generateContent`.

use super::{GeminiResult, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use sceneforge_config::SceneforgeConfig;
use sceneforge_error::{GeminiError, GeminiErrorKind};
use sceneforge_interface::{
    GenerationOutcome, ImageDriver, ImagePayload, ImageRequest, TextDriver,
};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "gemini";
const MAX_ERROR_BODY: usize = 512;

/// Gemini client serving both text and image generation.
///
/// The text model is fixed at construction; the image model travels with
/// each [`ImageRequest`].
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    #[instrument(skip(api_key, config), fields(text_model = %config.text.model))]
    pub fn new(api_key: impl Into<String>, config: &SceneforgeConfig) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey(
                config.api.api_key_env.clone(),
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(base_url = %config.api.base_url, "Created Gemini client");

        Ok(Self {
            client,
            api_key,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            text_model: config.text.model.clone(),
        })
    }

    /// Creates a client reading the key from the configured environment variable.
    pub fn from_env(config: &SceneforgeConfig) -> GeminiResult<Self> {
        let api_key = config.api_key_from_env().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::MissingApiKey(
                config.api.api_key_env.clone(),
            ))
        })?;
        Self::new(api_key, config)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Posts a request and returns the raw status and body.
    async fn post(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GeminiResult<(u16, String)> {
        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.without_url().to_string())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ResponseParse(e.without_url().to_string())))?;

        debug!(status, body_len = body.len(), "Received Gemini response");
        Ok((status, body))
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.text_model, prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> GenerationOutcome<String> {
        let request = GenerateContentRequest::text(prompt);
        match self.post(&self.text_model, &request).await {
            Ok((status, body)) => classify_text(status, &body),
            Err(e) => {
                warn!(error = %e, "Text request failed");
                GenerationOutcome::Failed(e)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}

#[async_trait]
impl ImageDriver for GeminiClient {
    #[instrument(skip(self, request), fields(model = %request.model()))]
    async fn generate_image(&self, request: &ImageRequest) -> GenerationOutcome<ImagePayload> {
        let body = GenerateContentRequest::image(
            request.prompt().as_str(),
            request.aspect_ratio().to_string(),
        );
        match self.post(request.model(), &body).await {
            Ok((status, body)) => classify_image(status, &body),
            Err(e) => {
                warn!(error = %e, "Image request failed");
                GenerationOutcome::Failed(e)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Classifies a text-generation response.
///
/// A success body that does not parse, or parses without completion text,
/// counts as [`GenerationOutcome::NoPayload`].
pub fn classify_text(status: u16, body: &str) -> GenerationOutcome<String> {
    match parse_success(status, body) {
        Ok(Some(response)) => match response.first_text().map(str::trim) {
            Some(text) if !text.is_empty() => GenerationOutcome::Payload(text.to_string()),
            _ => GenerationOutcome::NoPayload,
        },
        Ok(None) => GenerationOutcome::NoPayload,
        Err(outcome) => outcome,
    }
}

/// Classifies an image-generation response and decodes the inline payload.
pub fn classify_image(status: u16, body: &str) -> GenerationOutcome<ImagePayload> {
    let response = match parse_success(status, body) {
        Ok(Some(response)) => response,
        Ok(None) => return GenerationOutcome::NoPayload,
        Err(outcome) => return outcome,
    };
    let Some(inline) = response.first_inline_data() else {
        return GenerationOutcome::NoPayload;
    };
    match STANDARD.decode(inline.data.as_bytes()) {
        Ok(data) if !data.is_empty() => {
            GenerationOutcome::Payload(ImagePayload::new(inline.mime_type.clone(), data))
        }
        Ok(_) => GenerationOutcome::NoPayload,
        Err(e) => GenerationOutcome::Failed(GeminiError::new(GeminiErrorKind::Base64Decode(
            e.to_string(),
        ))),
    }
}

/// Splits on status: a parsed body (or `None` if unparseable) for 2xx, an
/// outcome for everything else.
fn parse_success<T>(
    status: u16,
    body: &str,
) -> Result<Option<GenerateContentResponse>, GenerationOutcome<T>> {
    match status {
        200..=299 => match serde_json::from_str::<GenerateContentResponse>(body) {
            Ok(response) => Ok(Some(response)),
            Err(e) => {
                debug!(error = %e, "Success body did not match the response schema");
                Ok(None)
            }
        },
        429 => Err(GenerationOutcome::RateLimited),
        status_code => Err(GenerationOutcome::Failed(GeminiError::new(
            GeminiErrorKind::HttpError {
                status_code,
                message: truncate(body, MAX_ERROR_BODY),
            },
        ))),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
