//! Illustration synthesis from image prompts.

use sceneforge_core::DegradedReason;
use sceneforge_error::{SceneforgeError, SceneforgeErrorKind, StorageErrorKind};
use sceneforge_interface::{AspectRatio, GenerationOutcome, ImageDriver, ImageRequest};
use sceneforge_storage::ImageStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates one image per prompt and persists it through an [`ImageStore`].
#[derive(Clone)]
pub struct ImageSynthesizer {
    driver: Arc<dyn ImageDriver>,
    store: Arc<dyn ImageStore>,
    aspect_ratio: AspectRatio,
}

impl ImageSynthesizer {
    /// Creates a synthesizer producing 16:9 images.
    pub fn new(driver: Arc<dyn ImageDriver>, store: Arc<dyn ImageStore>) -> Self {
        Self {
            driver,
            store,
            aspect_ratio: AspectRatio::Landscape,
        }
    }

    /// Overrides the requested aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Generates and stores the image for one scene.
    ///
    /// Every failure is returned as a [`DegradedReason`]; nothing is retried.
    #[instrument(skip(self, prompt), fields(model = %model_id, prompt_len = prompt.len()))]
    pub async fn synthesize(
        &self,
        prompt: &str,
        filename: &str,
        model_id: &str,
    ) -> Result<PathBuf, DegradedReason> {
        let request = ImageRequest::new(model_id, prompt, self.aspect_ratio);

        let payload = match self.driver.generate_image(&request).await {
            GenerationOutcome::Payload(payload) => payload,
            GenerationOutcome::NoPayload => return Err(DegradedReason::NoImagePayload),
            GenerationOutcome::RateLimited => return Err(DegradedReason::RateLimited),
            GenerationOutcome::Failed(e) => {
                return Err(match e.kind.status_code() {
                    Some(status) => DegradedReason::HttpStatus(status),
                    None => DegradedReason::Transport(e.kind.to_string()),
                });
            }
        };

        debug!(mime_type = %payload.mime_type(), size = payload.data().len(), "Received image");

        self.store
            .store(filename, payload.data())
            .await
            .map_err(|e| storage_reason(&e))
    }
}

fn storage_reason(error: &SceneforgeError) -> DegradedReason {
    match error.kind() {
        SceneforgeErrorKind::Storage(storage) => match &storage.kind {
            StorageErrorKind::ImageDecode(message) => DegradedReason::Decode(message.clone()),
            other => DegradedReason::Persist(other.to_string()),
        },
        other => DegradedReason::Persist(other.to_string()),
    }
}
