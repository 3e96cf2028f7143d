//! Run orchestration: validate, chunk, prompt phase, image phase.

use crate::{Dispatcher, ImageSynthesizer, ProgressCallback, ProgressSpan, PromptSynthesizer};
use sceneforge_config::MAX_IMAGE_WORKERS;
use sceneforge_core::{PipelineRun, RunSettings, SceneImage, ScenePrompt};
use sceneforge_error::{PipelineError, PipelineErrorKind, SceneforgeResult};
use sceneforge_interface::{AspectRatio, ImageDriver, TextDriver};
use sceneforge_storage::ImageStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Largest accepted prompt worker pool.
pub const MAX_PROMPT_WORKERS: usize = 32;

/// Drives one script through both phases.
///
/// # Example
///
/// ```no_run
/// use sceneforge_core::RunSettingsBuilder;
/// use sceneforge_pipeline::PipelineRunner;
/// use sceneforge_storage::FileSystemImageStore;
/// # use std::sync::Arc;
/// # async fn demo(
/// #     text: Arc<dyn sceneforge_interface::TextDriver>,
/// #     image: Arc<dyn sceneforge_interface::ImageDriver>,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(FileSystemImageStore::new("./web_result_files/output_images"));
/// let runner = PipelineRunner::new(text, image, store);
///
/// let settings = RunSettingsBuilder::default()
///     .style_directive("watercolor")
///     .image_model("gemini-2.5-flash-image")
///     .build()?;
/// let run = runner.run("It was late. The harbor was quiet.", settings).await?;
/// println!("{}/{} scenes illustrated", run.completed().count(), run.total());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PipelineRunner {
    prompts: Arc<PromptSynthesizer>,
    images: Arc<ImageSynthesizer>,
    store: Arc<dyn ImageStore>,
    progress: Option<ProgressCallback>,
}

impl PipelineRunner {
    /// Creates a runner over the given backends and store.
    pub fn new(
        text: Arc<dyn TextDriver>,
        image: Arc<dyn ImageDriver>,
        store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            prompts: Arc::new(PromptSynthesizer::new(text)),
            images: Arc::new(ImageSynthesizer::new(image, Arc::clone(&store))),
            store,
            progress: None,
        }
    }

    /// Overrides the pause taken after a rate-limited prompt request.
    pub fn with_rate_limit_pause(mut self, pause: Duration) -> Self {
        let prompts = (*self.prompts).clone().with_rate_limit_pause(pause);
        self.prompts = Arc::new(prompts);
        self
    }

    /// Overrides the image aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        let images = (*self.images).clone().with_aspect_ratio(aspect_ratio);
        self.images = Arc::new(images);
        self
    }

    /// Reports overall progress after every completed scene in either phase.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Checks run preconditions. Nothing is dispatched or written if this fails.
    pub fn validate(script: &str, settings: &RunSettings) -> SceneforgeResult<()> {
        if script.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyScript).into());
        }
        let has_theme = settings
            .theme_title()
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if *settings.require_theme() && !has_theme {
            return Err(PipelineError::new(PipelineErrorKind::MissingTheme).into());
        }
        if settings.image_model().trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::MissingImageModel).into());
        }
        if *settings.max_chunk_chars() == 0 {
            return Err(PipelineError::new(PipelineErrorKind::InvalidChunkSize).into());
        }
        check_width(*settings.image_workers(), MAX_IMAGE_WORKERS)?;
        check_width(*settings.prompt_workers(), MAX_PROMPT_WORKERS)?;
        Ok(())
    }

    /// Executes a full run.
    ///
    /// Once preconditions pass, the run always completes; scenes whose image
    /// failed are simply absent from [`PipelineRun::results`].
    #[instrument(skip(self, script, settings), fields(
        script_len = script.len(),
        image_model = %settings.image_model(),
        max_chunk_chars = settings.max_chunk_chars(),
    ))]
    pub async fn run(&self, script: &str, settings: RunSettings) -> SceneforgeResult<PipelineRun> {
        Self::validate(script, &settings)?;

        let mut run = PipelineRun::from_script(script, settings);
        self.store.prepare().await?;
        info!(scenes = run.total(), "Script split into scenes");

        let prompts = self.prompt_phase(&run).await;
        let applied = run.apply_prompts(prompts);
        info!(
            prompts = applied,
            degraded = run.degraded_prompts(),
            "Prompt phase complete"
        );

        let images = self.image_phase(&run).await;
        let applied = run.apply_images(images);
        info!(
            images = applied,
            total = run.total(),
            "Image phase complete: {}/{} scenes illustrated",
            applied,
            run.total()
        );

        Ok(run)
    }

    fn dispatcher(&self, width: usize, span: ProgressSpan) -> Dispatcher {
        let dispatcher = Dispatcher::new(width);
        match &self.progress {
            Some(progress) => dispatcher.with_progress(span, Arc::clone(progress)),
            None => dispatcher,
        }
    }

    async fn prompt_phase(&self, run: &PipelineRun) -> Vec<ScenePrompt> {
        let settings = run.settings();
        let style: Arc<str> = Arc::from(settings.style_directive().as_str());
        let theme: Option<Arc<str>> = settings
            .theme_title()
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(Arc::from);
        let items: Vec<(usize, String)> = run
            .scenes()
            .iter()
            .map(|scene| (*scene.index(), scene.text().clone()))
            .collect();

        let synthesizer = Arc::clone(&self.prompts);
        self.dispatcher(*settings.prompt_workers(), ProgressSpan::PROMPTS)
            .dispatch(items, move |(index, text)| {
                let synthesizer = Arc::clone(&synthesizer);
                let style = Arc::clone(&style);
                let theme = theme.clone();
                async move {
                    Some(
                        synthesizer
                            .synthesize(&text, index, &style, theme.as_deref())
                            .await,
                    )
                }
            })
            .await
    }

    async fn image_phase(&self, run: &PipelineRun) -> Vec<SceneImage> {
        let settings = run.settings();
        let model: Arc<str> = Arc::from(settings.image_model().as_str());
        let items: Vec<(usize, String, String)> = run
            .scenes()
            .iter()
            .filter_map(|scene| {
                let prompt = scene.prompt().as_ref()?;
                Some((*scene.index(), prompt.text().to_string(), scene.filename().clone()))
            })
            .collect();

        let synthesizer = Arc::clone(&self.images);
        self.dispatcher(*settings.image_workers(), ProgressSpan::IMAGES)
            .dispatch(items, move |(index, prompt, filename)| {
                let synthesizer = Arc::clone(&synthesizer);
                let model = Arc::clone(&model);
                async move {
                    match synthesizer.synthesize(&prompt, &filename, &model).await {
                        Ok(path) => Some(SceneImage::new(index, path)),
                        Err(reason) => {
                            warn!(scene = index, filename = %filename, %reason, "Scene dropped");
                            None
                        }
                    }
                }
            })
            .await
    }
}

fn check_width(count: usize, max: usize) -> SceneforgeResult<()> {
    if (1..=max).contains(&count) {
        Ok(())
    } else {
        Err(PipelineError::new(PipelineErrorKind::InvalidWorkerCount { count, max }).into())
    }
}
