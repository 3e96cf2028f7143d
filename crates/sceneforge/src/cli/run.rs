//! Pipeline and split command handlers.

use super::{RunArgs, ScriptArgs};
use chrono::Utc;
use sceneforge::{
    ConfigError, FileSystemImageStore, GeminiClient, PipelineError, PipelineErrorKind,
    PipelineRunner, ProgressCallback, RunSettingsBuilder, SceneforgeConfig, SceneforgeResult,
    StorageError, StorageErrorKind, scene_filename, split_script, write_archive, write_report,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

impl ScriptArgs {
    /// Reads the script from the file or returns the inline text.
    pub async fn read(&self) -> SceneforgeResult<String> {
        match (&self.script, &self.text) {
            (Some(path), _) => tokio::fs::read_to_string(path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into()
            }),
            (None, Some(text)) => Ok(text.clone()),
            (None, None) => Ok(String::new()),
        }
    }
}

/// Runs the full pipeline and prints the illustrated scenes.
pub async fn run_pipeline(config: &SceneforgeConfig, args: RunArgs) -> SceneforgeResult<()> {
    let mut config = config.clone();
    if let Some(seconds) = args.seconds_per_scene {
        config.scenes.seconds_per_scene = seconds;
    }
    if let Some(workers) = args.workers {
        config.image.workers = workers;
    }
    if let Some(output) = &args.output_dir {
        config.output.base_dir = output.clone();
    }
    config.validate()?;

    let script = args.script.read().await?;

    let api_key = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.api_key_from_env())
        .ok_or_else(|| PipelineError::new(PipelineErrorKind::MissingCredential))?;

    let mut builder = RunSettingsBuilder::default();
    builder
        .style_directive(args.style.unwrap_or_else(|| config.style.directive.clone()))
        .image_model(config.image_model_id(args.image_model.as_deref())?)
        .max_chunk_chars(config.max_chunk_chars())
        .image_workers(config.image.workers)
        .prompt_workers(config.text.workers)
        .require_theme(config.style.require_theme);
    if let Some(theme) = args.theme {
        builder.theme_title(theme);
    }
    let settings = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid run settings: {}", e)))?;

    let client = Arc::new(GeminiClient::new(api_key, &config)?);
    let images_dir = config.images_dir();
    let store = Arc::new(FileSystemImageStore::new(&images_dir));

    let progress: ProgressCallback = Arc::new(|fraction| {
        info!(percent = (fraction * 100.0).round() as u32, "Progress");
    });
    let runner = PipelineRunner::new(client.clone(), client, store)
        .with_rate_limit_pause(Duration::from_millis(config.text.rate_limit_pause_ms))
        .with_aspect_ratio(config.aspect_ratio()?)
        .with_progress(progress);

    let started_at = Utc::now();
    let run = runner.run(&script, settings).await?;
    let report = run.report(started_at);

    let report_path = config.report_path();
    write_report(&report, &report_path).await?;

    for result in report.results() {
        println!("{}", result.path().display());
        println!("  script: {}", result.script());
        println!("  prompt: {}", result.prompt());
    }
    println!();
    println!("Generated {} images", report.summary());
    if *report.degraded_prompts() > 0 {
        println!("{} scenes used fallback prompts", report.degraded_prompts());
    }
    println!("Report: {}", report_path.display());

    if args.archive {
        let archive_path = config.archive_path();
        let size = write_archive(&images_dir, &archive_path).await?;
        println!("Archive: {} ({} bytes)", archive_path.display(), size);
    }

    Ok(())
}

/// Prints the scene split for a script without calling any model.
pub async fn split_command(
    config: &SceneforgeConfig,
    script: ScriptArgs,
    seconds_per_scene: Option<usize>,
) -> SceneforgeResult<()> {
    let mut config = config.clone();
    if let Some(seconds) = seconds_per_scene {
        config.scenes.seconds_per_scene = seconds;
    }
    config.validate()?;

    let text = script.read().await?;
    if text.trim().is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::EmptyScript).into());
    }

    let limit = config.max_chunk_chars();
    let chunks = split_script(&text, limit);
    for (i, chunk) in chunks.iter().enumerate() {
        let index = i + 1;
        println!(
            "{} ({} chars)",
            scene_filename(index, chunk),
            chunk.chars().count()
        );
        println!("  {}", chunk);
    }
    println!();
    println!("{} scenes at up to {} characters each", chunks.len(), limit);
    Ok(())
}
