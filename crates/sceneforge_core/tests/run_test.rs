//! Tests for the pipeline run value object.

use chrono::Utc;
use sceneforge_core::{
    DegradedReason, PipelineRun, RunSettings, RunSettingsBuilder, SceneImage, ScenePrompt,
};

const SCRIPT: &str = "Hello world. This is a test. Another sentence here.";

fn settings(max_chunk_chars: usize) -> anyhow::Result<RunSettings> {
    Ok(RunSettingsBuilder::default()
        .style_directive("ink wash")
        .image_model("gemini-3-pro-image-preview")
        .max_chunk_chars(max_chunk_chars)
        .build()?)
}

#[test]
fn test_scenes_numbered_from_one() -> anyhow::Result<()> {
    let run = PipelineRun::from_script(SCRIPT, settings(20)?);

    let indices: Vec<usize> = run.scenes().iter().map(|s| *s.index()).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(run.scenes()[0].filename(), "S001_Hello world..png");
    assert_eq!(run.scenes()[2].text(), "Another sentence here.");
    Ok(())
}

#[test]
fn test_builder_defaults() -> anyhow::Result<()> {
    let settings = settings(160)?;
    assert_eq!(*settings.image_workers(), 5);
    assert_eq!(*settings.prompt_workers(), 10);
    assert!(settings.theme_title().is_none());
    assert!(!settings.require_theme());
    Ok(())
}

#[test]
fn test_apply_prompts_sets_each_scene_once() -> anyhow::Result<()> {
    let mut run = PipelineRun::from_script(SCRIPT, settings(20)?);

    let applied = run.apply_prompts(vec![
        ScenePrompt::generated(2, "two"),
        ScenePrompt::generated(1, "one"),
        ScenePrompt::generated(1, "duplicate"),
        ScenePrompt::generated(9, "unknown"),
    ]);

    assert_eq!(applied, 2);
    let first = run.scenes()[0].prompt().as_ref().map(|p| p.text().to_string());
    assert_eq!(first.as_deref(), Some("one"));
    assert!(run.scenes()[2].prompt().is_none());
    Ok(())
}

#[test]
fn test_results_only_include_scenes_with_images() -> anyhow::Result<()> {
    let mut run = PipelineRun::from_script(SCRIPT, settings(20)?);
    run.apply_prompts(vec![
        ScenePrompt::generated(1, "one"),
        ScenePrompt::degraded(2, DegradedReason::RateLimited, "Scene depicting: This is a test."),
        ScenePrompt::generated(3, "three"),
    ]);
    run.apply_images(vec![
        SceneImage::new(3, "/tmp/out/S003.png"),
        SceneImage::new(1, "/tmp/out/S001.png"),
    ]);

    let results = run.results();
    let scenes: Vec<usize> = results.iter().map(|r| *r.scene()).collect();
    assert_eq!(scenes, vec![1, 3]);
    assert_eq!(results[1].prompt(), "three");
    assert_eq!(run.degraded_prompts(), 1);

    let report = run.report(Utc::now());
    assert_eq!(report.summary(), "2/3");
    assert_eq!(report.image_model(), "gemini-3-pro-image-preview");
    Ok(())
}

#[test]
fn test_report_serializes_to_json() -> anyhow::Result<()> {
    let mut run = PipelineRun::from_script(SCRIPT, settings(20)?);
    run.apply_prompts(vec![ScenePrompt::generated(1, "one")]);
    run.apply_images(vec![SceneImage::new(1, "/tmp/out/S001.png")]);

    let json = run.report(Utc::now()).to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["total_scenes"], 3);
    assert_eq!(value["results"][0]["filename"], "S001_Hello world..png");
    assert_eq!(value["results"][0]["script"], "Hello world.");
    Ok(())
}

#[test]
fn test_empty_script_has_no_scenes() -> anyhow::Result<()> {
    let run = PipelineRun::from_script("   \n ", settings(20)?);
    assert_eq!(run.total(), 0);
    assert!(run.results().is_empty());
    Ok(())
}
