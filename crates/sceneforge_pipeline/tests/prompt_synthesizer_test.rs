//! Tests for prompt synthesis and its fallbacks.

mod test_utils;

use sceneforge_core::DegradedReason;
use sceneforge_pipeline::PromptSynthesizer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use test_utils::{MockTextBehavior, MockTextDriver};

const CHUNK: &str = "The ferry left the harbor at dawn.";

fn synthesizer(behavior: MockTextBehavior) -> (Arc<MockTextDriver>, PromptSynthesizer) {
    let driver = Arc::new(MockTextDriver::new(behavior));
    let synthesizer =
        PromptSynthesizer::new(driver.clone()).with_rate_limit_pause(Duration::ZERO);
    (driver, synthesizer)
}

#[tokio::test]
async fn test_generated_prompt() {
    let (driver, synthesizer) = synthesizer(MockTextBehavior::Echo);

    let prompt = synthesizer.synthesize(CHUNK, 4, "ink wash", None).await;

    assert_eq!(prompt.index(), 4);
    assert!(!prompt.is_degraded());
    assert_eq!(prompt.text(), format!("PROMPT:{CHUNK}"));
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_rate_limited_falls_back_to_scene_depicting() {
    let (driver, synthesizer) = synthesizer(MockTextBehavior::RateLimited);

    let prompt = synthesizer.synthesize(CHUNK, 1, "ink wash", None).await;

    assert_eq!(prompt.text(), format!("Scene depicting: {CHUNK}"));
    assert_eq!(
        prompt.degraded_prompt().map(|d| d.reason().clone()),
        Some(DegradedReason::RateLimited)
    );
    // The call is not retried.
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_rate_limit_pause_is_honored() {
    let driver = Arc::new(MockTextDriver::new(MockTextBehavior::RateLimited));
    let synthesizer =
        PromptSynthesizer::new(driver).with_rate_limit_pause(Duration::from_millis(60));

    let started = Instant::now();
    synthesizer.synthesize(CHUNK, 1, "ink wash", None).await;

    assert!(started.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn test_http_failure_embeds_status() {
    let (_, synthesizer) = synthesizer(MockTextBehavior::Status(500));

    let prompt = synthesizer.synthesize(CHUNK, 2, "ink wash", None).await;

    assert_eq!(prompt.text(), "Error generating prompt: 500");
    assert_eq!(
        prompt.degraded_prompt().map(|d| d.reason().clone()),
        Some(DegradedReason::HttpStatus(500))
    );
}

#[tokio::test]
async fn test_only_rate_limited_outcome_takes_rate_limit_fallback() {
    // Drivers signal rate limiting through the dedicated outcome; a failure
    // carrying a status is always reported as that status.
    let (_, synthesizer) = synthesizer(MockTextBehavior::Status(429));

    let prompt = synthesizer.synthesize(CHUNK, 2, "ink wash", None).await;

    assert_eq!(prompt.text(), "Error generating prompt: 429");
    assert_eq!(
        prompt.degraded_prompt().map(|d| d.reason().clone()),
        Some(DegradedReason::HttpStatus(429))
    );
}

#[tokio::test]
async fn test_transport_failure_embeds_error() {
    let (_, synthesizer) = synthesizer(MockTextBehavior::Transport("connection reset".into()));

    let prompt = synthesizer.synthesize(CHUNK, 3, "ink wash", None).await;

    assert!(prompt.text().starts_with("Error: "));
    assert!(prompt.text().contains("connection reset"));
    assert!(matches!(
        prompt.degraded_prompt().map(|d| d.reason()),
        Some(DegradedReason::Transport(_))
    ));
}

#[tokio::test]
async fn test_missing_completion_uses_chunk() {
    let (_, synthesizer) = synthesizer(MockTextBehavior::NoPayload);

    let prompt = synthesizer.synthesize(CHUNK, 5, "ink wash", Some("Harbor")).await;

    assert_eq!(prompt.text(), CHUNK);
    assert_eq!(
        prompt.degraded_prompt().map(|d| d.reason().clone()),
        Some(DegradedReason::MissingCompletion)
    );
}
