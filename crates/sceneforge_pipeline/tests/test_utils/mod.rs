//! Test utilities for pipeline tests.
//!
//! Mock text and image drivers with configurable behavior and call counters.

#![allow(dead_code)]

use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use sceneforge_error::{GeminiError, GeminiErrorKind};
use sceneforge_interface::{GenerationOutcome, ImageDriver, ImagePayload, ImageRequest, TextDriver};
use std::collections::HashSet;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Pulls the scene text back out of a prompt instruction.
pub fn chunk_of(instruction: &str) -> String {
    instruction
        .split_once("Script Segment:\n\"")
        .and_then(|(_, rest)| rest.rsplit_once("\"\n\nImage Prompt:"))
        .map(|(chunk, _)| chunk.to_string())
        .unwrap_or_default()
}

/// Small deterministic delay that varies with `seed`, so completion order
/// differs from dispatch order.
pub fn jitter(seed: usize) -> Duration {
    Duration::from_millis(((seed * 7919) % 13) as u64 + 1)
}

/// Behavior configuration for the mock text driver.
#[derive(Debug, Clone)]
pub enum MockTextBehavior {
    /// Answer `PROMPT:<chunk>`
    Echo,
    /// Answer 429
    RateLimited,
    /// Answer success without completion text
    NoPayload,
    /// Answer with the given HTTP status
    Status(u16),
    /// Fail before any response
    Transport(String),
}

/// Mock text driver.
pub struct MockTextDriver {
    behavior: MockTextBehavior,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextDriver {
    pub fn new(behavior: MockTextBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockTextBehavior::Echo)
    }

    /// Number of times generate_text() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn generate_text(&self, prompt: &str) -> GenerationOutcome<String> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        tokio::time::sleep(jitter(call)).await;

        match &self.behavior {
            MockTextBehavior::Echo => {
                GenerationOutcome::Payload(format!("PROMPT:{}", chunk_of(prompt)))
            }
            MockTextBehavior::RateLimited => GenerationOutcome::RateLimited,
            MockTextBehavior::NoPayload => GenerationOutcome::NoPayload,
            MockTextBehavior::Status(status_code) => {
                GenerationOutcome::Failed(GeminiError::new(GeminiErrorKind::HttpError {
                    status_code: *status_code,
                    message: "mock failure".to_string(),
                }))
            }
            MockTextBehavior::Transport(message) => GenerationOutcome::Failed(GeminiError::new(
                GeminiErrorKind::ApiRequest(message.clone()),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// A tiny valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let image = RgbImage::from_pixel(16, 9, image::Rgb([10, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}

/// Mock image driver.
///
/// Answers with a PNG unless the prompt contains one of the failing markers.
pub struct MockImageDriver {
    failing: HashSet<String>,
    failure: ImageFailure,
    call_count: Arc<Mutex<usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    models: Mutex<Vec<String>>,
}

/// What a failing image call returns.
#[derive(Debug, Clone, Copy)]
pub enum ImageFailure {
    NoPayload,
    RateLimited,
    Garbage,
    Status(u16),
}

impl MockImageDriver {
    pub fn always_succeeds() -> Self {
        Self::failing_for(Vec::<String>::new(), ImageFailure::NoPayload)
    }

    pub fn failing_for(
        markers: impl IntoIterator<Item = impl Into<String>>,
        failure: ImageFailure,
    ) -> Self {
        Self {
            failing: markers.into_iter().map(Into::into).collect(),
            failure,
            call_count: Arc::new(Mutex::new(0)),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Highest number of concurrent generate_image() calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Model ids requested so far.
    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(&self, request: &ImageRequest) -> GenerationOutcome<ImagePayload> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.models.lock().unwrap().push(request.model().clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(jitter(call)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let fails = self
            .failing
            .iter()
            .any(|marker| request.prompt().contains(marker.as_str()));
        if !fails {
            return GenerationOutcome::Payload(ImagePayload::new("image/png", png_bytes()));
        }

        match self.failure {
            ImageFailure::NoPayload => GenerationOutcome::NoPayload,
            ImageFailure::RateLimited => GenerationOutcome::RateLimited,
            ImageFailure::Garbage => {
                GenerationOutcome::Payload(ImagePayload::new("image/png", b"garbage".to_vec()))
            }
            ImageFailure::Status(status_code) => {
                GenerationOutcome::Failed(GeminiError::new(GeminiErrorKind::HttpError {
                    status_code,
                    message: "mock failure".to_string(),
                }))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
