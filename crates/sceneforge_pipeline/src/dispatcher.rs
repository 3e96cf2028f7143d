//! Bounded fan-out / fan-in over scene-keyed work items.

use sceneforge_core::{SceneImage, ScenePrompt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// A result that knows which scene it belongs to.
pub trait Keyed {
    /// Scene index used to restore script order.
    fn key(&self) -> usize;
}

impl Keyed for ScenePrompt {
    fn key(&self) -> usize {
        self.index()
    }
}

impl Keyed for SceneImage {
    fn key(&self) -> usize {
        self.index()
    }
}

/// Receives overall progress as a fraction in `0.0..=1.0`.
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// The slice of overall progress one phase reports into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSpan {
    offset: f64,
    span: f64,
}

impl ProgressSpan {
    /// Prompt phase: first half of the run.
    pub const PROMPTS: Self = Self {
        offset: 0.0,
        span: 0.5,
    };

    /// Image phase: second half of the run.
    pub const IMAGES: Self = Self {
        offset: 0.5,
        span: 0.5,
    };

    /// A custom span starting at `offset`.
    pub fn new(offset: f64, span: f64) -> Self {
        Self { offset, span }
    }

    /// Overall progress after `completed` of `total` items.
    pub fn at(&self, completed: usize, total: usize) -> f64 {
        if total == 0 {
            return self.offset;
        }
        self.offset + self.span * completed as f64 / total as f64
    }
}

/// Runs one handler per item with at most `width` running at once.
///
/// Every item runs to completion in its own task. Results arrive in
/// completion order, absent results are discarded, and the survivors are
/// sorted by [`Keyed::key`] before being returned. A handler that panics is
/// treated as absent and does not affect its siblings.
#[derive(Clone)]
pub struct Dispatcher {
    width: usize,
    span: ProgressSpan,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("width", &self.width)
            .field("span", &self.span)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher. A width of zero is treated as one.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            span: ProgressSpan::new(0.0, 1.0),
            progress: None,
        }
    }

    /// Reports progress into `span` after each completed item.
    pub fn with_progress(mut self, span: ProgressSpan, callback: ProgressCallback) -> Self {
        self.span = span;
        self.progress = Some(callback);
        self
    }

    /// Maximum concurrent handler invocations.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Dispatches `items` through `handler` and returns the present results in key order.
    #[tracing::instrument(skip_all, fields(items = items.len(), width = self.width))]
    pub async fn dispatch<I, T, F, Fut>(&self, items: Vec<I>, handler: F) -> Vec<T>
    where
        I: Send + 'static,
        T: Keyed + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<T>> + Send + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        let permits = Arc::new(Semaphore::new(self.width));
        let handler = Arc::new(handler);
        let mut tasks = JoinSet::new();

        for item in items {
            let permits = Arc::clone(&permits);
            let handler = Arc::clone(&handler);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok()?;
                handler(item).await
            });
        }

        let mut results = Vec::with_capacity(total);
        let mut completed = 0;
        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            if let Some(progress) = &self.progress {
                progress(self.span.at(completed, total));
            }
            match joined {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Dispatched task did not complete"),
            }
        }

        results.sort_by_key(|result| result.key());
        debug!(completed, present = results.len(), "Dispatch drained");
        results
    }
}
