//! Pipeline precondition errors.
//!
//! These are the only failures a run can report. Once dispatch begins every
//! scene is handled in-band, so nothing below is raised mid-run.

/// Run-level precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// No API credential was supplied
    #[display("API credential is missing")]
    MissingCredential,
    /// Script is empty or whitespace only
    #[display("Script is empty")]
    EmptyScript,
    /// Theme title is required by configuration but absent
    #[display("Theme title is required")]
    MissingTheme,
    /// Worker pool width outside the accepted range
    #[display("Worker count {} is outside 1..={}", count, max)]
    InvalidWorkerCount {
        /// Requested width
        count: usize,
        /// Largest accepted width
        max: usize,
    },
    /// Chunk size of zero characters
    #[display("Chunk size must be greater than zero")]
    InvalidChunkSize,
    /// Image model identifier is blank
    #[display("Image model identifier is empty")]
    MissingImageModel,
}

/// Error type for pipeline preconditions.
///
/// # Examples
///
/// ```
/// use sceneforge_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyScript);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline error: {} ({}:{})", kind, file, line)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Source line that raised the error
    pub line: u32,
    /// Source file that raised the error
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            kind,
            line: caller.line(),
            file: caller.file(),
        }
    }
}
