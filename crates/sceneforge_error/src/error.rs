//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, JsonError, PipelineError, StorageError};

/// Every error a sceneforge crate can surface.
///
/// # Examples
///
/// ```
/// use sceneforge_error::{PipelineError, PipelineErrorKind, SceneforgeError};
///
/// let err: SceneforgeError = PipelineError::new(PipelineErrorKind::EmptyScript).into();
/// assert!(err.to_string().contains("empty"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SceneforgeErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Pipeline precondition error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Sceneforge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use sceneforge_error::{ConfigError, SceneforgeErrorKind, SceneforgeResult};
///
/// fn might_fail() -> SceneforgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), SceneforgeErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("sceneforge: {}", _0)]
pub struct SceneforgeError(Box<SceneforgeErrorKind>);

impl SceneforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: SceneforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SceneforgeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to SceneforgeErrorKind
impl<T> From<T> for SceneforgeError
where
    T: Into<SceneforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for sceneforge operations.
///
/// # Examples
///
/// ```
/// use sceneforge_error::{ConfigError, SceneforgeResult};
///
/// fn seconds_per_scene(raw: &str) -> SceneforgeResult<usize> {
///     raw.parse()
///         .map_err(|_| ConfigError::new(format!("not a number: {}", raw)).into())
/// }
/// assert!(seconds_per_scene("abc").is_err());
/// ```
pub type SceneforgeResult<T> = std::result::Result<T, SceneforgeError>;
