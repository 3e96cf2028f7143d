//! Configuration errors.

/// Invalid or unreadable configuration, tagged with where it was raised.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration error: {} ({}:{})", message, file, line)]
pub struct ConfigError {
    /// What is wrong, usually naming the offending key
    pub message: String,
    /// Source line that raised the error
    pub line: u32,
    /// Source file that raised the error
    pub file: &'static str,
}

impl ConfigError {
    /// Captures the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sceneforge_error::ConfigError;
    ///
    /// let err = ConfigError::new("image.workers must be between 1 and 10");
    /// assert!(err.to_string().starts_with("Configuration error: image.workers"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
