//! Serialization errors for run reports.

/// A value could not be converted to or from JSON.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON error: {} ({}:{})", message, file, line)]
pub struct JsonError {
    /// Serializer message
    pub message: String,
    /// Source line that raised the error
    pub line: u32,
    /// Source file that raised the error
    pub file: &'static str,
}

impl JsonError {
    /// Captures the caller's location.
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
