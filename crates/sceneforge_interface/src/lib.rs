//! Driver traits for the sceneforge pipeline.
//!
//! Backends implement [`TextDriver`] and [`ImageDriver`]. Every call returns a
//! [`GenerationOutcome`] rather than an error so callers can match the
//! provider's answer exhaustively.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ImageDriver, TextDriver};
pub use types::{
    AspectRatio, GenerationOutcome, ImagePayload, ImageRequest, ImageRequestBuilder,
    ImageRequestBuilderError,
};
