//! Image storage trait.

use sceneforge_error::SceneforgeResult;
use std::path::{Path, PathBuf};

/// Destination for generated scene images.
///
/// A store owns one directory for the duration of a run. Implementations must
/// allow concurrent `store` calls for distinct filenames.
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Clears any previous run's output and recreates the directory.
    async fn prepare(&self) -> SceneforgeResult<()>;

    /// Decodes `data` as an image and persists it as PNG under `filename`.
    ///
    /// Returns the path of the stored file.
    async fn store(&self, filename: &str, data: &[u8]) -> SceneforgeResult<PathBuf>;

    /// Directory images are written into.
    fn root(&self) -> &Path;
}
