//! Filesystem-backed image store.

use crate::ImageStore;
use image::ImageFormat;
use sceneforge_error::{SceneforgeResult, StorageError, StorageErrorKind};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = ".sceneforge-";
const TEMP_SUFFIX: &str = ".tmp";

/// True for the hidden staging files [`FileSystemImageStore`] writes before
/// moving an image into place.
pub(crate) fn is_staging_file(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX)
}

/// Stores scene images as PNG files in a single flat directory.
///
/// # Example Structure
///
/// ```text
/// web_result_files/output_images/
/// ├── S001_Hello world..png
/// ├── S002_This is a test..png
/// └── S003_Another sentence here..png
/// ```
///
/// Writes go to a short hidden staging file first and are renamed into place,
/// so a reader never sees a partial image. A failed write removes its staging
/// file.
#[derive(Debug, Clone)]
pub struct FileSystemImageStore {
    root: PathBuf,
}

impl FileSystemImageStore {
    /// Creates a store rooted at `root`. Nothing is touched until [`ImageStore::prepare`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `filename` inside the root, rejecting anything that is not a
    /// bare file name.
    fn target_path(&self, filename: &str) -> SceneforgeResult<PathBuf> {
        let name = Path::new(filename);
        let is_bare = !filename.is_empty()
            && name.file_name().and_then(|n| n.to_str()) == Some(filename);
        if !is_bare {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(filename.to_string())).into());
        }
        Ok(self.root.join(name))
    }
}

/// Decodes any supported image format and re-encodes it as PNG.
fn transcode_to_png(data: &[u8]) -> SceneforgeResult<Vec<u8>> {
    let image = image::load_from_memory(data)
        .map_err(|e| StorageError::new(StorageErrorKind::ImageDecode(e.to_string())))?;

    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| StorageError::new(StorageErrorKind::ImageEncode(e.to_string())))?;
    Ok(out.into_inner())
}

/// Transcodes `data` and moves it to `target` through a staging file in `root`.
///
/// The staging file is deleted on every error path when it is dropped.
fn write_png(root: &Path, target: &Path, data: &[u8]) -> SceneforgeResult<usize> {
    let png = transcode_to_png(data)?;

    let mut staging = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(root)
        .map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "staging file in {}: {}",
                root.display(),
                e
            )))
        })?;

    staging.write_all(&png).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            staging.path().display(),
            e
        )))
    })?;

    staging.persist(target).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename to {}: {}",
            target.display(),
            e.error
        )))
    })?;

    Ok(png.len())
}

#[async_trait::async_trait]
impl ImageStore for FileSystemImageStore {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    async fn prepare(&self) -> SceneforgeResult<()> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => tracing::debug!("Removed previous run output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::DirectoryRemoval(format!(
                    "{}: {}",
                    self.root.display(),
                    e
                )))
                .into());
            }
        }

        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.root.display(),
                e
            )))
        })?;

        tracing::info!("Prepared image directory");
        Ok(())
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn store(&self, filename: &str, data: &[u8]) -> SceneforgeResult<PathBuf> {
        let path = self.target_path(filename)?;

        let root = self.root.clone();
        let target = path.clone();
        let bytes = data.to_vec();
        let png_size = tokio::task::spawn_blocking(move || write_png(&root, &target, &bytes))
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::FileWrite(e.to_string())))??;

        tracing::debug!(path = %path.display(), png_size, "Stored image");
        Ok(path)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
