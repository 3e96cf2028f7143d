//! Run report persistence.

use sceneforge_core::RunReport;
use sceneforge_error::{JsonError, SceneforgeResult, StorageError, StorageErrorKind};
use std::path::Path;

/// Writes `report` as pretty JSON to `path`, creating parent directories.
#[tracing::instrument(skip(report), fields(path = %path.display(), results = report.succeeded()))]
pub async fn write_report(report: &RunReport, path: &Path) -> SceneforgeResult<()> {
    let json = report
        .to_json()
        .map_err(|e| JsonError::new(format!("Failed to serialize run report: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    tokio::fs::write(path, json).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
    })?;

    tracing::info!("Wrote run report");
    Ok(())
}
