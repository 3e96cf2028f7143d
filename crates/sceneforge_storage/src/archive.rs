//! Zip packaging of a run's images.

use crate::filesystem::is_staging_file;
use sceneforge_error::{SceneforgeResult, StorageError, StorageErrorKind};
use std::collections::HashSet;
use std::io::{Cursor, Seek, SeekFrom, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

fn archive_error(message: impl std::fmt::Display) -> StorageError {
    StorageError::new(StorageErrorKind::Archive(message.to_string()))
}

/// Packs every regular file under `dir` into an in-memory zip archive.
///
/// Entries are flattened to their base file name and deflate-compressed. When
/// two files share a base name the first one in walk order wins. Staging files
/// left by an interrupted write are skipped, and a directory that does not
/// exist yet yields an empty archive. The returned buffer is rewound to the
/// start.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn archive_directory(dir: &Path) -> SceneforgeResult<Cursor<Vec<u8>>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut seen = HashSet::new();

    if !dir.exists() {
        tracing::warn!("Directory does not exist, archive will be empty");
        return finish(writer, seen.len());
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", dir.display(), e)))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_staging_file(&name) {
            tracing::debug!(path = %entry.path().display(), "Skipping staging file");
            continue;
        }
        if !seen.insert(name.clone()) {
            tracing::warn!(path = %entry.path().display(), "Skipping duplicate file name");
            continue;
        }

        let data = std::fs::read(entry.path()).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                entry.path().display(),
                e
            )))
        })?;

        writer.start_file(name.as_str(), options).map_err(archive_error)?;
        writer.write_all(&data).map_err(archive_error)?;
        tracing::debug!(name = %name, size = data.len(), "Added archive entry");
    }

    finish(writer, seen.len())
}

fn finish(writer: ZipWriter<Cursor<Vec<u8>>>, entries: usize) -> SceneforgeResult<Cursor<Vec<u8>>> {
    let mut buffer = writer.finish().map_err(archive_error)?;
    buffer.seek(SeekFrom::Start(0)).map_err(archive_error)?;

    tracing::info!(entries, size = buffer.get_ref().len(), "Built archive");
    Ok(buffer)
}

/// Archives `dir` and writes the zip to `dest`. Returns the archive size in bytes.
#[tracing::instrument(skip_all, fields(dir = %dir.display(), dest = %dest.display()))]
pub async fn write_archive(dir: &Path, dest: &Path) -> SceneforgeResult<u64> {
    let source = dir.to_path_buf();
    let buffer = tokio::task::spawn_blocking(move || archive_directory(&source))
        .await
        .map_err(archive_error)??;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    let bytes = buffer.into_inner();
    tokio::fs::write(dest, &bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", dest.display(), e)))
    })?;

    Ok(bytes.len() as u64)
}
