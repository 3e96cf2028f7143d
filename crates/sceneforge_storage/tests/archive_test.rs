//! Tests for zip packaging.

use sceneforge_storage::{archive_directory, write_archive};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

fn entry_names(archive: &mut zip::ZipArchive<impl std::io::Read + std::io::Seek>) -> Vec<String> {
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_empty_directory_yields_empty_archive() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let buffer = archive_directory(temp.path())?;

    assert_eq!(buffer.position(), 0);
    let archive = zip::ZipArchive::new(buffer)?;
    assert_eq!(archive.len(), 0);
    Ok(())
}

#[test]
fn test_archive_flattens_nested_files() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("S001_a.png"), b"one")?;
    fs::create_dir_all(temp.path().join("nested/deeper"))?;
    fs::write(temp.path().join("nested/deeper/S002_b.png"), b"two")?;

    let mut archive = zip::ZipArchive::new(archive_directory(temp.path())?)?;

    assert_eq!(entry_names(&mut archive), vec!["S001_a.png", "S002_b.png"]);
    let mut contents = String::new();
    archive.by_name("S002_b.png")?.read_to_string(&mut contents)?;
    assert_eq!(contents, "two");
    assert_eq!(
        archive.by_name("S001_a.png")?.compression(),
        zip::CompressionMethod::Deflated
    );
    Ok(())
}

#[test]
fn test_duplicate_base_names_keep_one_entry() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("a"))?;
    fs::create_dir_all(temp.path().join("b"))?;
    fs::write(temp.path().join("a/same.png"), b"first")?;
    fs::write(temp.path().join("b/same.png"), b"second")?;

    let archive = zip::ZipArchive::new(archive_directory(temp.path())?)?;

    assert_eq!(archive.len(), 1);
    Ok(())
}

#[test]
fn test_missing_directory_yields_empty_archive() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let buffer = archive_directory(&temp.path().join("output_images"))?;

    let archive = zip::ZipArchive::new(buffer)?;
    assert_eq!(archive.len(), 0);
    Ok(())
}

#[test]
fn test_staging_files_are_not_packed() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("S001_a.png"), b"one")?;
    fs::write(temp.path().join(".sceneforge-Ab12Cd.tmp"), b"partial")?;

    let mut archive = zip::ZipArchive::new(archive_directory(temp.path())?)?;

    assert_eq!(entry_names(&mut archive), vec!["S001_a.png"]);
    Ok(())
}

#[tokio::test]
async fn test_write_archive_to_file() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let images = temp.path().join("output_images");
    fs::create_dir_all(&images)?;
    fs::write(images.join("S001_a.png"), b"one")?;
    let dest = temp.path().join("all_images.zip");

    let size = write_archive(&images, &dest).await?;

    assert_eq!(size, fs::metadata(&dest)?.len());
    let archive = zip::ZipArchive::new(fs::File::open(&dest)?)?;
    assert_eq!(archive.len(), 1);
    Ok(())
}
