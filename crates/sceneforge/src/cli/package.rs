//! Packaging and model listing.

use sceneforge::{SceneforgeConfig, SceneforgeResult, write_archive};
use std::path::PathBuf;

/// Zips a directory of images.
pub async fn package_output(
    config: &SceneforgeConfig,
    output_dir: Option<PathBuf>,
    archive: Option<PathBuf>,
) -> SceneforgeResult<()> {
    let dir = output_dir.unwrap_or_else(|| config.images_dir());
    let archive = archive.unwrap_or_else(|| config.archive_path());

    let size = write_archive(&dir, &archive).await?;
    println!("Archive: {} ({} bytes)", archive.display(), size);
    Ok(())
}

/// Prints the configured image models, marking the default.
pub fn list_models(config: &SceneforgeConfig) {
    println!("Text model: {}", config.text.model);
    println!("Image models:");
    for (name, id) in &config.image.models {
        let marker = if *name == config.image.default_model {
            " (default)"
        } else {
            ""
        };
        println!("  {:<10} {}{}", name, id, marker);
    }
}
