//! Configuration structures and loading.

use config::{Config, File, FileFormat};
use sceneforge_error::{ConfigError, SceneforgeError, SceneforgeResult};
use sceneforge_interface::AspectRatio;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Largest accepted image worker pool.
pub const MAX_IMAGE_WORKERS: usize = 10;
/// Shortest accepted scene duration in seconds.
pub const MIN_SECONDS_PER_SCENE: usize = 10;
/// Longest accepted scene duration in seconds.
pub const MAX_SECONDS_PER_SCENE: usize = 60;

/// Provider endpoint and credential lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the generative language REST API
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Prompt synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    /// Text model id
    pub model: String,
    /// Concurrent prompt requests
    pub workers: usize,
    /// Pause after a rate-limited prompt request, in milliseconds
    pub rate_limit_pause_ms: u64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".to_string(),
            workers: 10,
            rate_limit_pause_ms: 2000,
        }
    }
}

/// Image synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Friendly name of the model used when none is selected
    pub default_model: String,
    /// Concurrent image requests
    pub workers: usize,
    /// Aspect ratio sent with every image request
    pub aspect_ratio: String,
    /// Friendly name to model id
    pub models: BTreeMap<String, String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let models = BTreeMap::from([
            ("premium".to_string(), "gemini-3-pro-image-preview".to_string()),
            ("fast".to_string(), "gemini-2.5-flash-image".to_string()),
        ]);
        Self {
            default_model: "premium".to_string(),
            workers: 5,
            aspect_ratio: AspectRatio::Landscape.to_string(),
            models,
        }
    }
}

/// Scene sizing.
///
/// A scene holds roughly `seconds_per_scene * chars_per_second` characters
/// of narration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Target narration time per scene
    pub seconds_per_scene: usize,
    /// Approximate narration speed
    pub chars_per_second: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seconds_per_scene: 20,
            chars_per_second: 8,
        }
    }
}

/// Output layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for run output
    pub base_dir: PathBuf,
    /// Image directory under `base_dir`, reset on every run
    pub images_dir: String,
    /// Archive filename written under `base_dir`
    pub archive_name: String,
    /// Run report filename written under `base_dir`
    pub report_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./web_result_files"),
            images_dir: "output_images".to_string(),
            archive_name: "all_images.zip".to_string(),
            report_name: "run_report.json".to_string(),
        }
    }
}

/// Art direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Style directive injected into every prompt request
    pub directive: String,
    /// Reject runs without a theme title
    pub require_theme: bool,
}

/// Top-level sceneforge configuration.
///
/// # Example
///
/// ```no_run
/// use sceneforge_config::SceneforgeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SceneforgeConfig::load()?;
/// println!("chunk size: {}", config.max_chunk_chars());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SceneforgeConfig {
    /// Provider endpoint
    #[serde(default)]
    pub api: ApiConfig,
    /// Prompt synthesis
    #[serde(default)]
    pub text: TextConfig,
    /// Image synthesis
    #[serde(default)]
    pub image: ImageConfig,
    /// Scene sizing
    #[serde(default)]
    pub scenes: SceneConfig,
    /// Output layout
    #[serde(default)]
    pub output: OutputConfig,
    /// Art direction
    #[serde(default)]
    pub style: StyleConfig,
}

impl SceneforgeConfig {
    /// Load configuration from a specific file path.
    ///
    /// Sections missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SceneforgeResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                SceneforgeError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SceneforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and skipped if not found.
    #[instrument]
    pub fn load() -> SceneforgeResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../sceneforge.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/sceneforge/sceneforge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("sceneforge").required(false));

        builder
            .build()
            .map_err(|e| {
                SceneforgeError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SceneforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Checks value ranges and cross-references.
    #[instrument(skip(self))]
    pub fn validate(&self) -> SceneforgeResult<()> {
        if !(1..=MAX_IMAGE_WORKERS).contains(&self.image.workers) {
            return Err(ConfigError::new(format!(
                "image.workers must be between 1 and {}, got {}",
                MAX_IMAGE_WORKERS, self.image.workers
            ))
            .into());
        }
        if self.text.workers == 0 {
            return Err(ConfigError::new("text.workers must be at least 1").into());
        }
        if !(MIN_SECONDS_PER_SCENE..=MAX_SECONDS_PER_SCENE).contains(&self.scenes.seconds_per_scene)
        {
            return Err(ConfigError::new(format!(
                "scenes.seconds_per_scene must be between {} and {}, got {}",
                MIN_SECONDS_PER_SCENE, MAX_SECONDS_PER_SCENE, self.scenes.seconds_per_scene
            ))
            .into());
        }
        if self.scenes.chars_per_second == 0 {
            return Err(ConfigError::new("scenes.chars_per_second must be at least 1").into());
        }
        self.aspect_ratio()?;
        self.image_model_id(None)?;
        debug!("Configuration valid");
        Ok(())
    }

    /// Chunk size limit in characters.
    pub fn max_chunk_chars(&self) -> usize {
        self.scenes.seconds_per_scene * self.scenes.chars_per_second
    }

    /// Resolves an image model by friendly name, falling back to the default.
    ///
    /// A full model id listed in `[image.models]` is accepted as-is.
    pub fn image_model_id(&self, name: Option<&str>) -> SceneforgeResult<String> {
        let name = name.unwrap_or(&self.image.default_model);
        if let Some(id) = self.image.models.get(name) {
            return Ok(id.clone());
        }
        if self.image.models.values().any(|id| id == name) {
            return Ok(name.to_string());
        }
        let known: Vec<&str> = self.image.models.keys().map(String::as_str).collect();
        Err(ConfigError::new(format!(
            "Unknown image model '{}' (configured: {})",
            name,
            known.join(", ")
        ))
        .into())
    }

    /// Parsed image aspect ratio.
    pub fn aspect_ratio(&self) -> SceneforgeResult<AspectRatio> {
        self.image.aspect_ratio.parse().map_err(|_| {
            ConfigError::new(format!(
                "Unsupported aspect ratio '{}'",
                self.image.aspect_ratio
            ))
            .into()
        })
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Directory the current run writes images into.
    pub fn images_dir(&self) -> PathBuf {
        self.output.base_dir.join(&self.output.images_dir)
    }

    /// Where the archive is written.
    pub fn archive_path(&self) -> PathBuf {
        self.output.base_dir.join(&self.output.archive_name)
    }

    /// Where the run report is written.
    pub fn report_path(&self) -> PathBuf {
        self.output.base_dir.join(&self.output.report_name)
    }
}
