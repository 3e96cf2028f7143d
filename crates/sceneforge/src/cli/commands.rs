//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sceneforge - narration scripts to scene illustrations
#[derive(Parser, Debug)]
#[command(name = "sceneforge")]
#[command(about = "Turn a narration script into ordered scene illustrations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults to ./sceneforge.toml, ~/.config/sceneforge/sceneforge.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one illustration per scene of a script
    Run(RunArgs),

    /// Show how a script would be split into scenes
    Split {
        #[command(flatten)]
        script: ScriptArgs,

        /// Target narration seconds per scene
        #[arg(long)]
        seconds_per_scene: Option<usize>,
    },

    /// Zip a directory of generated images
    Package {
        /// Directory to archive (defaults to the configured images directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Archive destination (defaults to the configured archive path)
        #[arg(short, long)]
        archive: Option<PathBuf>,
    },

    /// List configured image models
    Models,
}

/// Where the narration script comes from.
#[derive(Args, Debug, Clone)]
pub struct ScriptArgs {
    /// Read the script from a file
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    pub script: Option<PathBuf>,

    /// Pass the script inline
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Options for a full pipeline run.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub script: ScriptArgs,

    /// Style directive (overrides the configured one)
    #[arg(long)]
    pub style: Option<String>,

    /// Overall theme or title shared by every scene
    #[arg(long)]
    pub theme: Option<String>,

    /// Image model name or id (e.g., "premium", "fast")
    #[arg(short = 'm', long)]
    pub image_model: Option<String>,

    /// Target narration seconds per scene
    #[arg(long)]
    pub seconds_per_scene: Option<usize>,

    /// Concurrent image requests
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Output base directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Gemini API key (defaults to the configured environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Package the images into a zip archive after the run
    #[arg(long)]
    pub archive: bool,
}
