//! sceneforge command-line entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use sceneforge::SceneforgeConfig;
use sceneforge::observability::{LoggingConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading RUST_LOG or the API key
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut logging = LoggingConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        logging = logging.with_log_level("sceneforge=debug,info");
    }
    init_logging(logging)?;

    let config = match &cli.config {
        Some(path) => SceneforgeConfig::from_file(path)?,
        None => SceneforgeConfig::load()?,
    };

    match cli.command {
        Commands::Run(args) => {
            cli::run_pipeline(&config, args).await?;
        }
        Commands::Split {
            script,
            seconds_per_scene,
        } => {
            cli::split_command(&config, script, seconds_per_scene).await?;
        }
        Commands::Package {
            output_dir,
            archive,
        } => {
            cli::package_output(&config, output_dir, archive).await?;
        }
        Commands::Models => {
            cli::list_models(&config);
        }
    }

    Ok(())
}
