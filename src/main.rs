//! chapcat
//!
//! Concatenates video files into a single file with one chapter per input.
//! Durations come from ffprobe; the join itself is an ffmpeg concat demuxer
//! run with stream copy and a generated FFMETADATA chapter list.
//!
//! # Usage
//!
//! ```bash
//! chapcat concat part1.mp4 part2.mp4 part3.mp4 -o movie.mp4
//! chapcat concat ./recordings -o day.mp4 --title Morning --title Evening
//! chapcat chapters ./recordings --ffmetadata
//! chapcat probe part1.mp4 --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use chapcat::app::DefaultAppContainer;
use chapcat::cli::{commands, Cli, Commands};
use chapcat::config_initialization::initialize_configuration;
use chapcat::utils::logging;

/// Main entry point for the chapcat CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    logging::initialize(&config.log);
    debug!("Effective configuration: {:?}", config);

    let container = DefaultAppContainer::new(&config)?;

    match cli.command {
        Commands::Concat(args) => {
            info!("Executing concat command");
            commands::concat(&container, &config, args).await?;
        }
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(&container, &config, args).await?;
        }
        Commands::Chapters(args) => {
            info!("Executing chapters command");
            commands::chapters(&container, &config, args).await?;
        }
    }

    Ok(())
}
