//! CLI module for chapcat
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{ChaptersArgs, ConcatArgs, ProbeArgs};

/// chapcat
///
/// Concatenates video files into one, adding a chapter for every input.
/// Probing and muxing are done by ffprobe and ffmpeg; streams are copied,
/// never re-encoded.
#[derive(Parser, Debug)]
#[command(name = "chapcat")]
#[command(about = "Concatenate videos into one file with a chapter per input")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, env = "CHAPCAT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file (default: ./chapcat.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, env = "CHAPCAT_FFMPEG", global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, env = "CHAPCAT_FFPROBE", global = true)]
    pub ffprobe: Option<PathBuf>,

    /// Number of files probed at once (0 = one per CPU)
    #[arg(long, env = "CHAPCAT_PROBE_CONCURRENCY", global = true)]
    pub probe_concurrency: Option<usize>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Concatenate inputs into one file with chapters
    Concat(ConcatArgs),
    /// Print the duration of each input
    Probe(ProbeArgs),
    /// Print the chapters a concatenation would produce
    Chapters(ChaptersArgs),
}
