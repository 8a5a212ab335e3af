//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the concat command
#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Input files or directories, in chapter order
    pub inputs: Vec<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Chapter title, once per input (default: file names)
    #[arg(short, long = "title")]
    pub titles: Vec<String>,

    /// Title of the output file
    #[arg(long)]
    pub output_title: Option<String>,

    /// Replace the output file if it exists
    #[arg(long)]
    pub overwrite: bool,

    /// Probe and print the chapters without running ffmpeg
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the chapters command
#[derive(Args, Debug)]
pub struct ChaptersArgs {
    /// Input files or directories, in chapter order
    pub inputs: Vec<PathBuf>,

    /// Chapter title, once per input (default: file names)
    #[arg(short, long = "title")]
    pub titles: Vec<String>,

    /// Title of the output file
    #[arg(long)]
    pub output_title: Option<String>,

    /// Output in JSON format
    #[arg(long, conflicts_with = "ffmetadata")]
    pub json: bool,

    /// Print the FFMETADATA document handed to ffmpeg
    #[arg(long)]
    pub ffmetadata: bool,
}
