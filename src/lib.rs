//! chapcat library
//!
//! Concatenates video files into one with a chapter per input, driving the
//! external ffprobe and ffmpeg tools.
//!
//! The pieces, from the inside out:
//!
//! - [`domain::model`]: [`MediaFile`] (validated path plus a probe-once
//!   duration), [`Chapter`], and the request/job types.
//! - [`planner`]: prefix sums of durations into contiguous chapters.
//! - [`output`]: the concat list and FFMETADATA documents handed to ffmpeg.
//! - [`ports`] and [`adapters`]: the probe/execute seams and their
//!   ffprobe/ffmpeg implementations.
//! - [`app`]: use-case interactors and the per-output-path writer lock.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{Chapter, ChapterTimebase, ConcatJob, ConcatRequest, MediaFile, OutputReport};
pub use error::{ChapcatError, ChapcatResult};
