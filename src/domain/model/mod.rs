// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::error::{ChapcatError, ChapcatResult};
use crate::ports::ProbePort;
use crate::utils::time::format_timestamp;

#[cfg(test)]
mod tests;

/// One input video file.
///
/// The path is canonicalized and checked once, in [`MediaFile::open`], and
/// never changes afterwards. The duration is probed on first request and
/// cached; clones share the same cache slot.
#[derive(Debug, Clone)]
pub struct MediaFile {
    filename: PathBuf,
    duration: Arc<OnceCell<Duration>>,
}

impl MediaFile {
    /// Resolve `path` and check that it names an existing regular file
    pub fn open(path: impl AsRef<Path>) -> ChapcatResult<Self> {
        let path = path.as_ref();
        let not_found = || {
            ChapcatError::invalid_input(format!("File {} does not exist", path.display()))
        };

        let filename = path.canonicalize().map_err(|_| not_found())?;
        if !filename.is_file() {
            return Err(not_found());
        }
        // The concat list is UTF-8 text with one file per line
        match filename.to_str() {
            Some(text) if !text.contains(['\n', '\r']) => {}
            _ => {
                return Err(ChapcatError::invalid_input(format!(
                    "File {} has a name that cannot be passed to ffmpeg",
                    filename.display()
                )))
            }
        }

        Ok(Self {
            filename,
            duration: Arc::new(OnceCell::new()),
        })
    }

    /// Absolute, resolved path
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// File name without directory or extension
    pub fn basename(&self) -> String {
        self.filename
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension including the leading dot, or an empty string
    pub fn extension(&self) -> String {
        self.filename
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Directory containing the file
    pub fn directory(&self) -> &Path {
        self.filename.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// Duration of the media, probed at most once.
    ///
    /// A failed probe leaves the cache empty so a later call may retry.
    pub async fn duration(&self, probe: &dyn ProbePort) -> ChapcatResult<Duration> {
        self.duration
            .get_or_try_init(|| probe.probe_duration(&self.filename))
            .await
            .copied()
    }

    /// Cached duration, if it has been probed already
    pub fn cached_duration(&self) -> Option<Duration> {
        self.duration.get().copied()
    }
}

impl fmt::Display for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename.display())
    }
}

/// A named `[start, end)` interval of the concatenated output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub index: usize,
    pub title: String,
    pub start: Duration,
    pub end: Duration,
}

impl Chapter {
    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}  {} - {}  {}",
            self.index + 1,
            format_timestamp(self.start),
            format_timestamp(self.end),
            self.title
        )
    }
}

/// Rational number of seconds per metadata tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterTimebase {
    pub num: u32,
    pub den: u32,
}

impl ChapterTimebase {
    pub const MILLISECONDS: Self = Self { num: 1, den: 1000 };

    /// Create a new timebase
    pub fn new(num: u32, den: u32) -> ChapcatResult<Self> {
        if num == 0 || den == 0 {
            return Err(ChapcatError::config(format!(
                "Invalid chapter timebase {}/{}",
                num, den
            )));
        }
        Ok(Self { num, den })
    }

    /// Convert a position to whole ticks, rounding down
    pub fn to_ticks(&self, position: Duration) -> u128 {
        position.as_nanos() * u128::from(self.den) / (u128::from(self.num) * 1_000_000_000)
    }
}

impl Default for ChapterTimebase {
    fn default() -> Self {
        Self::MILLISECONDS
    }
}

impl fmt::Display for ChapterTimebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A concatenation request as it arrives from the caller
#[derive(Debug, Clone, Default)]
pub struct ConcatRequest {
    /// Input files, in chapter order
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// One title per input; basenames are used when empty
    pub titles: Vec<String>,
    /// Global title written into the output container
    pub output_title: Option<String>,
    pub overwrite: bool,
}

impl ConcatRequest {
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_titles(mut self, titles: Vec<String>) -> Self {
        self.titles = titles;
        self
    }

    pub fn with_output_title(mut self, title: Option<String>) -> Self {
        self.output_title = title;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// A fully planned concatenation, ready for the external tool
#[derive(Debug, Clone)]
pub struct ConcatJob {
    pub inputs: Vec<MediaFile>,
    pub chapters: Vec<Chapter>,
    pub output: PathBuf,
    pub output_title: Option<String>,
    pub overwrite: bool,
}

impl ConcatJob {
    /// Length of the concatenated output
    pub fn total_duration(&self) -> Duration {
        self.chapters.last().map(|c| c.end).unwrap_or(Duration::ZERO)
    }
}

/// Summary of a finished concatenation
#[derive(Debug, Clone)]
pub struct OutputReport {
    pub output: PathBuf,
    pub chapters: usize,
    pub total_duration: Duration,
    pub elapsed: Duration,
}
