//! FFmpeg execution adapter
//!
//! Concatenates the job's inputs with the concat demuxer and stream copy,
//! taking chapters and the container title from a generated FFMETADATA file.
//! ffmpeg writes into a hidden staging file next to the output; the staging
//! file is renamed over the output only once ffmpeg succeeds, and deleted on
//! every other path.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::TempPath;
use tokio::process::Command;
use tracing::{info, warn};

use crate::adapters::process::{run_with_timeout, tail};
use crate::domain::model::{ChapterTimebase, ConcatJob, OutputReport};
use crate::error::{ChapcatError, ChapcatResult};
use crate::output::{concat_list, ffmetadata};
use crate::ports::ExecutePort;

const TOOL: &str = "ffmpeg";

/// FFmpeg-based execution adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    binary: PathBuf,
    timeout: Duration,
    timebase: ChapterTimebase,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration, timebase: ChapterTimebase) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            timebase,
        }
    }

    fn command(&self, list: &Path, metadata: &Path, destination: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"])
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(list)
            .args(["-f", "ffmetadata", "-i"])
            .arg(metadata)
            .args(["-map", "0", "-map_metadata", "1", "-map_chapters", "1"])
            .args(["-c", "copy"])
            .arg(destination);
        command
    }

    /// Reject jobs that cannot succeed before anything is spawned
    fn check_job(job: &ConcatJob) -> ChapcatResult<()> {
        if job.inputs.is_empty() {
            return Err(ChapcatError::invalid_input(
                "At least one input file is required",
            ));
        }
        if !job.overwrite && job.output.exists() {
            return Err(ChapcatError::invalid_input(format!(
                "Output {} already exists; pass --overwrite to replace it",
                job.output.display()
            )));
        }
        if !output_directory(&job.output).is_dir() {
            return Err(ChapcatError::invalid_input(format!(
                "Output directory {} does not exist",
                output_directory(&job.output).display()
            )));
        }
        Ok(())
    }
}

fn output_directory(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Reserve a hidden file beside `output` with the same extension, so ffmpeg
/// picks the right muxer and the final rename stays on one filesystem.
///
/// ffmpeg truncates the file in place, so its mode is what the output ends up
/// with: request 0666 and let the umask apply, as for a file ffmpeg creates.
fn staging_file(output: &Path) -> ChapcatResult<TempPath> {
    let suffix = output
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut builder = tempfile::Builder::new();
    builder.prefix(".chapcat-").suffix(&suffix);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let file = builder.tempfile_in(output_directory(output))?;
    Ok(file.into_temp_path())
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn concatenate(&self, job: &ConcatJob) -> ChapcatResult<OutputReport> {
        Self::check_job(job)?;
        let started = Instant::now();

        // Removed on drop, whichever way this function returns
        let workdir = tempfile::Builder::new().prefix("chapcat-").tempdir()?;
        let list_path = workdir.path().join("inputs.ffconcat");
        let metadata_path = workdir.path().join("chapters.ffmetadata");

        tokio::fs::write(
            &list_path,
            concat_list::render(job.inputs.iter().map(|file| file.filename())),
        )
        .await?;
        tokio::fs::write(
            &metadata_path,
            ffmetadata::render(job.output_title.as_deref(), &job.chapters, self.timebase),
        )
        .await?;

        let staging = staging_file(&job.output)?;
        info!(
            "Concatenating {} files into {}",
            job.inputs.len(),
            job.output.display()
        );

        let output = run_with_timeout(
            self.command(&list_path, &metadata_path, &staging),
            self.timeout,
        )
        .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                warn!("Discarding partial output for {}", job.output.display());
                return Err(ChapcatError::external_tool(TOOL, e.to_string()));
            }
        };

        if !output.status.success() {
            warn!("Discarding partial output for {}", job.output.display());
            let detail = tail(&output.stderr, 10);
            return Err(ChapcatError::external_tool(
                TOOL,
                if detail.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    format!("exited with {}:\n{}", output.status, detail)
                },
            ));
        }

        let persisted = if job.overwrite {
            staging.persist(&job.output)
        } else {
            staging.persist_noclobber(&job.output)
        };
        persisted.map_err(|e| {
            ChapcatError::external_tool(
                TOOL,
                format!(
                    "finished, but the result could not be moved to {}: {}",
                    job.output.display(),
                    e.error
                ),
            )
        })?;

        let report = OutputReport {
            output: job.output.clone(),
            chapters: job.chapters.len(),
            total_duration: job.total_duration(),
            elapsed: started.elapsed(),
        };
        info!(
            "Wrote {} ({} chapters) in {:.2}s",
            report.output.display(),
            report.chapters,
            report.elapsed.as_secs_f64()
        );
        Ok(report)
    }
}
