//! FFprobe adapter for media duration probing
//!
//! Runs `ffprobe -v quiet -of csv=p=0 -show_entries format=duration <file>`
//! and reads the single decimal number it prints.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::adapters::process::{run_with_timeout, tail};
use crate::error::{ChapcatError, ChapcatResult};
use crate::ports::ProbePort;
use crate::utils::time::parse_seconds;

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FFprobeAdapter {
    binary: PathBuf,
    timeout: Duration,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(["-v", "quiet", "-of", "csv=p=0", "-show_entries", "format=duration"])
            .arg(path);
        command
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, path: &Path) -> ChapcatResult<Duration> {
        let output = run_with_timeout(self.command(path), self.timeout)
            .await
            .map_err(|e| ChapcatError::probe(path, e.to_string()))?;

        if !output.status.success() {
            let detail = tail(&output.stderr, 5);
            return Err(ChapcatError::probe(
                path,
                if detail.is_empty() {
                    format!("ffprobe exited with {}", output.status)
                } else {
                    format!("ffprobe exited with {}: {}", output.status, detail)
                },
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration = parse_seconds(&stdout)
            .map_err(|e| ChapcatError::probe(path, format!("unexpected ffprobe output: {}", e)))?;

        debug!("Probed {}: {:?}", path.display(), duration);
        Ok(duration)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Write an executable stand-in for ffprobe
    fn fake_ffprobe(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("ffprobe");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_parses_duration() {
        let dir = TempDir::new().unwrap();
        let adapter = FFprobeAdapter::new(
            fake_ffprobe(&dir, "echo 10.500000"),
            Duration::from_secs(10),
        );

        let duration = adapter
            .probe_duration(Path::new("/any/file.mp4"))
            .await
            .unwrap();
        assert_eq!(duration, Duration::from_millis(10_500));
    }

    #[tokio::test]
    async fn test_passes_expected_arguments() {
        let dir = TempDir::new().unwrap();
        let args_file = dir.path().join("args");
        let script = format!(
            "printf '%s\\n' \"$@\" > '{}'\necho 1.0",
            args_file.display()
        );
        let adapter = FFprobeAdapter::new(fake_ffprobe(&dir, &script), Duration::from_secs(10));

        adapter
            .probe_duration(Path::new("/videos/it's a file.mp4"))
            .await
            .unwrap();
        let args = fs::read_to_string(args_file).unwrap();
        assert_eq!(
            args.lines().collect::<Vec<_>>(),
            vec![
                "-v",
                "quiet",
                "-of",
                "csv=p=0",
                "-show_entries",
                "format=duration",
                "/videos/it's a file.mp4",
            ]
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_probe_error() {
        let dir = TempDir::new().unwrap();
        let adapter = FFprobeAdapter::new(
            fake_ffprobe(&dir, "echo 'No such file' >&2; exit 1"),
            Duration::from_secs(10),
        );

        let err = adapter
            .probe_duration(Path::new("/missing.mp4"))
            .await
            .unwrap_err();
        match err {
            ChapcatError::Probe { message, .. } => assert!(message.contains("No such file")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparsable_output_is_probe_error() {
        let dir = TempDir::new().unwrap();
        let adapter = FFprobeAdapter::new(fake_ffprobe(&dir, "echo N/A"), Duration::from_secs(10));

        let err = adapter.probe_duration(Path::new("/a.mp4")).await.unwrap_err();
        assert!(matches!(err, ChapcatError::Probe { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_probe_error() {
        let dir = TempDir::new().unwrap();
        let adapter = FFprobeAdapter::new(
            fake_ffprobe(&dir, "sleep 5; echo 1.0"),
            Duration::from_millis(100),
        );

        let err = adapter.probe_duration(Path::new("/a.mp4")).await.unwrap_err();
        assert!(matches!(err, ChapcatError::Probe { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_is_probe_error() {
        let adapter = FFprobeAdapter::new("/nonexistent/ffprobe", Duration::from_secs(1));
        let err = adapter.probe_duration(Path::new("/a.mp4")).await.unwrap_err();
        assert!(matches!(err, ChapcatError::Probe { .. }));
    }
}
