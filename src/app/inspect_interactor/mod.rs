// Inspect interactor - Reports the probed duration of each input

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::app::concat_interactor::ConcatInteractor;
use crate::domain::model::MediaFile;
use crate::error::ChapcatError;

/// Probe outcome for one input
#[derive(Debug, Clone, Serialize)]
pub struct InspectEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(skip)]
    pub duration: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InspectEntry {
    fn failed(path: PathBuf, error: &ChapcatError) -> Self {
        Self {
            path,
            duration_secs: None,
            duration: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Probe outcome for every input, in input order
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub entries: Vec<InspectEntry>,
    pub total_secs: f64,
}

impl InspectReport {
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_ok()).count()
    }
}

/// Interactor for the probe use case.
///
/// Unlike concatenation, a bad input does not stop the others from being
/// reported.
pub struct InspectInteractor {
    concat: Arc<ConcatInteractor>,
}

impl InspectInteractor {
    pub fn new(concat: Arc<ConcatInteractor>) -> Self {
        Self { concat }
    }

    pub async fn inspect(&self, paths: &[PathBuf]) -> InspectReport {
        let mut entries: Vec<Option<InspectEntry>> = Vec::with_capacity(paths.len());
        let mut files = Vec::new();
        let mut slots = Vec::new();

        for path in paths {
            match MediaFile::open(path) {
                Ok(file) => {
                    slots.push(entries.len());
                    files.push(file);
                    entries.push(None);
                }
                Err(e) => entries.push(Some(InspectEntry::failed(path.clone(), &e))),
            }
        }

        let results = self.concat.probe_all(&files).await.results;
        for ((slot, file), result) in slots.into_iter().zip(files).zip(results) {
            let path = file.filename().to_path_buf();
            entries[slot] = Some(match result {
                Ok(duration) => InspectEntry {
                    path,
                    duration_secs: Some(duration.as_secs_f64()),
                    duration: Some(duration),
                    error: None,
                },
                Err(e) => InspectEntry::failed(path, &e),
            });
        }

        let entries: Vec<InspectEntry> = entries.into_iter().flatten().collect();
        let total: Duration = entries.iter().filter_map(|e| e.duration).sum();
        info!(
            "Inspected {} files, {} failed",
            entries.len(),
            entries.iter().filter(|e| !e.is_ok()).count()
        );

        InspectReport {
            entries,
            total_secs: total.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::concat_interactor::ProbeSettings;
    use crate::app::locks::OutputLocks;
    use crate::domain::model::{ConcatJob, OutputReport};
    use crate::error::ChapcatResult;
    use crate::ports::{ExecutePort, ProbePort};
    use async_trait::async_trait;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct NameProbe;

    #[async_trait]
    impl ProbePort for NameProbe {
        async fn probe_duration(&self, path: &Path) -> ChapcatResult<Duration> {
            match path.file_stem().and_then(|s| s.to_str()) {
                Some("bad") => Err(ChapcatError::probe(path, "unexpected ffprobe output")),
                Some(stem) => Ok(Duration::from_secs(stem.len() as u64)),
                None => unreachable!(),
            }
        }
    }

    struct NoExecutor;

    #[async_trait]
    impl ExecutePort for NoExecutor {
        async fn concatenate(&self, _job: &ConcatJob) -> ChapcatResult<OutputReport> {
            unreachable!("inspect never concatenates")
        }
    }

    #[tokio::test]
    async fn test_reports_every_input_in_order() {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for name in ["ab.mp4", "bad.mp4", "abcd.mp4"] {
            let path = dir.path().join(name);
            fs::write(&path, b"x").unwrap();
            paths.push(path);
        }
        paths.insert(1, dir.path().join("missing.mp4"));

        let concat = Arc::new(ConcatInteractor::new(
            Arc::new(NameProbe),
            Arc::new(NoExecutor),
            OutputLocks::new(),
            ProbeSettings::default(),
        ));
        let report = InspectInteractor::new(concat).inspect(&paths).await;

        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.entries[0].duration, Some(Duration::from_secs(2)));
        assert!(report.entries[1].error.as_deref().unwrap().contains("does not exist"));
        assert!(report.entries[2].error.is_some());
        assert_eq!(report.entries[3].duration, Some(Duration::from_secs(4)));
        assert_eq!(report.failures(), 2);
        assert_eq!(report.total_secs, 6.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["duration_secs"], 2.0);
        assert!(json["entries"][1].get("duration_secs").is_none());
    }
}
