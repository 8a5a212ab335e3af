// Ports - Interface definitions (contracts)

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::model::{ConcatJob, OutputReport};
use crate::error::ChapcatResult;

/// Port for reading a media file's duration
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe the duration of the file at `path`.
    ///
    /// Fails with `ChapcatError::Probe` when the tool exits non-zero, times
    /// out, or prints something that is not a duration.
    async fn probe_duration(&self, path: &Path) -> ChapcatResult<Duration>;
}

/// Port for running the concatenation itself
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Concatenate `job.inputs` into `job.output` with `job.chapters` embedded.
    ///
    /// Called exactly once per job. On failure nothing is left at the output
    /// path.
    async fn concatenate(&self, job: &ConcatJob) -> ChapcatResult<OutputReport>;
}
