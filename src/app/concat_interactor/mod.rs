// Concat interactor - Orchestrates the concatenation use case

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::app::locks::OutputLocks;
use crate::domain::model::*;
use crate::error::{ChapcatError, ChapcatResult};
use crate::planner::ChapterPlanner;
use crate::ports::*;


/// How durations are probed for a batch of files
#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    /// Maximum number of probes in flight
    pub concurrency: usize,
    /// Stop probing the remaining files after the first failure
    pub fail_fast: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            fail_fast: false,
        }
    }
}

/// Interactor for the concatenation use case
pub struct ConcatInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    locks: OutputLocks,
    planner: ChapterPlanner,
    settings: ProbeSettings,
}

impl ConcatInteractor {
    /// Create new concat interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        locks: OutputLocks,
        settings: ProbeSettings,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            locks,
            planner: ChapterPlanner::new(),
            settings,
        }
    }

    /// Plan and run one concatenation
    pub async fn execute(&self, request: &ConcatRequest) -> ChapcatResult<OutputReport> {
        let job = self.plan(request).await?;
        self.run(&job).await
    }

    /// Validate the request, probe every input and compute its chapters
    pub async fn plan(&self, request: &ConcatRequest) -> ChapcatResult<ConcatJob> {
        if request.inputs.is_empty() {
            return Err(ChapcatError::invalid_input(
                "At least one input file is required",
            ));
        }
        if !request.overwrite && request.output.exists() {
            return Err(ChapcatError::invalid_input(format!(
                "Output {} already exists; pass --overwrite to replace it",
                request.output.display()
            )));
        }

        let (inputs, chapters) = self.chapters(&request.inputs, &request.titles).await?;
        Ok(ConcatJob {
            inputs,
            chapters,
            output: request.output.clone(),
            output_title: request.output_title.clone(),
            overwrite: request.overwrite,
        })
    }

    /// Open and probe `paths`, returning the files and their chapters
    pub async fn chapters(
        &self,
        paths: &[PathBuf],
        titles: &[String],
    ) -> ChapcatResult<(Vec<MediaFile>, Vec<Chapter>)> {
        if paths.is_empty() {
            return Err(ChapcatError::invalid_input(
                "At least one input file is required",
            ));
        }
        if !titles.is_empty() && titles.len() != paths.len() {
            return Err(ChapcatError::invalid_input(format!(
                "Got {} chapter titles for {} input files",
                titles.len(),
                paths.len()
            )));
        }

        let files = paths
            .iter()
            .map(MediaFile::open)
            .collect::<ChapcatResult<Vec<_>>>()?;

        let durations = self.probe_all(&files).await.into_durations()?;

        let chapters = self.planner.plan(&files, &durations, titles)?;
        Ok((files, chapters))
    }

    /// Run a planned job, holding the output path for its whole duration
    pub async fn run(&self, job: &ConcatJob) -> ChapcatResult<OutputReport> {
        let _guard = self.locks.acquire(&job.output).await;
        info!(
            "Running job: {} inputs, {} chapters, total {:?}",
            job.inputs.len(),
            job.chapters.len(),
            job.total_duration()
        );
        self.execute_port.concatenate(job).await
    }

    /// Probe every file, at most `concurrency` at a time.
    ///
    /// Results come back in input order. Each failure is logged; with
    /// `fail_fast` the first failure cancels probes that have not finished.
    pub async fn probe_all(&self, files: &[MediaFile]) -> ProbeBatch {
        let semaphore = Arc::new(Semaphore::new(self.settings.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, file) in files.iter().cloned().enumerate() {
            let probe = Arc::clone(&self.probe_port);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                (index, file.duration(probe.as_ref()).await)
            });
        }

        let mut results: Vec<Option<ChapcatResult<Duration>>> =
            files.iter().map(|_| None).collect();
        let mut first_failure = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if let Err(e) = &result {
                        warn!("{}", e);
                        first_failure.get_or_insert(index);
                        if self.settings.fail_fast {
                            tasks.abort_all();
                        }
                    }
                    results[index] = Some(result);
                }
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(_) => {}
            }
        }

        let results = files
            .iter()
            .zip(results)
            .map(|(file, result)| {
                result.unwrap_or_else(|| {
                    Err(ChapcatError::probe(
                        file.filename(),
                        "skipped after an earlier probe failure",
                    ))
                })
            })
            .collect();

        ProbeBatch {
            results,
            first_failure,
        }
    }
}

/// Outcome of probing a batch of files
#[derive(Debug)]
pub struct ProbeBatch {
    /// One entry per file, in input order
    pub results: Vec<ChapcatResult<Duration>>,
    /// Index of the failure that was observed first
    first_failure: Option<usize>,
}

impl ProbeBatch {
    /// All durations, or the first failure observed while probing
    pub fn into_durations(mut self) -> ChapcatResult<Vec<Duration>> {
        if let Some(index) = self.first_failure {
            if let Err(e) = self.results.swap_remove(index) {
                return Err(e);
            }
        }
        let durations: Vec<Duration> = self.results.into_iter().flatten().collect();
        debug!("Probed {} durations", durations.len());
        Ok(durations)
    }
}
