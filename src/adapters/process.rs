//! Child process execution with a bounded wait

use std::process::{Output, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Why a child process produced no usable output
#[derive(Error, Debug)]
pub enum RunFailure {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} did not finish within {limit:?}")]
    TimedOut { program: String, limit: Duration },

    #[error("lost track of {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Run `command` to completion, killing it if it outlives `limit`.
///
/// stdin is closed and both output streams are captured. A non-zero exit is
/// not an error here; callers inspect `Output::status`.
pub async fn run_with_timeout(mut command: Command, limit: Duration) -> Result<Output, RunFailure> {
    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();
    debug!(
        "Running {} {:?}",
        program,
        command.as_std().get_args().collect::<Vec<_>>()
    );

    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| RunFailure::Spawn {
            program: program.clone(),
            source,
        })?;

    // Dropping the future on timeout drops the child, which kills it
    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(RunFailure::Wait { program, source }),
        Err(_) => Err(RunFailure::TimedOut { program, limit }),
    }
}

/// Last `lines` non-empty lines of a captured stream
pub fn tail(stream: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(stream);
    let kept: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    kept[kept.len().saturating_sub(lines)..].join("\n")
}
