//! Chapter planning
//!
//! Turns an ordered list of probed durations into contiguous chapters. Chapter
//! *i* starts at the sum of durations `0..i` and ends where chapter *i + 1*
//! starts, so the chapters cover `[0, total)` exactly with no gaps.

use std::time::Duration;

use tracing::debug;

use crate::domain::model::{Chapter, MediaFile};
use crate::error::{ChapcatError, ChapcatResult};

/// Computes chapter boundaries and titles for a concatenation
#[derive(Debug, Default, Clone, Copy)]
pub struct ChapterPlanner;

impl ChapterPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Build one chapter per file.
    ///
    /// `durations[i]` belongs to `files[i]`. Titles default to each file's
    /// basename; when `titles` is non-empty it must hold one entry per file.
    pub fn plan(
        &self,
        files: &[MediaFile],
        durations: &[Duration],
        titles: &[String],
    ) -> ChapcatResult<Vec<Chapter>> {
        if files.is_empty() {
            return Err(ChapcatError::invalid_input(
                "At least one input file is required",
            ));
        }
        if durations.len() != files.len() {
            return Err(ChapcatError::invalid_input(format!(
                "Got {} durations for {} files",
                durations.len(),
                files.len()
            )));
        }
        if !titles.is_empty() && titles.len() != files.len() {
            return Err(ChapcatError::invalid_input(format!(
                "Got {} chapter titles for {} input files",
                titles.len(),
                files.len()
            )));
        }

        let names = files.iter().enumerate().map(|(i, file)| {
            titles.get(i).cloned().unwrap_or_else(|| file.basename())
        });
        let chapters = chapters_from_durations(names.zip(durations.iter().copied()));

        debug!(
            "Planned {} chapters, total {:?}",
            chapters.len(),
            chapters.last().map(|c| c.end)
        );
        Ok(chapters)
    }
}

/// Prefix-sum `(title, duration)` pairs into chapters
pub fn chapters_from_durations<I>(entries: I) -> Vec<Chapter>
where
    I: IntoIterator<Item = (String, Duration)>,
{
    let mut position = Duration::ZERO;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, (title, length))| {
            let start = position;
            position += length;
            Chapter {
                index,
                title,
                start,
                end: position,
            }
        })
        .collect()
}
