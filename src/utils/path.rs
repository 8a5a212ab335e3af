//! Input path expansion

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ChapcatError, ChapcatResult};

/// Expand directory inputs into the media files they contain.
///
/// Plain paths pass through untouched, in order, and are validated later by
/// `MediaFile::open`. A directory is replaced by the regular files directly
/// inside it whose extension is in `extensions` (case-insensitive), sorted by
/// file name.
pub fn expand_inputs(inputs: &[PathBuf], extensions: &[String]) -> ChapcatResult<Vec<PathBuf>> {
    let mut expanded = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !input.is_dir() {
            expanded.push(input.clone());
            continue;
        }

        let before = expanded.len();
        for entry in WalkDir::new(input)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                expanded.push(entry.into_path());
            }
        }

        let found = expanded.len() - before;
        if found == 0 {
            return Err(ChapcatError::invalid_input(format!(
                "Directory {} contains no files with extension {}",
                input.display(),
                extensions.join(", ")
            )));
        }
        debug!("Expanded {} into {} files", input.display(), found);
    }

    Ok(expanded)
}

/// Check whether the path's extension is one of `extensions`, ignoring case
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}
