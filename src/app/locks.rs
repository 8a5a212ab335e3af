//! One writer per output path

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of async mutexes keyed on output path.
///
/// Jobs targeting the same output queue behind each other; jobs for different
/// outputs run independently. Paths are compared after lexical normalization
/// against the current directory, so `out.mp4` and `./out.mp4` share a lock.
#[derive(Debug, Default, Clone)]
pub struct OutputLocks {
    locks: Arc<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>>,
}

impl OutputLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other job is writing `output`, then hold it
    pub async fn acquire(&self, output: &Path) -> OwnedMutexGuard<()> {
        let key = normalize(output);
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Drop entries nobody is holding or waiting on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }
}

fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
