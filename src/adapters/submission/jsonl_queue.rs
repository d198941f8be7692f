//! JSON-lines file implementation of FallbackQueue.
//!
//! One serialized [`FallbackEntry`] per line. The file is only ever opened in
//! append mode; a line that fails to parse on read is skipped with a warning
//! so one torn write does not hide the rest of the backlog.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use crate::ports::{FallbackEntry, FallbackQueue, PersistenceError};

/// Append-only JSON-lines backup file.
#[derive(Debug)]
pub struct JsonlFallbackQueue {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlFallbackQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FallbackQueue for JsonlFallbackQueue {
    async fn append(&self, entry: FallbackEntry) -> Result<(), PersistenceError> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<FallbackEntry>, PersistenceError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(number, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = %self.path.display(), line = number + 1, error = %e, "Skipping unreadable fallback entry");
                    None
                }
            })
            .collect();

        Ok(entries)
    }
}
