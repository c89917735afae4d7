//! File-backed set of tracked player ids.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use rankboard_core::PlayerId;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::StoreError;

/// The tracked-player list.
///
/// The file holds a pretty-printed JSON array of unique id strings. Its order
/// is meaningful: after a leaderboard run it is the ranking from that run.
///
/// Every write goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old list or the new one.
/// Mutations are serialised through an internal mutex; share one `IdStore`
/// (e.g. behind an `Arc`) rather than opening the same path twice.
pub struct IdStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl IdStore {
    /// Open a store at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored ids in stored order.
    ///
    /// A missing file is an empty list. Duplicates in a hand-edited file are
    /// dropped, keeping the first occurrence.
    pub async fn load(&self) -> Result<Vec<PlayerId>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "id file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let entries: Vec<String> = serde_json::from_slice(&bytes)?;
        let ids = entries
            .into_iter()
            .map(|entry| {
                PlayerId::parse(&entry).map_err(|source| StoreError::InvalidEntry { entry, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(dedup(ids))
    }

    /// Append `id` unless already present. Returns `true` if it was inserted.
    pub async fn add(&self, id: &PlayerId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut ids = self.load().await?;
        if ids.contains(id) {
            debug!(%id, "id already tracked");
            return Ok(false);
        }
        ids.push(id.clone());
        self.write(ids).await?;
        info!(%id, "id added");
        Ok(true)
    }

    /// Drop `id` if present. Returns `true` if it was there.
    pub async fn remove(&self, id: &PlayerId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut ids = self.load().await?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            debug!(%id, "id not tracked, nothing to remove");
            return Ok(false);
        }
        self.write(ids).await?;
        info!(%id, "id removed");
        Ok(true)
    }

    /// Overwrite the whole list with `ids`, deduplicated, in the given order.
    pub async fn replace_all(&self, ids: &[PlayerId]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let ids = dedup(ids.to_vec());
        let count = ids.len();
        self.write(ids).await?;
        info!(count, path = %self.path.display(), "id list replaced");
        Ok(())
    }

    async fn write(&self, ids: Vec<PlayerId>) -> Result<(), StoreError> {
        let mut bytes = serde_json::to_vec_pretty(&ids)?;
        bytes.push(b'\n');
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await?
    }
}

fn dedup(ids: Vec<PlayerId>) -> Vec<PlayerId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path)?;
    Ok(())
}
