//! Fan-out capture over every tracked player, fan-in, rank, persist.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use rankboard_capture::{CaptureError, CaptureOutcome, ProfileCapture};
use rankboard_core::{CaptureResult, FailedCapture, LeaderboardSnapshot, PlayerId};
use rankboard_store::IdStore;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::PipelineError;

/// Concurrency and timeout limits for a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Most rendering sessions open at once.
    pub max_sessions: usize,
    /// Per-player budget, counted from when the player gets a session.
    pub task_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_sessions: 4,
            task_timeout: Duration::from_secs(60),
        }
    }
}

/// What happened to one player during a run.
#[derive(Debug)]
pub enum TaskOutcome {
    Captured(CaptureResult),
    /// Profile does not exist; the player is dropped from the stored list.
    NotFound,
    /// Capture could not finish; the player stays in the stored list.
    Failed(CaptureError),
}

/// The aggregation pipeline and the command surface built on it.
pub struct Pipeline {
    pub(crate) capture: Arc<dyn ProfileCapture>,
    pub(crate) store: Arc<IdStore>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        capture: Arc<dyn ProfileCapture>,
        store: Arc<IdStore>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        if config.max_sessions == 0 {
            return Err(PipelineError::Config("max_sessions must be at least 1".into()));
        }
        if config.task_timeout.is_zero() {
            return Err(PipelineError::Config("task_timeout must be non-zero".into()));
        }
        Ok(Self {
            capture,
            store,
            config,
        })
    }

    pub fn store(&self) -> &IdStore {
        &self.store
    }

    /// Capture every player in `ids`, rank the ones found, and replace the
    /// stored list with the result.
    ///
    /// The stored list becomes: ranked players best-first, then players whose
    /// capture failed in their input order. Players whose profile is gone are
    /// dropped. An empty `ids` clears the list. Repeated ids are captured
    /// once, at their first position.
    pub async fn run(&self, ids: &[PlayerId]) -> Result<LeaderboardSnapshot, PipelineError> {
        let start = Instant::now();
        let mut seen = HashSet::with_capacity(ids.len());
        let ids: Vec<PlayerId> = ids.iter().filter(|id| seen.insert(*id)).cloned().collect();
        info!(
            players = ids.len(),
            max_sessions = self.config.max_sessions,
            "leaderboard run started"
        );

        let outcomes = self.capture_all(&ids).await;

        let mut captured = Vec::new();
        let mut failed = Vec::new();
        let mut not_found = 0usize;
        for (player, outcome) in outcomes {
            match outcome {
                TaskOutcome::Captured(result) => captured.push(result),
                TaskOutcome::NotFound => {
                    info!(%player, "profile not found, dropping");
                    not_found += 1;
                }
                TaskOutcome::Failed(e) => {
                    warn!(%player, error = %e, "capture failed, keeping player");
                    failed.push(FailedCapture {
                        player,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let snapshot = LeaderboardSnapshot::new(captured, failed);
        if snapshot.is_empty() && snapshot.failed().is_empty() && !ids.is_empty() {
            warn!(players = ids.len(), "no profile resolved, stored list will be emptied");
        }

        let keep: Vec<PlayerId> = snapshot
            .players()
            .chain(snapshot.failed().iter().map(|f| &f.player))
            .cloned()
            .collect();
        self.store.replace_all(&keep).await?;

        info!(
            ranked = snapshot.len(),
            not_found,
            failed = snapshot.failed().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "leaderboard run finished"
        );
        Ok(snapshot)
    }

    /// Run over the stored list.
    pub async fn refresh(&self) -> Result<LeaderboardSnapshot, PipelineError> {
        let ids = self.store.load().await?;
        self.run(&ids).await
    }

    /// One task per player, all awaited. Results come back in input order.
    async fn capture_all(&self, ids: &[PlayerId]) -> Vec<(PlayerId, TaskOutcome)> {
        let sessions = Arc::new(Semaphore::new(self.config.max_sessions));
        let handles: Vec<_> = ids
            .iter()
            .map(|player| {
                let capture = Arc::clone(&self.capture);
                let sessions = Arc::clone(&sessions);
                let player = player.clone();
                let timeout = self.config.task_timeout;
                tokio::spawn(async move { capture_one(capture, sessions, &player, timeout).await })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .zip(ids.iter().cloned())
            .map(|(joined, player)| {
                let outcome = joined.unwrap_or_else(|e| TaskOutcome::Failed(CaptureError::Task(e)));
                (player, outcome)
            })
            .collect()
    }
}

async fn capture_one(
    capture: Arc<dyn ProfileCapture>,
    sessions: Arc<Semaphore>,
    player: &PlayerId,
    timeout: Duration,
) -> TaskOutcome {
    // The semaphore is never closed, so acquire only fails if it were.
    let _permit = sessions.acquire().await.ok();
    debug!(%player, "capture started");

    match tokio::time::timeout(timeout, capture.capture(player)).await {
        Ok(Ok(CaptureOutcome::Found(result))) => TaskOutcome::Captured(result),
        Ok(Ok(CaptureOutcome::NotFound)) => TaskOutcome::NotFound,
        Ok(Err(e)) => TaskOutcome::Failed(e),
        Err(_) => TaskOutcome::Failed(CaptureError::Timeout(timeout)),
    }
}
