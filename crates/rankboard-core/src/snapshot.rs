//! Capture results and the sorted leaderboard built from them.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{PlayerId, RankRecord};

/// A live profile: its current rank and the screenshot proving it.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureResult {
    pub player: PlayerId,
    pub rank: RankRecord,
    /// Compressed screenshot on disk.
    pub evidence: PathBuf,
}

/// A player whose capture failed for a reason other than "profile not found".
#[derive(Debug, Clone, Serialize)]
pub struct FailedCapture {
    pub player: PlayerId,
    pub reason: String,
}

/// The result of one aggregation run, best rank first.
///
/// Built fresh per run. Players with equal rank keep the order they had in
/// the input, so the result never depends on which capture finished first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderboardSnapshot {
    entries: Vec<CaptureResult>,
    failed: Vec<FailedCapture>,
}

impl LeaderboardSnapshot {
    /// Sort `entries` best-first (stable) and wrap them.
    pub fn new(mut entries: Vec<CaptureResult>, failed: Vec<FailedCapture>) -> Self {
        entries.sort_by(|a, b| b.rank.cmp(&a.rank));
        Self { entries, failed }
    }

    pub fn entries(&self) -> &[CaptureResult] {
        &self.entries
    }

    pub fn failed(&self) -> &[FailedCapture] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranked players in leaderboard order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.entries.iter().map(|e| &e.player)
    }

    /// Evidence files in leaderboard order.
    pub fn evidence_paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.evidence.as_path())
    }

    /// Entries in consecutive groups of at most `size`, for callers that must
    /// split attachments across several messages.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn chunks(&self, size: usize) -> std::slice::Chunks<'_, CaptureResult> {
        self.entries.chunks(size)
    }
}
