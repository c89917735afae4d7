//! Scripted `ProfileCapture` for unit tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rankboard_capture::{CaptureError, CaptureOutcome, ProfileCapture};
use rankboard_core::{CaptureResult, PlayerId, RankRecord};

#[derive(Debug, Clone)]
pub enum Script {
    Rank(&'static str),
    Delayed(Duration, &'static str),
    NotFound,
    Fail,
    Hang,
    Panic,
}

pub struct ScriptedCapture {
    scripts: HashMap<String, Script>,
    calls: Arc<AtomicUsize>,
    in_flight: AtomicUsize,
    peak: Arc<AtomicUsize>,
}

impl ScriptedCapture {
    pub fn new<'a>(scripts: impl IntoIterator<Item = (&'a str, Script)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(id, script)| (id.to_string(), script))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: AtomicUsize::new(0),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Total `exists` + `capture` calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Most `capture` calls running at once.
    pub fn peak(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak)
    }

    fn script(&self, player: &PlayerId) -> Script {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripts
            .get(player.as_str())
            .cloned()
            .unwrap_or(Script::NotFound)
    }

    fn found(player: &PlayerId, rank: &str) -> CaptureOutcome {
        CaptureOutcome::Found(CaptureResult {
            player: player.clone(),
            rank: RankRecord::parse(rank).unwrap(),
            evidence: PathBuf::from(format!("screens/{player}_compressed.png")),
        })
    }

    fn failure() -> CaptureError {
        CaptureError::Server {
            status: 503,
            body: "render service unavailable".into(),
        }
    }
}

#[async_trait]
impl ProfileCapture for ScriptedCapture {
    async fn exists(&self, player: &PlayerId) -> Result<bool, CaptureError> {
        match self.script(player) {
            Script::Rank(_) | Script::Delayed(..) => Ok(true),
            Script::NotFound => Ok(false),
            Script::Fail => Err(Self::failure()),
            Script::Hang => std::future::pending().await,
            Script::Panic => panic!("scripted panic for {player}"),
        }
    }

    async fn capture(&self, player: &PlayerId) -> Result<CaptureOutcome, CaptureError> {
        let script = self.script(player);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let result = match script {
            Script::Rank(rank) => Ok(Self::found(player, rank)),
            Script::Delayed(delay, rank) => {
                tokio::time::sleep(delay).await;
                Ok(Self::found(player, rank))
            }
            Script::NotFound => Ok(CaptureOutcome::NotFound),
            Script::Fail => Err(Self::failure()),
            Script::Hang => std::future::pending().await,
            Script::Panic => panic!("scripted panic for {player}"),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub fn id(s: &str) -> PlayerId {
    PlayerId::parse(s).unwrap()
}

pub fn strs(ids: &[PlayerId]) -> Vec<&str> {
    ids.iter().map(|i| i.as_str()).collect()
}
