//! Add and remove tracked players.
//!
//! Input validation problems come back as outcome values with a user-facing
//! message, not as errors; only store and capture failures are `Err`.

use rankboard_core::{FormatError, PlayerId};
use tracing::info;

use crate::{Pipeline, PipelineError};

/// Result of an add request.
#[derive(Debug)]
pub enum AddOutcome {
    Added(PlayerId),
    AlreadyTracked(PlayerId),
    Invalid(FormatError),
    /// The id is well formed but has no public profile.
    NotFound(PlayerId),
}

/// Result of a remove request.
#[derive(Debug)]
pub enum RemoveOutcome {
    Removed(PlayerId),
    NotTracked(PlayerId),
    Invalid(FormatError),
}

impl Pipeline {
    /// Validate `raw`, confirm the profile exists, then track it.
    pub async fn add(&self, raw: &str) -> Result<AddOutcome, PipelineError> {
        let player = match PlayerId::parse(raw) {
            Ok(player) => player,
            Err(e) => return Ok(AddOutcome::Invalid(e)),
        };
        if !self.capture.exists(&player).await? {
            info!(%player, "add rejected, profile not found");
            return Ok(AddOutcome::NotFound(player));
        }
        if self.store.add(&player).await? {
            Ok(AddOutcome::Added(player))
        } else {
            Ok(AddOutcome::AlreadyTracked(player))
        }
    }

    /// Stop tracking `raw`. No existence check.
    pub async fn remove(&self, raw: &str) -> Result<RemoveOutcome, PipelineError> {
        let player = match PlayerId::parse(raw) {
            Ok(player) => player,
            Err(e) => return Ok(RemoveOutcome::Invalid(e)),
        };
        if self.store.remove(&player).await? {
            Ok(RemoveOutcome::Removed(player))
        } else {
            Ok(RemoveOutcome::NotTracked(player))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rankboard_store::IdStore;

    use crate::PipelineConfig;
    use crate::testing::{Script, ScriptedCapture, strs};

    fn pipeline(tmp: &tempfile::TempDir, capture: ScriptedCapture) -> Pipeline {
        let store = IdStore::new(tmp.path().join("ids.json"));
        Pipeline::new(Arc::new(capture), Arc::new(store), PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn add_existing_profile() {
        let tmp = tempfile::TempDir::new().unwrap();
        let p = pipeline(&tmp, ScriptedCapture::new([("a#1", Script::Rank("Gold I 1LP"))]));

        assert!(matches!(p.add("a#1").await.unwrap(), AddOutcome::Added(_)));
        assert!(matches!(p.add("a#1").await.unwrap(), AddOutcome::AlreadyTracked(_)));
        assert_eq!(strs(&p.store().load().await.unwrap()), ["a#1"]);
    }

    #[tokio::test]
    async fn add_rejects_malformed_without_lookup() {
        let tmp = tempfile::TempDir::new().unwrap();
        let capture = ScriptedCapture::new([]);
        let lookups = capture.calls();
        let p = pipeline(&tmp, capture);

        for raw in ["", "nohash", "much-too-long-player-name#EUW1"] {
            assert!(
                matches!(p.add(raw).await.unwrap(), AddOutcome::Invalid(_)),
                "{raw:?} should be invalid"
            );
        }
        assert_eq!(lookups.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(p.store().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_rejects_missing_profile() {
        let tmp = tempfile::TempDir::new().unwrap();
        let p = pipeline(&tmp, ScriptedCapture::new([("ghost#0", Script::NotFound)]));

        assert!(matches!(p.add("ghost#0").await.unwrap(), AddOutcome::NotFound(_)));
        assert!(p.store().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_surfaces_capture_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let p = pipeline(&tmp, ScriptedCapture::new([("a#1", Script::Fail)]));

        assert!(matches!(p.add("a#1").await, Err(PipelineError::Capture(_))));
        assert!(p.store().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_is_unconditional() {
        let tmp = tempfile::TempDir::new().unwrap();
        let p = pipeline(&tmp, ScriptedCapture::new([("a#1", Script::Rank("Gold I 1LP"))]));
        p.add("a#1").await.unwrap();

        assert!(matches!(p.remove("a#1").await.unwrap(), RemoveOutcome::Removed(_)));
        assert!(matches!(p.remove("a#1").await.unwrap(), RemoveOutcome::NotTracked(_)));
        assert!(matches!(p.remove("bad").await.unwrap(), RemoveOutcome::Invalid(_)));
    }
}
