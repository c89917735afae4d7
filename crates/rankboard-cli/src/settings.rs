//! Global flags and the objects built from them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use rankboard_capture::{BrowserCapture, DEFAULT_HOST, DEFAULT_REGION, ProfileLocator, RenderClient};
use rankboard_pipeline::{Pipeline, PipelineConfig};
use rankboard_store::IdStore;

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// JSON file holding the tracked ids
    #[arg(long, global = true, default_value = "ids.json", env = "RANKBOARD_IDS_FILE")]
    pub ids_file: PathBuf,

    /// Directory for compressed profile screenshots
    #[arg(long, global = true, default_value = "screens", env = "RANKBOARD_EVIDENCE_DIR")]
    pub evidence_dir: PathBuf,

    /// Base URL of the page-rendering service
    #[arg(
        long,
        global = true,
        default_value = "http://localhost:9222",
        env = "RANKBOARD_RENDER_URL",
    )]
    pub render_url: String,

    /// Host serving public player profiles
    #[arg(long, global = true, default_value = DEFAULT_HOST, env = "RANKBOARD_PROFILE_HOST")]
    pub profile_host: String,

    /// Region segment of profile URLs
    #[arg(long, global = true, default_value = DEFAULT_REGION, env = "RANKBOARD_REGION")]
    pub region: String,

    /// Most rendering sessions open at once
    #[arg(long, global = true, default_value_t = 4, env = "RANKBOARD_MAX_SESSIONS")]
    pub max_sessions: usize,

    /// Per-player capture budget in seconds
    #[arg(long, global = true, default_value_t = 60, env = "RANKBOARD_TIMEOUT_SECS")]
    pub timeout_secs: u64,
}

impl Settings {
    pub fn locator(&self) -> ProfileLocator {
        ProfileLocator::new(&self.profile_host, &self.region)
    }

    pub fn store(&self) -> IdStore {
        IdStore::new(&self.ids_file)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_sessions: self.max_sessions,
            task_timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn pipeline(&self) -> anyhow::Result<Pipeline> {
        let render = RenderClient::with_request_timeout(
            self.render_url.clone(),
            Duration::from_secs(self.timeout_secs),
        )?;
        let capture = BrowserCapture::new(render, self.locator(), &self.evidence_dir);
        let pipeline = Pipeline::new(
            Arc::new(capture),
            Arc::new(self.store()),
            self.pipeline_config(),
        )?;
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn defaults() {
        let s = Harness::parse_from(["rankboard"]).settings;
        assert_eq!(s.ids_file, PathBuf::from("ids.json"));
        assert_eq!(s.evidence_dir, PathBuf::from("screens"));
        assert_eq!(s.max_sessions, 4);
        assert_eq!(s.pipeline_config().task_timeout, Duration::from_secs(60));
        assert_eq!(s.locator().region(), "euw");
    }

    #[tokio::test]
    async fn store_follows_ids_file_flag() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tracked.json");
        let s = Harness::parse_from(["rankboard", "--ids-file", path.to_str().unwrap()]).settings;

        let store = s.store();
        assert_eq!(store.path(), path);
        assert!(store.load().await.unwrap().is_empty());

        let id = rankboard_core::PlayerId::parse("Henri#EUW").unwrap();
        store.add(&id).await.unwrap();
        assert_eq!(s.store().load().await.unwrap(), [id]);
        assert!(path.exists());
    }

    #[test]
    fn zero_sessions_is_rejected_when_building() {
        let s = Harness::parse_from(["rankboard", "--max-sessions", "0"]).settings;
        assert!(s.pipeline().is_err());
    }
}
