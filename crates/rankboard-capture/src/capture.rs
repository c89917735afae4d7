//! Profile existence checks and rank capture.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rankboard_core::{CaptureResult, PlayerId, RankRecord};
use tracing::{debug, info, warn};

use crate::locator::{evidence_path, screenshot_path};
use crate::render::{Element, RenderClient, RenderSession};
use crate::{CaptureError, ProfileLocator, compress_png};

/// Result of a capture that reached the profile page.
#[derive(Debug)]
pub enum CaptureOutcome {
    Found(CaptureResult),
    /// The profile page says the player does not exist.
    NotFound,
}

/// Checks and captures player profiles.
///
/// Implementations report a missing profile as `Ok(false)` / `Ok(NotFound)`
/// and reserve `Err` for failures that say nothing about whether the player
/// exists (service down, timeout, unexpected page).
#[async_trait]
pub trait ProfileCapture: Send + Sync {
    /// Whether `player` has a public profile.
    async fn exists(&self, player: &PlayerId) -> Result<bool, CaptureError>;

    /// Read `player`'s rank and save a compressed screenshot of it.
    async fn capture(&self, player: &PlayerId) -> Result<CaptureOutcome, CaptureError>;
}

/// Where things are on the profile page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Cookie consent button, clicked if present.
    pub consent_button: String,
    /// Text shown in place of a profile when the player is unknown.
    pub missing_marker: String,
    /// Tab holding ranked stats.
    pub ranked_tab: String,
    /// Overlays removed before the screenshot.
    pub hide: Vec<Element>,
    /// Region captured as evidence.
    pub evidence: Element,
    /// Node whose text is the `"<tier> <lp>LP"` string.
    pub rank_text: Element,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            consent_button: "Accept".into(),
            missing_marker: "Summoner ".into(),
            ranked_tab: "Ranked".into(),
            hide: vec![
                Element::css("#menu"),
                Element::css("div").with_exact_text("LeaderboardsWrapped").first(),
            ],
            evidence: Element::css("div:nth-child(2) > div:nth-child(2) > div:nth-child(2)")
                .first(),
            rank_text: Element::css(
                "xpath=//*[@id=\"content-container\"]/div/div[2]/div[2]/div[2]/div[1]/div[2]/div[1]/div[7]/div[2]/div[1]",
            ),
        }
    }
}

/// [`ProfileCapture`] backed by the rendering service.
///
/// Each call opens its own session and closes it before returning.
pub struct BrowserCapture {
    render: RenderClient,
    locator: ProfileLocator,
    layout: PageLayout,
    evidence_dir: PathBuf,
}

impl BrowserCapture {
    pub fn new(
        render: RenderClient,
        locator: ProfileLocator,
        evidence_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            render,
            locator,
            layout: PageLayout::default(),
            evidence_dir: evidence_dir.into(),
        }
    }

    /// Load the profile and dismiss consent. Returns `false` if the page
    /// shows the missing-player marker.
    async fn open_profile(
        &self,
        session: &RenderSession,
        player: &PlayerId,
    ) -> Result<bool, CaptureError> {
        let url = self.locator.profile_url(player)?;
        debug!(%player, %url, "loading profile");
        session.goto(&url).await?;
        session.click("button", &self.layout.consent_button, false).await?;
        Ok(!session.is_visible(&self.layout.missing_marker).await?)
    }

    async fn capture_in(
        &self,
        session: &RenderSession,
        player: &PlayerId,
    ) -> Result<CaptureOutcome, CaptureError> {
        if !self.open_profile(session, player).await? {
            self.remove_stale_evidence(player).await;
            return Ok(CaptureOutcome::NotFound);
        }

        session.click("tab", &self.layout.ranked_tab, true).await?;
        for element in &self.layout.hide {
            session.hide(element).await?;
        }

        let texts = session.texts(&self.layout.rank_text).await?;
        let text = texts
            .iter()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .ok_or_else(|| CaptureError::Layout {
                player: player.clone(),
                detail: "rank text not found".into(),
            })?;
        let rank = RankRecord::parse(text)?;

        let png = session.screenshot(&self.layout.evidence).await?;
        let evidence = self.store_evidence(player, png).await?;

        info!(%player, %rank, evidence = %evidence.display(), "profile captured");
        Ok(CaptureOutcome::Found(CaptureResult {
            player: player.clone(),
            rank,
            evidence,
        }))
    }

    async fn store_evidence(
        &self,
        player: &PlayerId,
        png: Vec<u8>,
    ) -> Result<PathBuf, CaptureError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| CaptureError::Io { path, source }
        };

        tokio::fs::create_dir_all(&self.evidence_dir)
            .await
            .map_err(io_err(&self.evidence_dir))?;
        let raw = screenshot_path(&self.evidence_dir, player);
        tokio::fs::write(&raw, png).await.map_err(io_err(&raw))?;

        let src = raw.clone();
        let compressed = tokio::task::spawn_blocking(move || compress_png(&src)).await;
        match compressed {
            Ok(Ok(path)) => Ok(path),
            Ok(Err(e)) => {
                remove_if_present(&raw).await;
                Err(e)
            }
            Err(e) => {
                remove_if_present(&raw).await;
                Err(e.into())
            }
        }
    }

    /// A profile that is gone keeps no evidence from earlier runs.
    async fn remove_stale_evidence(&self, player: &PlayerId) {
        remove_if_present(&screenshot_path(&self.evidence_dir, player)).await;
        remove_if_present(&evidence_path(&self.evidence_dir, player)).await;
    }
}

async fn remove_if_present(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "evidence file removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove evidence file"),
    }
}

#[async_trait]
impl ProfileCapture for BrowserCapture {
    async fn exists(&self, player: &PlayerId) -> Result<bool, CaptureError> {
        let session = self.render.open_session().await?;
        let result = self.open_profile(&session, player).await;
        session.close().await;
        result
    }

    async fn capture(&self, player: &PlayerId) -> Result<CaptureOutcome, CaptureError> {
        let session = self.render.open_session().await?;
        let result = self.capture_in(&session, player).await;
        session.close().await;
        result
    }
}
