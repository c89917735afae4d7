//! Public profile URLs and evidence file names.

use std::path::{Path, PathBuf};

use rankboard_core::PlayerId;
use reqwest::Url;

use crate::CaptureError;

pub const DEFAULT_HOST: &str = "tactics.tools";
pub const DEFAULT_REGION: &str = "euw";

/// Where a player's public profile lives: `https://<host>/player/<region>/<name>/<tag>`.
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    host: String,
    region: String,
}

impl Default for ProfileLocator {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_REGION)
    }
}

impl ProfileLocator {
    pub fn new(host: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Profile URL for `player`. Name and tag are percent-encoded as path segments.
    pub fn profile_url(&self, player: &PlayerId) -> Result<Url, CaptureError> {
        let mut url = Url::parse(&format!("https://{}/", self.host))
            .map_err(|e| CaptureError::Url(format!("{}: {e}", self.host)))?;
        url.path_segments_mut()
            .map_err(|()| CaptureError::Url(self.host.clone()))?
            .clear()
            .extend(["player", self.region.as_str(), player.name(), player.tag()]);
        Ok(url)
    }
}

/// Where the uncompressed screenshot for `player` is written.
///
/// The id becomes a single file name inside `dir`: path separators, `%`,
/// control characters and a leading `.` are percent-encoded.
pub(crate) fn screenshot_path(dir: &Path, player: &PlayerId) -> PathBuf {
    dir.join(format!("{}.png", file_stem(player)))
}

/// Compressed evidence for `player`, as written by [`compress_png`](crate::compress_png).
pub(crate) fn evidence_path(dir: &Path, player: &PlayerId) -> PathBuf {
    dir.join(format!("{}_compressed.png", file_stem(player)))
}

fn file_stem(player: &PlayerId) -> String {
    let mut stem = String::with_capacity(player.as_str().len());
    for (i, c) in player.as_str().chars().enumerate() {
        match c {
            '/' | '\\' | '%' | ':' => stem.push_str(&format!("%{:02X}", c as u32)),
            '.' if i == 0 => stem.push_str("%2E"),
            c if c.is_control() => stem.push_str(&format!("%{:02X}", c as u32)),
            c => stem.push(c),
        }
    }
    stem
}
