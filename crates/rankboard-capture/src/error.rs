use std::path::PathBuf;
use std::time::Duration;

use rankboard_core::{FormatError, PlayerId};
use thiserror::Error;

/// A capture that failed for a reason other than "the profile does not exist".
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("render service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("render service returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("invalid profile url: {0}")]
    Url(String),

    #[error("unexpected page layout for {player}: {detail}")]
    Layout { player: PlayerId, detail: String },

    #[error("unreadable rank text: {0}")]
    Rank(#[from] FormatError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("capture timed out after {0:?}")]
    Timeout(Duration),

    #[error("capture task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
