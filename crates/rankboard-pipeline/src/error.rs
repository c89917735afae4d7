use rankboard_capture::CaptureError;
use rankboard_store::StoreError;
use thiserror::Error;

/// Failures that abort a whole operation. Per-player capture problems during a
/// run never surface here; they end up in the snapshot instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("id store error: {0}")]
    Store(#[from] StoreError),

    #[error("could not check player profile: {0}")]
    Capture(#[from] CaptureError),

    #[error("invalid pipeline config: {0}")]
    Config(String),
}
