//! Leaderboard aggregation.
//!
//! A [`Pipeline`] pairs a [`ProfileCapture`](rankboard_capture::ProfileCapture)
//! with an [`IdStore`](rankboard_store::IdStore). A run captures every tracked
//! player concurrently under a session cap, ranks the results, and rewrites the
//! store so that players whose profile no longer exists drop out.

mod commands;
mod error;
mod pipeline;
#[cfg(test)]
mod testing;

pub use commands::{AddOutcome, RemoveOutcome};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineConfig, TaskOutcome};
