//! Storage layer: the tracked-player list, persisted as a single JSON file.

mod error;
mod ids;

pub use error::StoreError;
pub use ids::IdStore;
