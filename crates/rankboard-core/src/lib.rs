//! Core types shared across rankboard: ladder tiers, rank ordering, player ids, snapshots.

mod error;
pub mod player;
pub mod rank;
pub mod snapshot;

pub use error::FormatError;
pub use player::{ID_SEPARATOR, MAX_ID_LEN, PlayerId};
pub use rank::{RankRecord, Tier};
pub use snapshot::{CaptureResult, FailedCapture, LeaderboardSnapshot};
