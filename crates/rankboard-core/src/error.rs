use thiserror::Error;

/// Malformed player identifier or rank string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("player id is empty")]
    EmptyId,

    #[error("player id is {len} characters, must be under {max}", max = crate::MAX_ID_LEN)]
    IdTooLong { len: usize },

    #[error("player id must contain exactly one '#' between name and tag: {0:?}")]
    Separator(String),

    #[error("invalid rank format: {0:?}")]
    RankSyntax(String),

    #[error("unknown tier: {0:?}")]
    UnknownTier(String),

    #[error("league points out of range: {0}")]
    LeaguePoints(String),
}
