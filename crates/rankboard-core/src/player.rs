//! Player identifiers of the form `name#tag`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FormatError;

/// Separator between the game name and the tag line.
pub const ID_SEPARATOR: char = '#';

/// Identifiers must be strictly shorter than this many characters.
pub const MAX_ID_LEN: usize = 30;

/// A tracked player, e.g. `Henri#EUW`.
///
/// Case is kept exactly as entered; equality is byte equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Validate and wrap an identifier.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        if s.is_empty() {
            return Err(FormatError::EmptyId);
        }
        let len = s.chars().count();
        if len >= MAX_ID_LEN {
            return Err(FormatError::IdTooLong { len });
        }
        if s.matches(ID_SEPARATOR).count() != 1 {
            return Err(FormatError::Separator(s.to_string()));
        }
        let (name, tag) = s
            .split_once(ID_SEPARATOR)
            .ok_or_else(|| FormatError::Separator(s.to_string()))?;
        if name.is_empty() || tag.is_empty() {
            return Err(FormatError::Separator(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Game name, the part before `#`.
    pub fn name(&self) -> &str {
        self.parts().0
    }

    /// Tag line, the part after `#`.
    pub fn tag(&self) -> &str {
        self.parts().1
    }

    fn parts(&self) -> (&str, &str) {
        // Validated in `parse`.
        self.0.split_once(ID_SEPARATOR).unwrap_or((&self.0, ""))
    }
}

impl FromStr for PlayerId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = FormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
