//! Random card identifiers

use crate::error::{Error, Result};
use std::fmt;
use uuid::Uuid;

/// A card identifier: a random (v4) UUID rendered as lowercase hyphenated hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a fresh random identifier
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID value
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidArgument(format!("'{s}' is not a UUID: {e}")))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Generate `count` identifiers in order.
///
/// No uniqueness check is performed across the batch; v4 collisions are
/// treated as negligible. A negative count is rejected.
pub fn generate(count: i64) -> Result<Vec<Identifier>> {
    if count < 0 {
        return Err(Error::InvalidArgument(format!(
            "identifier count must be >= 0, got {count}"
        )));
    }

    Ok((0..count).map(|_| Identifier::new_random()).collect())
}
