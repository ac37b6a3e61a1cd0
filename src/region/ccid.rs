use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::break_ccid;
use crate::error::{CcidError, Result};
use super::RegionType;

/// Canonical region key. Only constructed from validated text, so the shape
/// alone determines the region type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ccid(Arc<str>); // e.g. "04", "0401", "04013", "04013U"

impl Ccid {
    /// Validates `text` against the CCID shape rules.
    pub fn parse(text: &str) -> Result<Self> {
        break_ccid(text)?;
        Ok(Self(Arc::from(text)))
    }

    /// Caller guarantees `text` already passed `break_ccid`.
    pub(crate) fn new_unchecked(text: String) -> Self {
        Self(Arc::from(text))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn region_type(&self) -> RegionType {
        match (self.0.len(), self.0.chars().last()) {
            (2, _) => RegionType::State,
            (4, _) => RegionType::Congressional,
            (6, Some('U')) => RegionType::StateLegUpper,
            (6, _) => RegionType::StateLegLower,
            _ => RegionType::County,
        }
    }

    pub fn state_fips(&self) -> &str { &self.0[..2] }

    /// District or county body, without state prefix or chamber suffix.
    pub fn district(&self) -> Option<&str> {
        match self.0.len() {
            2 => None,
            6 => Some(&self.0[2..5]),
            _ => Some(&self.0[2..]),
        }
    }

    /// Returns the CCID of the state containing this region.
    pub fn to_state(&self) -> Ccid {
        Ccid(Arc::from(self.state_fips()))
    }
}

impl std::fmt::Display for Ccid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ccid {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::str::FromStr for Ccid {
    type Err = CcidError;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Ccid {
    type Error = CcidError;

    fn try_from(value: String) -> Result<Self> {
        break_ccid(&value)?;
        Ok(Self(Arc::from(value)))
    }
}

impl From<Ccid> for String {
    fn from(value: Ccid) -> Self { value.0.to_string() }
}
