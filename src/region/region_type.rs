use serde::{Deserialize, Serialize};

use crate::error::{CcidError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    State,          // Highest-level entity
    County,         // County -> State
    Congressional,  // Congressional district -> State
    StateLegUpper,  // Upper-chamber district -> State
    StateLegLower,  // Lower-chamber district -> State
}

impl RegionType {
    pub const ALL: [RegionType; 5] = [
        RegionType::State,
        RegionType::County,
        RegionType::Congressional,
        RegionType::StateLegUpper,
        RegionType::StateLegLower,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            RegionType::State => "state",
            RegionType::County => "county",
            RegionType::Congressional => "congr",
            RegionType::StateLegUpper => "sldu",
            RegionType::StateLegLower => "sldl",
        }
    }

    /// Human-readable name.
    pub fn full(&self) -> &'static str {
        match self {
            RegionType::State => "State",
            RegionType::County => "County",
            RegionType::Congressional => "Congressional District",
            RegionType::StateLegUpper => "Upper State Legislative District",
            RegionType::StateLegLower => "Lower State Legislative District",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            RegionType::State => "States",
            RegionType::County => "Counties",
            RegionType::Congressional => "Congressional Districts",
            RegionType::StateLegUpper => "Upper State Legislative Districts",
            RegionType::StateLegLower => "Lower State Legislative Districts",
        }
    }

    /// Census API geography description, e.g. `"congressional district"`.
    pub fn census(&self) -> &'static str {
        match self {
            RegionType::State => "state",
            RegionType::County => "county",
            RegionType::Congressional => "congressional district",
            RegionType::StateLegUpper => "state legislative district (upper chamber)",
            RegionType::StateLegLower => "state legislative district (lower chamber)",
        }
    }

    /// MAF/TIGER feature class code.
    pub fn mtfcc(&self) -> &'static str {
        match self {
            RegionType::State => "G4000",
            RegionType::County => "G4020",
            RegionType::Congressional => "G5200",
            RegionType::StateLegUpper => "G5210",
            RegionType::StateLegLower => "G5220",
        }
    }

    /// Collection class name used by the region store.
    pub fn class_name(&self) -> &'static str {
        match self {
            RegionType::State => "Region.State",
            RegionType::County => "Region.County",
            RegionType::Congressional => "Region.District.CongressionalDistrict",
            RegionType::StateLegUpper => "Region.District.StateLegDistUpper",
            RegionType::StateLegLower => "Region.District.StateLegDistLower",
        }
    }

    /// Length of a canonical CCID of this type.
    pub fn ccid_len(&self) -> usize {
        match self {
            RegionType::State => 2,
            RegionType::County => 5,
            RegionType::Congressional => 4,
            RegionType::StateLegUpper | RegionType::StateLegLower => 6,
        }
    }

    /// Chamber letter appended to state legislative CCIDs.
    pub fn suffix(&self) -> Option<char> {
        match self {
            RegionType::StateLegUpper => Some('U'),
            RegionType::StateLegLower => Some('L'),
            _ => None,
        }
    }

    /// Short district prefix (`S`enate / `H`ouse) used in shortcodes.
    pub fn dist_abbr(&self) -> Option<char> {
        match self {
            RegionType::StateLegUpper => Some('S'),
            RegionType::StateLegLower => Some('H'),
            _ => None,
        }
    }

    pub fn is_state_leg(&self) -> bool {
        self.suffix().is_some()
    }

    pub fn from_suffix(suffix: char) -> Option<RegionType> {
        match suffix {
            'U' => Some(RegionType::StateLegUpper),
            'L' => Some(RegionType::StateLegLower),
            _ => None,
        }
    }

    /// Every descriptive string this type answers to.
    fn aliases(&self) -> [&'static str; 5] {
        [self.to_str(), self.full(), self.census(), self.mtfcc(), self.class_name()]
    }

    /// Maps a descriptive token (name, census tag, MTFCC, class name) onto a
    /// region type. Matching is case-insensitive and exact within each alias
    /// set; a token claimed by two types is an error, never a first match.
    pub fn fuzzy_cast(token: &str) -> Result<RegionType> {
        let needle = token.trim().to_lowercase();
        let matches: Vec<RegionType> = Self::ALL.into_iter()
            .filter(|ty| ty.aliases().iter().any(|alias| alias.to_lowercase() == needle))
            .collect();

        match matches.as_slice() {
            [] => Err(CcidError::UnknownVariant(token.to_string())),
            [ty] => Ok(*ty),
            _ => Err(CcidError::AmbiguousVariant { token: token.to_string(), matches }),
        }
    }
}

impl std::fmt::Display for RegionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.full())
    }
}

impl std::str::FromStr for RegionType {
    type Err = CcidError;

    fn from_str(s: &str) -> Result<Self> { Self::fuzzy_cast(s) }
}
