use serde::{Deserialize, Serialize};

use crate::error::{CcidError, Result};
use super::{Ccid, RegionType};

/// A weighted overlap edge from a region to one region of another type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFragment {
    pub region: Ccid,
    pub population: u64,
    pub perc_of_whole: f64, // share of the owning region's population inside `region`
}

impl RegionFragment {
    pub fn new(region: Ccid, population: u64, perc_of_whole: f64) -> Result<Self> {
        let fragment = Self { region, population, perc_of_whole };
        fragment.validate()?;
        Ok(fragment)
    }

    /// Weights are individual shares and never exceed the whole.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.perc_of_whole) {
            return Err(CcidError::InvalidFragment {
                region: self.region.clone(),
                reason: format!("perc_of_whole {} is outside [0, 1]", self.perc_of_whole),
            });
        }
        Ok(())
    }
}

/// A canonical region and its overlaps with regions of other types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub ccid: Ccid,
    pub name: String,
    #[serde(default)]
    pub fragments: Vec<RegionFragment>,
}

impl Region {
    pub fn new(ccid: Ccid, name: impl Into<String>) -> Self {
        Self { ccid, name: name.into(), fragments: Vec::new() }
    }

    pub fn ty(&self) -> RegionType { self.ccid.region_type() }

    /// Adds an overlap edge. Overlaps with the region's own type are rejected.
    pub fn add_fragment(&mut self, fragment: RegionFragment) -> Result<()> {
        fragment.validate()?;
        if fragment.region.region_type() == self.ty() {
            return Err(CcidError::InvalidFragment {
                region: fragment.region,
                reason: format!("overlaps must join different region types, both are {}", self.ty()),
            });
        }
        self.fragments.push(fragment);
        Ok(())
    }

    /// Fragments whose overlapping region is of type `ty`.
    pub fn fragments_of(&self, ty: RegionType) -> impl Iterator<Item = &RegionFragment> {
        self.fragments.iter().filter(move |f| f.region.region_type() == ty)
    }
}
