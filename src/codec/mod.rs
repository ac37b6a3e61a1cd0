mod assemble;
mod parse;

use std::sync::Arc;

use anyhow::Context;
use rayon::prelude::*;

use crate::config::Config;
use crate::error::{CcidError, Result};
use crate::lookup::{CountyTable, DiskTables, IrregularStore, StateInput};
use crate::region::{Ccid, RegionType};

pub use parse::break_ccid;
pub(crate) use parse::validate;

/// A region identifier as supplied by upstream data: a numeric code or a
/// free-form code/name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionInput {
    Code(u64),
    Text(String),
}

impl RegionInput {
    /// Trimmed textual form; numeric codes print without padding.
    pub fn text(&self) -> String {
        match self {
            RegionInput::Code(n) => n.to_string(),
            RegionInput::Text(text) => text.trim().to_string(),
        }
    }
}

impl std::fmt::Display for RegionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<u32> for RegionInput {
    fn from(value: u32) -> Self { RegionInput::Code(value.into()) }
}

impl From<u64> for RegionInput {
    fn from(value: u64) -> Self { RegionInput::Code(value) }
}

impl From<&str> for RegionInput {
    fn from(value: &str) -> Self { RegionInput::Text(value.to_string()) }
}

impl From<String> for RegionInput {
    fn from(value: String) -> Self { RegionInput::Text(value) }
}

/// Spreadsheet columns often load codes as floats; only whole,
/// non-negative values are codes.
impl TryFrom<f64> for RegionInput {
    type Error = CcidError;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
            return Err(CcidError::FractionalCode(value));
        }
        Ok(RegionInput::Code(value as u64))
    }
}

/// Builds canonical CCIDs from raw codes and names.
///
/// Holds the county-name table and the irregular district store, both
/// read-only after construction, so one codec can be shared across threads.
#[derive(Debug)]
pub struct Codec {
    counties: CountyTable,
    irregulars: IrregularStore,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CountyTable::new(), IrregularStore::empty())
    }
}

impl Codec {
    pub fn new(counties: CountyTable, irregulars: IrregularStore) -> Self {
        Self { counties, irregulars }
    }

    /// Opens the configured table directory, loads every flagged irregular
    /// table and the optional county CSV.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let tables = DiskTables::open(&config.irregular_dir)
            .context("[codec] Failed to open irregular table directory")?;
        let irregulars = IrregularStore::new(Arc::new(tables), config.irregular_flags()?)?
            .preload()
            .context("[codec] Failed to load irregular tables")?;

        let counties = match &config.county_csv {
            Some(path) => CountyTable::read_csv(path)
                .with_context(|| format!("[codec] Failed to load county table {}", path.display()))?,
            None => CountyTable::new(),
        };

        tracing::debug!(
            "[codec] loaded {} irregular chambers and {} county names",
            irregulars.flagged().len(),
            counties.len(),
        );
        Ok(Self::new(counties, irregulars))
    }

    pub fn counties(&self) -> &CountyTable { &self.counties }

    pub fn irregulars(&self) -> &IrregularStore { &self.irregulars }

    /// Assembles the CCID of a region of type `ty` from a raw code or name.
    ///
    /// `state` qualifies short codes and names; it is ignored for
    /// [`RegionType::State`]. Full codes given together with a `state` must
    /// agree with it.
    pub fn assemble(&self, ty: RegionType, raw: impl Into<RegionInput>, state: Option<StateInput>) -> Result<Ccid> {
        let raw = raw.into();
        // integer inputs cannot carry leading zeros
        let numeric = matches!(raw, RegionInput::Code(_));
        let raw = raw.text();
        let state = match (ty, state) {
            (RegionType::State, _) | (_, None) => None,
            (_, Some(state)) => Some(state.resolve()?),
        };
        let state = state.as_deref();

        let code = match ty {
            RegionType::State => assemble::state(&raw),
            RegionType::County => assemble::county(&self.counties, &raw, state, numeric)?,
            RegionType::Congressional => assemble::congressional(&raw, state, numeric)?,
            RegionType::StateLegUpper | RegionType::StateLegLower => {
                assemble::state_leg(&self.irregulars, ty, &raw, state, numeric)?
            }
        };
        let code = code.ok_or_else(|| CcidError::UnparsableInput {
            ty,
            raw: raw.clone(),
            state: state.map(str::to_string),
        })?;

        validate(&code)?;
        tracing::trace!("[codec] {ty} '{raw}' -> {code}");
        Ok(Ccid::new_unchecked(code))
    }

    /// Assembles independent rows in parallel, keeping input order.
    pub fn assemble_batch(&self, rows: &[(RegionType, RegionInput, Option<StateInput>)]) -> Vec<Result<Ccid>> {
        rows.par_iter()
            .map(|(ty, raw, state)| self.assemble(*ty, raw.clone(), state.clone()))
            .collect()
    }
}
