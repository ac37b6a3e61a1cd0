#![doc = "Canonical region identifiers (CCIDs) and population-weighted apportionment"]
mod apportion;
mod codec;
mod config;
mod error;
mod lookup;
mod region;

#[doc(inline)]
pub use region::{Ccid, Region, RegionFragment, RegionType};

#[doc(inline)]
pub use codec::{break_ccid, Codec, RegionInput};

#[doc(inline)]
pub use lookup::{
    lookup_state, name_variants, table_name, CountyTable, DiskTables, IrregularStore, IrregularTable,
    MemTables, State, StateInput, TableSource, STATES,
};

#[doc(inline)]
pub use apportion::{backfill, extrapolate, AsthmaData, JobsCounts, JobsData, JobsStat, Statistic};

pub use config::Config;
pub use error::{CcidError, CcidRule, Result};
