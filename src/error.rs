use thiserror::Error;

use crate::region::{Ccid, RegionType};

/// Result type for codec, lookup and apportionment operations.
pub type Result<T> = std::result::Result<T, CcidError>;

/// The shape rule a CCID string violated, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcidRule {
    /// Length must be 2, 4, 5 or 6.
    Length,
    /// First two characters must be a numeric state FIPS in `1..=95`.
    StateRange,
    /// Region body must be `\d{2,3}`, `\d{2}[ABC]` or a census placeholder.
    Body,
    /// Trailing chamber letter must be `U` or `L`.
    Suffix,
}

impl std::fmt::Display for CcidRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            CcidRule::Length => "length must be 2, 4, 5, or 6",
            CcidRule::StateRange => "must begin with a 2-digit state FIPS code between 01 and 95",
            CcidRule::Body => "region code must be 3 digits, 2 digits and A/B/C, or a ZZZ placeholder",
            CcidRule::Suffix => "chamber suffix must be 'U' or 'L'",
        };
        f.write_str(msg)
    }
}

/// All failures are data-quality or programming errors; none are retryable.
#[derive(Error, Debug)]
pub enum CcidError {
    #[error("unable to interpret '{0}' as a region type")]
    UnknownVariant(String),

    #[error("'{token}' matches more than one region type: {matches:?}")]
    AmbiguousVariant { token: String, matches: Vec<RegionType> },

    #[error("could not interpret '{raw}' as a {ty} code or name (state: {state:?})")]
    UnparsableInput { ty: RegionType, raw: String, state: Option<String> },

    #[error("region code {0} has a fractional component")]
    FractionalCode(f64),

    #[error("could not interpret '{0}' as a state FIPS code, USPS abbreviation, or state name")]
    UnknownState(String),

    #[error("{ty} input '{raw}' needs a state to be assembled")]
    MissingStateInput { ty: RegionType, raw: String },

    #[error("ambiguous input: region code '{code}' embeds state '{embedded}' but state '{state}' was given")]
    AmbiguousStateInput { code: String, embedded: String, state: String },

    #[error("no irregular district table for {state} {chamber}")]
    MissingIrregularTable { state: String, chamber: RegionType },

    #[error("irregular district table {key} is malformed: {reason}")]
    InvalidIrregularTable { key: String, reason: String },

    #[error("'{code}' is not a known {chamber} district of {state}")]
    InvalidIrregularCode { code: String, state: String, chamber: RegionType },

    #[error("invalid CCID '{ccid}': {rule}")]
    MalformedCcid { ccid: String, rule: CcidRule },

    #[error("cannot extrapolate {target} from {source_region}: its data is extrapolated itself")]
    ChainedExtrapolation { target: Ccid, source_region: Ccid },

    #[error("cannot extrapolate {target}: overlapping region {source_region} has no data")]
    MissingSourceStatistic { target: Ccid, source_region: Ccid },

    #[error("invalid fragment {region}: {reason}")]
    InvalidFragment { region: Ccid, reason: String },

    #[error("failed to read irregular table {key}")]
    TableSource {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl CcidError {
    pub(crate) fn malformed(ccid: &str, rule: CcidRule) -> Self {
        CcidError::MalformedCcid { ccid: ccid.to_string(), rule }
    }
}
