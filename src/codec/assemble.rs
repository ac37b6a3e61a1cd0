//! Per-region-type strategies for turning raw codes and names into CCIDs.
//!
//! Each strategy first tries the raw input as a FIPS/GEOID code (when it
//! matches the type's code pattern) and otherwise as a name. `Ok(None)` means
//! neither reading applies; hard inconsistencies are errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CcidError, Result};
use crate::lookup::{lookup_state, CountyTable, IrregularStore};
use crate::region::RegionType;

/// States and territories whose at-large seat is a non-voting delegate.
const NON_VOTING: [&str; 6] = ["11", "60", "66", "69", "72", "78"];

static STATE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}$").unwrap());
static COUNTY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,5}|\d{1,4}[ABC]|(\d{2})?ZZZ)$").unwrap());
static CONGR_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,4}|(\d{2})?ZZ)$").unwrap());
static STATE_LEG_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&[
        r"^\d{1,5}$",               // standard form
        r"^\d{1,4}[ABC]$",          // standard form with trailing letter
        r"^0200[A-Z]$",             // Alaska upper chamber
        r"^50[A-Z0-9-]{2}[A-Z0-9]$", // Vermont chambers
        r"^(\d{2})?ZZZ$",           // census land area without a district
    ].join("|")).unwrap()
});
static CANONICAL_STATE_LEG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}(\d{3}|\d{2}[ABC]|ZZZ)[UL]$").unwrap());
static CONGR_DISTRICT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}$").unwrap());
static STATE_LEG_DISTRICT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{3}|\d{2}[ABC])$").unwrap());

fn missing_state(ty: RegionType, raw: &str) -> CcidError {
    CcidError::MissingStateInput { ty, raw: raw.to_string() }
}

/// Last whitespace-delimited word of a name, zero-padded to `width`.
fn trailing_token(raw: &str, width: usize) -> Option<String> {
    raw.split_whitespace().last().map(|token| format!("{token:0>width$}"))
}

fn is_at_large(raw: &str) -> bool {
    let letters: String = raw.to_lowercase().chars().filter(char::is_ascii_lowercase).collect();
    letters == "atlarge"
}

/// Expands a numeric code into `state + district`.
///
/// Codes no longer than the district segment need `state`. Longer codes carry
/// their own state prefix and are zero-padded to full length. With an explicit
/// `state` the prefix must agree with it. Shortened text codes are rejected
/// outright, since they could have lost either a leading zero or a district
/// digit; integer codes (`numeric`) can only have lost leading zeros.
fn expand_code(ty: RegionType, code: &str, dist_len: usize, state: Option<&str>, numeric: bool) -> Result<String> {
    let full_len = dist_len + 2;
    if code.len() <= dist_len {
        let state = state.ok_or_else(|| missing_state(ty, code))?;
        return Ok(format!("{state}{code:0>dist_len$}"));
    }

    let full = format!("{code:0>full_len$}");
    if let Some(state) = state {
        let shortened = code.len() < full_len && !numeric;
        let embedded = if shortened { &code[..2] } else { &full[..2] };
        if shortened || embedded != state {
            return Err(CcidError::AmbiguousStateInput {
                code: code.to_string(),
                embedded: embedded.to_string(),
                state: state.to_string(),
            });
        }
    }
    Ok(full)
}

pub(super) fn state(raw: &str) -> Option<String> {
    if STATE_CODE.is_match(raw) {
        return Some(format!("{raw:0>2}"));
    }
    lookup_state(raw).map(|s| s.fips.to_string())
}

pub(super) fn county(counties: &CountyTable, raw: &str, state: Option<&str>, numeric: bool) -> Result<Option<String>> {
    let ty = RegionType::County;
    if COUNTY_CODE.is_match(raw) {
        return expand_code(ty, raw, 3, state, numeric).map(Some);
    }

    let state = state.ok_or_else(|| missing_state(ty, raw))?;
    Ok(counties.get(state, raw))
}

pub(super) fn congressional(raw: &str, state: Option<&str>, numeric: bool) -> Result<Option<String>> {
    let ty = RegionType::Congressional;
    if CONGR_CODE.is_match(raw) {
        return expand_code(ty, raw, 2, state, numeric).map(Some);
    }

    if is_at_large(raw) {
        let state = state.ok_or_else(|| missing_state(ty, raw))?;
        let district = if NON_VOTING.contains(&state) { "98" } else { "00" };
        return Ok(Some(format!("{state}{district}")));
    }

    match trailing_token(raw, 2) {
        Some(district) if CONGR_DISTRICT.is_match(&district) => {
            let state = state.ok_or_else(|| missing_state(ty, raw))?;
            Ok(Some(format!("{state}{district}")))
        }
        _ => Ok(None),
    }
}

pub(super) fn state_leg(
    irregulars: &IrregularStore,
    ty: RegionType,
    raw: &str,
    state: Option<&str>,
    numeric: bool,
) -> Result<Option<String>> {
    let Some(suffix) = ty.suffix() else {
        return Ok(None);
    };

    // An already-canonical CCID of this chamber is accepted as its own code.
    let code = match raw.strip_suffix(suffix) {
        Some(code) if CANONICAL_STATE_LEG.is_match(raw) => code,
        _ => raw,
    };

    if STATE_LEG_CODE.is_match(code) {
        let full = expand_code(ty, code, 3, state, numeric)?;
        let (state_fips, district) = full.split_at(2);
        if let Some(table) = irregulars.load(state_fips, ty)? {
            if !table.contains_fragment(district) {
                let abbr = lookup_state(state_fips).map_or(state_fips, |s| s.abbr);
                return Err(CcidError::InvalidIrregularCode {
                    code: full.clone(),
                    state: abbr.to_string(),
                    chamber: ty,
                });
            }
        }
        return Ok(Some(format!("{full}{suffix}")));
    }

    let state = state.ok_or_else(|| missing_state(ty, raw))?;
    if let Some(table) = irregulars.load(state, ty)? {
        return Ok(table.resolve(raw).map(|district| format!("{state}{district}{suffix}")));
    }

    Ok(trailing_token(raw, 3)
        .filter(|district| STATE_LEG_DISTRICT.is_match(district))
        .map(|district| format!("{state}{district}{suffix}")))
}
