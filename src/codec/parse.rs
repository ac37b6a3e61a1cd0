use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CcidError, CcidRule, Result};
use crate::region::RegionType;

static BODY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2,3}|\d{2}[ABC]|ZZZ)$").unwrap());

/// Checks the CCID shape rules in order, stopping at the first violation.
pub(crate) fn validate(ccid: &str) -> Result<()> {
    let bytes = ccid.as_bytes();
    if !matches!(bytes.len(), 2 | 4 | 5 | 6) {
        return Err(CcidError::malformed(ccid, CcidRule::Length));
    }

    let state = &bytes[..2];
    let in_range = state.iter().all(u8::is_ascii_digit)
        && (1..=95).contains(&((state[0] - b'0') * 10 + (state[1] - b'0')));
    if !in_range {
        return Err(CcidError::malformed(ccid, CcidRule::StateRange));
    }

    // Bytes past the prefix are ASCII-checked first so slicing stays on char boundaries.
    let tail = &bytes[2..];
    if !tail.is_ascii() {
        return Err(CcidError::malformed(ccid, CcidRule::Body));
    }
    let body = &ccid[2..ccid.len().min(5)];
    let placeholder_district = bytes.len() == 4 && body == "ZZ";
    if !body.is_empty() && !placeholder_district && !BODY.is_match(body) {
        return Err(CcidError::malformed(ccid, CcidRule::Body));
    }

    if let Some(&suffix) = bytes.get(5) {
        if suffix != b'U' && suffix != b'L' {
            return Err(CcidError::malformed(ccid, CcidRule::Suffix));
        }
    }
    Ok(())
}

/// Splits a CCID into its region type, state FIPS and district fragment.
///
/// ```
/// use ccid::{break_ccid, RegionType};
///
/// let (ty, state, district) = break_ccid("25002U").unwrap();
/// assert_eq!(ty, RegionType::StateLegUpper);
/// assert_eq!(state, "25");
/// assert_eq!(district.as_deref(), Some("002"));
/// ```
pub fn break_ccid(ccid: &str) -> Result<(RegionType, String, Option<String>)> {
    validate(ccid)?;

    let state = ccid[..2].to_string();
    let parts = match (ccid.len(), ccid.chars().last().and_then(RegionType::from_suffix)) {
        (2, _) => (RegionType::State, state, None),
        (6, Some(chamber)) => (chamber, state, Some(ccid[2..5].to_string())),
        (4, _) => (RegionType::Congressional, state, Some(ccid[2..].to_string())),
        _ => (RegionType::County, state, Some(ccid[2..].to_string())),
    };
    Ok(parts)
}
