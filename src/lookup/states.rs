use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CcidError, Result};

/// A state, district or territory with its census identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub fips: &'static str,
    pub abbr: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

const fn state(fips: &'static str, abbr: &'static str, name: &'static str) -> State {
    State { fips, abbr, name, aliases: &[] }
}

pub static STATES: &[State] = &[
    state("01", "AL", "Alabama"),
    state("02", "AK", "Alaska"),
    state("04", "AZ", "Arizona"),
    state("05", "AR", "Arkansas"),
    state("06", "CA", "California"),
    state("08", "CO", "Colorado"),
    state("09", "CT", "Connecticut"),
    state("10", "DE", "Delaware"),
    State { fips: "11", abbr: "DC", name: "District of Columbia", aliases: &["Washington DC"] },
    state("12", "FL", "Florida"),
    state("13", "GA", "Georgia"),
    state("15", "HI", "Hawaii"),
    state("16", "ID", "Idaho"),
    state("17", "IL", "Illinois"),
    state("18", "IN", "Indiana"),
    state("19", "IA", "Iowa"),
    state("20", "KS", "Kansas"),
    state("21", "KY", "Kentucky"),
    state("22", "LA", "Louisiana"),
    state("23", "ME", "Maine"),
    state("24", "MD", "Maryland"),
    state("25", "MA", "Massachusetts"),
    state("26", "MI", "Michigan"),
    state("27", "MN", "Minnesota"),
    state("28", "MS", "Mississippi"),
    state("29", "MO", "Missouri"),
    state("30", "MT", "Montana"),
    state("31", "NE", "Nebraska"),
    state("32", "NV", "Nevada"),
    state("33", "NH", "New Hampshire"),
    state("34", "NJ", "New Jersey"),
    state("35", "NM", "New Mexico"),
    state("36", "NY", "New York"),
    state("37", "NC", "North Carolina"),
    state("38", "ND", "North Dakota"),
    state("39", "OH", "Ohio"),
    state("40", "OK", "Oklahoma"),
    state("41", "OR", "Oregon"),
    state("42", "PA", "Pennsylvania"),
    state("44", "RI", "Rhode Island"),
    state("45", "SC", "South Carolina"),
    state("46", "SD", "South Dakota"),
    state("47", "TN", "Tennessee"),
    state("48", "TX", "Texas"),
    state("49", "UT", "Utah"),
    state("50", "VT", "Vermont"),
    state("51", "VA", "Virginia"),
    state("53", "WA", "Washington"),
    state("54", "WV", "West Virginia"),
    state("55", "WI", "Wisconsin"),
    state("56", "WY", "Wyoming"),
    state("60", "AS", "American Samoa"),
    state("66", "GU", "Guam"),
    state("69", "MP", "Northern Mariana Islands"),
    state("72", "PR", "Puerto Rico"),
    state("74", "UM", "U.S. Minor Outlying Islands"),
    State { fips: "78", abbr: "VI", name: "Virgin Islands", aliases: &["U.S. Virgin Islands", "United States Virgin Islands"] },
];

static FIPS_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}$").unwrap());

/// Lower-cases and drops dots and repeated whitespace ("U.S.  Virgin" -> "us virgin").
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace('.', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds a state by FIPS code, USPS abbreviation, name or alias.
pub fn lookup_state(token: &str) -> Option<&'static State> {
    let token = token.trim();
    if FIPS_CODE.is_match(token) {
        let fips = format!("{token:0>2}");
        return STATES.iter().find(|s| s.fips == fips);
    }

    let needle = normalize(token);
    STATES.iter().find(|s| {
        s.abbr.eq_ignore_ascii_case(&needle)
            || normalize(s.name) == needle
            || s.aliases.iter().any(|alias| normalize(alias) == needle)
    })
}

/// A state qualifier as supplied by upstream data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateInput {
    Fips(u8),
    Text(String),
}

impl StateInput {
    /// Resolves to a 2-digit state FIPS code. One- or two-digit codes are
    /// padded as given; names and abbreviations must be in the state table.
    pub fn resolve(&self) -> Result<String> {
        match self {
            StateInput::Fips(n) if *n < 100 => Ok(format!("{n:02}")),
            StateInput::Fips(n) => Err(CcidError::UnknownState(n.to_string())),
            StateInput::Text(text) if FIPS_CODE.is_match(text.trim()) => Ok(format!("{:0>2}", text.trim())),
            StateInput::Text(text) => lookup_state(text)
                .map(|s| s.fips.to_string())
                .ok_or_else(|| CcidError::UnknownState(text.clone())),
        }
    }
}

impl std::fmt::Display for StateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateInput::Fips(n) => write!(f, "{n}"),
            StateInput::Text(text) => f.write_str(text),
        }
    }
}

impl From<u8> for StateInput {
    fn from(value: u8) -> Self { StateInput::Fips(value) }
}

impl From<&str> for StateInput {
    fn from(value: &str) -> Self { StateInput::Text(value.to_string()) }
}

impl From<String> for StateInput {
    fn from(value: String) -> Self { StateInput::Text(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_every_identifier() {
        assert_eq!(lookup_state("4").unwrap().abbr, "AZ");
        assert_eq!(lookup_state("04").unwrap().abbr, "AZ");
        assert_eq!(lookup_state("az").unwrap().fips, "04");
        assert_eq!(lookup_state("Arizona").unwrap().fips, "04");
        assert_eq!(lookup_state("  new   york ").unwrap().fips, "36");
        assert_eq!(lookup_state("Washington DC").unwrap().fips, "11");
        assert_eq!(lookup_state("U.S. Virgin Islands").unwrap().fips, "78");
        assert!(lookup_state("Atlantis").is_none());
        assert!(lookup_state("03").is_none());
    }

    #[test]
    fn fips_and_abbreviations_are_unique() {
        for (i, a) in STATES.iter().enumerate() {
            for b in &STATES[i + 1..] {
                assert_ne!(a.fips, b.fips);
                assert_ne!(a.abbr, b.abbr);
            }
        }
    }

    #[test]
    fn resolve_pads_numeric_input() {
        assert_eq!(StateInput::Fips(4).resolve().unwrap(), "04");
        assert_eq!(StateInput::from("6").resolve().unwrap(), "06");
        assert_eq!(StateInput::from("wy").resolve().unwrap(), "56");
        assert!(matches!(StateInput::from("Gondor").resolve(), Err(CcidError::UnknownState(_))));
        assert!(StateInput::Fips(120).resolve().is_err());
    }
}
