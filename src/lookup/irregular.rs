use std::{collections::BTreeMap, sync::{Arc, LazyLock}};

use ahash::{AHashMap, AHashSet};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CcidError, Result};
use crate::region::RegionType;
use super::{lookup_state, name_variants, TableSource};

/// Census NAME tails such as " (2018), Alaska" or " (116th Congress); Vermont".
static CENSUS_NAME_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4}|\d{2,3}th Congress)\)[,;]").unwrap());

/// Normalized district name -> district-code fragment for one state chamber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IrregularTable {
    names: BTreeMap<String, String>,
}

impl IrregularTable {
    pub fn new(names: BTreeMap<String, String>) -> Self { Self { names } }

    /// Builds a table from census API rows of `(NAME, GEO_ID)`. Every spelling
    /// produced by `name_variants` becomes a key; values are the GEOID minus
    /// its state prefix.
    pub fn from_census_rows<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut names = BTreeMap::new();
        for (raw_name, geo_id) in rows {
            let geoid = geo_id.rsplit("US").next().unwrap_or(geo_id);
            let Some(fragment) = geoid.get(2..).filter(|f| !f.is_empty()) else { continue };
            let name = CENSUS_NAME_TAIL.split(raw_name).next().unwrap_or(raw_name).trim();
            for variant in name_variants(name) {
                names.insert(variant, fragment.to_string());
            }
        }
        Self { names }
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Looks a raw name up under each of its normalized spellings in turn.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        name_variants(raw).iter().find_map(|variant| self.get(variant))
    }

    pub fn contains_fragment(&self, fragment: &str) -> bool {
        self.names.values().any(|v| v == fragment)
    }

    pub fn len(&self) -> usize { self.names.len() }

    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

/// File name of the persisted table for a state chamber, e.g. "MA_SLDU.json".
pub fn table_name(state_abbr: &str, chamber: RegionType) -> String {
    format!("{}_{}.json", state_abbr.to_uppercase(), chamber.to_str().to_uppercase())
}

/// Irregular district tables for the state chambers whose district names do
/// not reduce to zero-padded numbers. Immutable once built.
pub struct IrregularStore {
    source: Arc<dyn TableSource>,
    flagged: AHashSet<(String, RegionType)>, // (state FIPS, chamber)
    loaded: AHashMap<(String, RegionType), Arc<IrregularTable>>,
}

impl IrregularStore {
    /// `flags` pairs a state (FIPS, abbreviation or name) with a chamber.
    pub fn new<S: AsRef<str>>(source: Arc<dyn TableSource>, flags: impl IntoIterator<Item = (S, RegionType)>) -> Result<Self> {
        let mut flagged = AHashSet::new();
        for (state, chamber) in flags {
            let state = lookup_state(state.as_ref())
                .ok_or_else(|| CcidError::UnknownState(state.as_ref().to_string()))?;
            if !chamber.is_state_leg() {
                return Err(CcidError::UnknownVariant(format!("{chamber} is not a legislative chamber")));
            }
            flagged.insert((state.fips.to_string(), chamber));
        }
        Ok(Self { source, flagged, loaded: AHashMap::new() })
    }

    /// A store with no irregular chambers.
    pub fn empty() -> Self {
        Self {
            source: Arc::new(super::MemTables::new()),
            flagged: AHashSet::new(),
            loaded: AHashMap::new(),
        }
    }

    pub fn is_irregular(&self, state_fips: &str, chamber: RegionType) -> bool {
        self.flagged.contains(&(state_fips.to_string(), chamber))
    }

    /// Flagged (state FIPS, chamber) pairs, sorted.
    pub fn flagged(&self) -> Vec<(String, RegionType)> {
        let mut pairs: Vec<_> = self.flagged.iter().cloned().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Returns the table for a flagged chamber, `None` for a regular one.
    pub fn load(&self, state_fips: &str, chamber: RegionType) -> Result<Option<Arc<IrregularTable>>> {
        let key = (state_fips.to_string(), chamber);
        if !self.flagged.contains(&key) {
            return Ok(None);
        }
        if let Some(table) = self.loaded.get(&key) {
            return Ok(Some(table.clone()));
        }
        self.read(state_fips, chamber).map(|table| Some(Arc::new(table)))
    }

    /// Reads every flagged table up front so later lookups do no I/O.
    /// Table files that no flag covers are logged and left unread.
    pub fn preload(mut self) -> Result<Self> {
        for (state_fips, chamber) in self.flagged() {
            let table = self.read(&state_fips, chamber)?;
            self.loaded.insert((state_fips, chamber), Arc::new(table));
        }
        for name in self.unflagged_tables()? {
            tracing::warn!("[lookup::irregular] {name} is not flagged irregular and will be ignored");
        }
        Ok(self)
    }

    /// Table files present in the source that no flagged chamber reads.
    pub fn unflagged_tables(&self) -> Result<Vec<String>> {
        let expected: AHashSet<String> = self.flagged.iter()
            .filter_map(|(fips, chamber)| lookup_state(fips).map(|s| table_name(s.abbr, *chamber)))
            .collect();
        let names = self.source.list()
            .map_err(|source| CcidError::TableSource { key: "table listing".to_string(), source })?;
        Ok(names.into_iter().filter(|name| !expected.contains(name)).collect())
    }

    fn read(&self, state_fips: &str, chamber: RegionType) -> Result<IrregularTable> {
        let state = lookup_state(state_fips)
            .ok_or_else(|| CcidError::UnknownState(state_fips.to_string()))?;
        let name = table_name(state.abbr, chamber);
        if !self.source.has(&name) {
            return Err(CcidError::MissingIrregularTable { state: state.abbr.to_string(), chamber });
        }

        let bytes = self.source.get(&name)
            .map_err(|source| CcidError::TableSource { key: name.clone(), source })?;
        let table = IrregularTable::from_json(&bytes)
            .map_err(|e| CcidError::InvalidIrregularTable { key: name.clone(), reason: e.to_string() })?;
        tracing::debug!("[lookup::irregular] loaded {name} ({} names)", table.len());
        Ok(table)
    }
}

impl std::fmt::Debug for IrregularStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrregularStore")
            .field("flagged", &self.flagged())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MemTables;

    fn ma_senate() -> IrregularTable {
        IrregularTable::from_census_rows([
            ("Berkshire, Hampshire, Franklin and Hampden District (2018), Massachusetts", "610U900US25001"),
            ("Second Essex District (2018), Massachusetts", "610U900US25002"),
        ])
    }

    #[test]
    fn census_rows_expand_to_name_variants() {
        let table = ma_senate();
        assert_eq!(table.get("second essex district"), Some("002"));
        assert_eq!(table.get("2nd essex"), Some("002"));
        assert_eq!(table.get("berkshire, hampshire, franklin and hampden"), Some("001"));
        assert!(table.contains_fragment("001"));
        assert!(!table.contains_fragment("25001"));
    }

    #[test]
    fn resolve_normalizes_input() {
        let table = ma_senate();
        assert_eq!(table.resolve("  2nd Essex District "), Some("002"));
        assert_eq!(table.resolve("Second Essex"), Some("002"));
        assert_eq!(table.resolve("Third Essex"), None);
    }

    #[test]
    fn json_round_trip() {
        let table = ma_senate();
        let json = table.to_json().unwrap();
        assert_eq!(IrregularTable::from_json(json.as_bytes()).unwrap(), table);
    }

    #[test]
    fn load_distinguishes_regular_missing_and_present() {
        let tables = MemTables::new()
            .with("MA_SLDU.json", ma_senate().to_json().unwrap().as_bytes());
        let store = IrregularStore::new(Arc::new(tables), [
            ("MA", RegionType::StateLegUpper),
            ("MA", RegionType::StateLegLower),
        ]).unwrap();

        assert!(store.load("04", RegionType::StateLegUpper).unwrap().is_none());
        assert_eq!(store.load("25", RegionType::StateLegUpper).unwrap().unwrap().len(), ma_senate().len());
        assert!(matches!(
            store.load("25", RegionType::StateLegLower),
            Err(CcidError::MissingIrregularTable { .. })
        ));
        assert!(store.preload().is_err());
    }

    #[test]
    fn tables_without_flags_are_listed() {
        let tables = MemTables::new()
            .with("MA_SLDU.json", ma_senate().to_json().unwrap().as_bytes())
            .with("NH_SLDL.json", b"{}");
        let store = IrregularStore::new(Arc::new(tables), [("MA", RegionType::StateLegUpper)]).unwrap();
        assert_eq!(store.unflagged_tables().unwrap(), vec!["NH_SLDL.json".to_string()]);

        let store = store.preload().unwrap();
        assert!(store.load("25", RegionType::StateLegUpper).unwrap().is_some());
        assert!(store.load("33", RegionType::StateLegLower).unwrap().is_none());
    }

    #[test]
    fn malformed_table_is_reported() {
        let tables = MemTables::new().with("AK_SLDU.json", b"[1, 2]");
        let store = IrregularStore::new(Arc::new(tables), [("02", RegionType::StateLegUpper)]).unwrap();
        assert!(matches!(
            store.load("02", RegionType::StateLegUpper),
            Err(CcidError::InvalidIrregularTable { .. })
        ));
    }

    #[test]
    fn flags_must_name_chambers() {
        assert!(IrregularStore::new(Arc::new(MemTables::new()), [("VT", RegionType::County)]).is_err());
        assert!(IrregularStore::new(Arc::new(MemTables::new()), [("Narnia", RegionType::StateLegUpper)]).is_err());
    }
}
