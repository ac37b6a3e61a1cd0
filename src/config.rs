use std::{collections::BTreeMap, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::region::RegionType;

/// Where the codec finds its lookup tables, and which state chambers need
/// irregular district tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `{ABBR}_SLD{U|L}.json` tables.
    pub irregular_dir: PathBuf,
    /// State abbreviation -> chamber descriptions (anything `fuzzy_cast` accepts).
    #[serde(default = "default_irregular")]
    pub irregular: BTreeMap<String, Vec<String>>,
    /// Optional `statefp,countyfp,name` CSV for county-name lookups.
    #[serde(default)]
    pub county_csv: Option<PathBuf>,
}

fn default_irregular() -> BTreeMap<String, Vec<String>> {
    let upper = RegionType::StateLegUpper.census().to_string();
    let lower = RegionType::StateLegLower.census().to_string();
    BTreeMap::from([
        ("AK".to_string(), vec![upper.clone()]),
        ("MA".to_string(), vec![upper.clone(), lower.clone()]),
        ("VT".to_string(), vec![upper, lower]),
    ])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            irregular_dir: PathBuf::from("lookups").join("irregulars"),
            irregular: default_irregular(),
            county_csv: None,
        }
    }
}

impl Config {
    /// Reads a JSON config file. Relative paths inside it resolve against
    /// the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Config = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.irregular_dir = base.join(&config.irregular_dir);
            config.county_csv = config.county_csv.map(|csv| base.join(csv));
        }
        Ok(config)
    }

    /// Flagged (state, chamber) pairs with every description cast to a type.
    pub fn irregular_flags(&self) -> crate::Result<Vec<(String, RegionType)>> {
        let mut flags = Vec::new();
        for (state, chambers) in &self.irregular {
            for chamber in chambers {
                flags.push((state.clone(), RegionType::fuzzy_cast(chamber)?));
            }
        }
        Ok(flags)
    }
}
