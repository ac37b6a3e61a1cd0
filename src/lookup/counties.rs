use std::{fs::File, io::Cursor, path::Path};

use ahash::AHashMap;
use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

/// Trailing words that may be omitted from a county name.
const COUNTY_SUFFIXES: [&str; 7] = [
    " city and borough", " census area", " county", " parish", " borough", " municipality", " municipio",
];

/// Lower-cases, drops dots and apostrophes, and spells "saint" as "st".
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace(['.', '\''], "")
        .split_whitespace()
        .map(|word| if word == "saint" { "st" } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_suffix(name: &str) -> Option<&str> {
    COUNTY_SUFFIXES.iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .filter(|rest| !rest.is_empty())
}

/// County name -> 3-digit county FIPS, scoped by state FIPS.
#[derive(Debug, Clone, Default)]
pub struct CountyTable {
    states: AHashMap<String, AHashMap<String, String>>,
}

impl CountyTable {
    pub fn new() -> Self { Self::default() }

    /// Builds a table from `(state_fips, county_fips, name)` records.
    pub fn from_records<S: AsRef<str>>(records: impl IntoIterator<Item = (S, S, S)>) -> Self {
        let mut table = Self::new();
        for (state, county, name) in records {
            table.insert(state.as_ref(), county.as_ref(), name.as_ref());
        }
        table
    }

    pub fn insert(&mut self, state_fips: &str, county_fips: &str, name: &str) {
        let counties = self.states.entry(format!("{:0>2}", state_fips.trim())).or_default();
        let county = format!("{:0>3}", county_fips.trim());
        let name = normalize(name);
        if let Some(short) = strip_suffix(&name) {
            // "fairfax city" and "fairfax county" both exist; the county keeps the short name
            counties.entry(short.to_string()).or_insert_with(|| county.clone());
        }
        counties.insert(name, county);
    }

    /// Returns the full 5-digit county FIPS for `name` in the given state.
    pub fn get(&self, state_fips: &str, name: &str) -> Option<String> {
        let counties = self.states.get(state_fips)?;
        let name = normalize(name);
        counties.get(&name)
            .or_else(|| strip_suffix(&name).and_then(|short| counties.get(short)))
            .map(|county| format!("{state_fips}{county}"))
    }

    pub fn len(&self) -> usize {
        self.states.values().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.states.is_empty() }

    /// Reads a CSV with `statefp,countyfp,name` columns.
    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[lookup::counties] Failed to open county CSV: {}", path.display()))?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(file)
            .finish()
            .with_context(|| format!("[lookup::counties] Failed to read county CSV from {:?}", path))?;
        Self::from_dataframe(&df)
    }

    /// Reads county CSV bytes (same layout as `read_csv`).
    pub fn read_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .context("[lookup::counties] Failed to read county CSV from bytes")?;
        Self::from_dataframe(&df)
    }

    fn from_dataframe(df: &DataFrame) -> Result<Self> {
        for column in ["statefp", "countyfp", "name"] {
            ensure!(df.column(column).is_ok(), "[lookup::counties] CSV is missing column '{column}'");
        }

        let states = df.column("statefp")?.str()?;
        let counties = df.column("countyfp")?.str()?;
        let names = df.column("name")?.str()?;

        let mut table = Self::new();
        for ((state, county), name) in states.into_iter().zip(counties).zip(names) {
            if let (Some(state), Some(county), Some(name)) = (state, county, name) {
                table.insert(state, county, name);
            }
        }
        tracing::debug!("[lookup::counties] read {} county names", table.len());
        Ok(table)
    }
}
