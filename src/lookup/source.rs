use std::{path::{Path, PathBuf}, sync::Arc};

use ahash::AHashMap;
use anyhow::{anyhow, bail, Context, Result};
use walkdir::WalkDir;

/// Read-only access to irregular district tables by file name,
/// e.g. "MA_SLDU.json".
pub trait TableSource: Send + Sync {
    fn get(&self, name: &str) -> Result<Arc<[u8]>>;
    fn has(&self, name: &str) -> bool;
    /// Every table file name the source holds, sorted.
    fn list(&self) -> Result<Vec<String>>;
}

/// Tables stored as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct DiskTables {
    root: PathBuf,
}

impl DiskTables {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// Errors unless `root` is an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() { bail!("Table directory does not exist: {}", root.display()); }
        if !root.is_dir() { bail!("Path exists but is not a directory: {}", root.display()); }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path { &self.root }

    fn full(&self, name: &str) -> PathBuf { self.root.join(name) }

    /// Writes a table file, creating the directory if needed.
    pub fn put(&self, name: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create directory {}", self.root.display()))?;
        let path = self.full(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl TableSource for DiskTables {
    fn get(&self, name: &str) -> Result<Arc<[u8]>> {
        let path = self.full(name);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Arc::from(bytes))
    }

    fn has(&self, name: &str) -> bool { self.full(name).is_file() }

    /// File names of every `.json` table in the directory.
    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("Failed to list {}", self.root.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

/// Tables held in memory, keyed by file name.
#[derive(Debug, Default, Clone)]
pub struct MemTables {
    pub(crate) files: AHashMap<String, Arc<[u8]>>,
}

impl MemTables {
    pub fn new() -> Self { Self::default() }

    pub fn put(&mut self, name: &str, bytes: &[u8]) {
        self.files.insert(name.to_string(), Arc::from(bytes.to_vec()));
    }

    pub fn with(mut self, name: &str, bytes: &[u8]) -> Self {
        self.put(name, bytes);
        self
    }
}

impl TableSource for MemTables {
    fn get(&self, name: &str) -> Result<Arc<[u8]>> {
        self.files.get(name).cloned()
            .ok_or_else(|| anyhow!("missing table file: {name}"))
    }

    fn has(&self, name: &str) -> bool { self.files.contains_key(name) }

    fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.files.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
