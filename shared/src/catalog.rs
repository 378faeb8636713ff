use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use crate::models::{ComicEntry, ComicId};

/// Latest comic id reported when nothing in the catalog is published.
pub const DEFAULT_LATEST_COMIC: ComicId = 24;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("Failed to parse catalog {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("Duplicate comic id in catalog: {0}")]
    DuplicateId(ComicId),
    #[error("Comic id must be at least 1")]
    ZeroId,
}

/// Read-only list of published comics in publication order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ComicEntry>,
    index: HashMap<ComicId, usize>,
}

impl Catalog {
    /// Keeps published entries only, in the order given.
    pub fn from_entries(entries: impl IntoIterator<Item = ComicEntry>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        let mut seen = HashSet::new();

        for entry in entries {
            if entry.id == 0 { return Err(CatalogError::ZeroId); }
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            if !entry.published { continue; }

            catalog.index.insert(entry.id, catalog.entries.len());
            catalog.entries.push(entry);
        }

        Ok(catalog)
    }

    /// Comics `1..=latest`, all published, named `comic-NNN.png`.
    pub fn sequential(latest: ComicId) -> Self {
        let entries = (1..=latest).map(ComicEntry::numbered).collect::<Vec<_>>();
        let index = entries.iter().enumerate().map(|(i, e)| (e.id, i)).collect();
        Self { entries, index }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Read { path: display.clone(), source })?;
        let entries: Vec<ComicEntry> = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::Parse { path: display, source })?;
        Self::from_entries(entries)
    }

    pub fn lookup(&self, id: ComicId) -> Option<&ComicEntry> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    pub fn latest_id(&self) -> ComicId {
        self.entries.last().map(|e| e.id).unwrap_or(DEFAULT_LATEST_COMIC)
    }

    pub fn all_ids_newest_first(&self) -> Vec<ComicId> {
        self.entries.iter().rev().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
