//! View preferences cached between sessions.
//!
//! Sort column, page size, page and selected filters are stored as one JSON
//! blob. Loading never fails: a missing or unreadable file yields defaults,
//! and [`ViewPreferences::validate`] pulls stale values back into range.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::hierarchy::CardFilter;
use crate::listing::{total_pages, ListQuery, Listable, SortDirection};

/// Page sizes offered by the tables.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Persisted table and filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewPreferences {
    pub sort_column: String,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub team_filter: CardFilter,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            sort_column: String::new(),
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: PAGE_SIZES[0],
            search: String::new(),
            filters: BTreeMap::new(),
            team_filter: CardFilter::All,
        }
    }
}

impl ViewPreferences {
    /// Load from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No view preferences at {:?}: {}", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Ignoring unreadable view preferences {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(path, body)?;
        debug!("Saved view preferences to {:?}", path);
        Ok(())
    }

    /// Bring preferences in line with the table they are applied to:
    /// unknown column → default column, unsupported page size → smallest,
    /// page clamped to the available pages.
    pub fn validate<T: Listable>(mut self, total_items: usize) -> Self {
        if !T::COLUMNS.contains(&self.sort_column.as_str()) {
            if !self.sort_column.is_empty() {
                debug!("Dropping unknown sort column '{}'", self.sort_column);
            }
            self.sort_column = T::DEFAULT_COLUMN.to_string();
        }
        if !PAGE_SIZES.contains(&self.page_size) {
            self.page_size = PAGE_SIZES[0];
        }
        self.page = self.page.clamp(1, total_pages(total_items, self.page_size));
        self
    }

    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            sort_column: self.sort_column.clone(),
            sort_direction: self.sort_direction,
            page: self.page,
            page_size: self.page_size,
            filters: self.filters.clone(),
        }
    }
}
