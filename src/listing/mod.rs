//! Client-side search, sort and pagination of in-memory lists.
//!
//! The employee and store tables fetch everything once and slice locally.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{normalize_role, Employee, Store};

/// Sort direction of a table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Comparable cell value. Missing values always sort last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(i64),
    Text(String),
    Missing,
}

impl SortValue {
    pub fn text(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(s) if !s.is_empty() => SortValue::Text(s.to_lowercase()),
            _ => SortValue::Missing,
        }
    }
}

/// A record that can be shown in a searchable, sortable table.
pub trait Listable {
    /// Sortable column names.
    const COLUMNS: &'static [&'static str];
    const DEFAULT_COLUMN: &'static str;

    fn sort_value(&self, column: &str) -> SortValue;

    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether the record passes the named filter. Unknown filters pass.
    fn matches_filter(&self, _key: &str, _value: &str) -> bool {
        true
    }
}

/// What the table is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub sort_column: String,
    pub sort_direction: SortDirection,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_column: String::new(),
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: 10,
            filters: BTreeMap::new(),
        }
    }
}

/// One page of results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Number of pages for `total_items`; never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Search, filter, sort and slice `items`. The page is clamped into range.
pub fn apply<'a, T: Listable>(items: &'a [T], query: &ListQuery) -> Page<'a, T> {
    let needle = query.search.trim().to_lowercase();

    let matched: Vec<&T> = items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .filter(|item| {
            query
                .filters
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .all(|(key, value)| item.matches_filter(key, value))
        })
        .collect();

    let column = if T::COLUMNS.contains(&query.sort_column.as_str()) {
        query.sort_column.as_str()
    } else {
        T::DEFAULT_COLUMN
    };
    let mut keyed: Vec<(SortValue, &T)> = matched
        .into_iter()
        .map(|item| (item.sort_value(column), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_values(a, b, query.sort_direction));
    let matched: Vec<&T> = keyed.into_iter().map(|(_, item)| item).collect();

    let page_size = query.page_size.max(1);
    let total_items = matched.len();
    let total_pages = total_pages(total_items, page_size);
    let page = query.page.clamp(1, total_pages);

    let items = matched
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// Order two cell values in `direction`. Missing values sort last either way
/// and equal values compare equal, so the sort stays stable.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        _ => match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        },
    }
}

/// Compare two optional strings case-insensitively, `None` last.
pub fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    SortValue::text(a).cmp(&SortValue::text(b))
}

impl Listable for Employee {
    const COLUMNS: &'static [&'static str] = &["name", "role", "city", "id"];
    const DEFAULT_COLUMN: &'static str = "name";

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "role" => SortValue::text(self.role.as_deref()),
            "city" => SortValue::text(self.city.as_deref()),
            "id" => SortValue::Number(self.id),
            _ => SortValue::text(Some(&self.display_name())),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.first_name.as_str(), self.last_name.as_str()];
        fields.extend(self.role.as_deref());
        fields.extend(self.city.as_deref());
        fields.extend(self.email.as_deref());
        fields.extend(self.phone.as_deref());
        fields
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        match key {
            "role" => match normalize_role(value) {
                Some(wanted) => self.category_role() == Some(wanted),
                None => self
                    .role
                    .as_deref()
                    .is_some_and(|role| role.eq_ignore_ascii_case(value.trim())),
            },
            "city" => {
                let value = value.trim();
                self.city
                    .as_deref()
                    .is_some_and(|city| city.eq_ignore_ascii_case(value))
                    || self
                        .assigned_cities
                        .iter()
                        .any(|city| city.eq_ignore_ascii_case(value))
            }
            "archived" => value.trim().parse::<bool>().map_or(true, |a| self.archived == a),
            _ => true,
        }
    }
}

impl Listable for Store {
    const COLUMNS: &'static [&'static str] =
        &["storeName", "ownerName", "city", "clientType", "createdAt"];
    const DEFAULT_COLUMN: &'static str = "storeName";

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "ownerName" => SortValue::text(self.owner_name.as_deref()),
            "city" => SortValue::text(self.city.as_deref()),
            "clientType" => SortValue::text(self.client_type.as_deref()),
            "createdAt" => self
                .created_at
                .map(|ts| SortValue::Number(ts.timestamp_millis()))
                .unwrap_or(SortValue::Missing),
            _ => SortValue::text(Some(&self.store_name)),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.store_name.as_str()];
        fields.extend(self.owner_name.as_deref());
        fields.extend(self.city.as_deref());
        fields.extend(self.phone.as_deref());
        fields
    }

    fn matches_filter(&self, key: &str, value: &str) -> bool {
        let field = match key {
            "city" => self.city.as_deref(),
            "clientType" => self.client_type.as_deref(),
            _ => return true,
        };
        field.is_some_and(|f| f.eq_ignore_ascii_case(value.trim()))
    }
}
