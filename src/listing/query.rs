//! List state carried in the URL query string

use std::collections::BTreeMap;
use std::fmt;

use crate::api::{encode_query, parse_query};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "createdAt";

/// Keys that are not entity filters
const RESERVED_KEYS: [&str; 5] = ["page", "size", "sortBy", "sortDir", "search"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    /// Case-insensitive; anything else is `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination, sorting, search and filters of a list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDir,
    pub search: Option<String>,
    /// Entity-specific filters (`status`, `category`, ...)
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::with_default_size(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    /// Defaults with a configured page size
    pub fn with_default_size(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_dir: SortDir::Desc,
            search: None,
            filters: BTreeMap::new(),
        }
    }

    /// Parse a query string; missing or invalid values fall back to defaults
    pub fn from_query_string(query: &str) -> Self {
        Self::from_query_string_or(query, DEFAULT_PAGE_SIZE)
    }

    /// Parse a query string with a configured default page size
    pub fn from_query_string_or(query: &str, default_size: u32) -> Self {
        let mut list = Self::with_default_size(default_size);

        for (key, value) in parse_query(query) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "page" => {
                    if let Ok(page) = value.parse() {
                        list.page = page;
                    }
                }
                "size" => {
                    if let Ok(size) = value.parse::<u32>() {
                        if size > 0 {
                            list.size = size;
                        }
                    }
                }
                "sortBy" => list.sort_by = value.to_string(),
                "sortDir" => {
                    if let Some(dir) = SortDir::parse(value) {
                        list.sort_dir = dir;
                    }
                }
                "search" => list.search = Some(value.to_string()),
                _ => {
                    list.filters.insert(key, value.to_string());
                }
            }
        }

        list
    }

    /// Request parameters in a stable order
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("sortBy".to_string(), self.sort_by.clone()),
            ("sortDir".to_string(), self.sort_dir.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        params.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        params
    }

    /// Query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        encode_query(&self.to_params())
    }

    // ============================================
    // Builders
    // ============================================

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_dir: SortDir) -> Self {
        self.sort_by = sort_by.into();
        self.sort_dir = sort_dir;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(&search.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(&key.into(), &value.into());
        self
    }

    // ============================================
    // Mutators (everything but `set_page` resets to the first page)
    // ============================================

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
        self.page = 0;
    }

    /// Sort by a column; sorting by the current column again flips direction
    pub fn set_sort(&mut self, sort_by: &str, sort_dir: Option<SortDir>) {
        let dir = match sort_dir {
            Some(dir) => dir,
            None if self.sort_by == sort_by => self.sort_dir.toggled(),
            None => SortDir::Asc,
        };
        self.sort_by = sort_by.to_string();
        self.sort_dir = dir;
        self.page = 0;
    }

    /// Blank search clears it
    pub fn set_search(&mut self, search: &str) {
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 0;
    }

    /// Blank value removes the filter
    pub fn set_filter(&mut self, key: &str, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.filters.remove(key);
        } else if !RESERVED_KEYS.contains(&key) {
            self.filters.insert(key.to_string(), trimmed.to_string());
        }
        self.page = 0;
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Drop filters the entity does not understand
    pub fn retain_filters(&mut self, allowed: &[&str]) {
        self.filters.retain(|key, _| allowed.contains(&key.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = ListQuery::from_query_string("");
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 10);
        assert_eq!(query.sort_by, "createdAt");
        assert_eq!(query.sort_dir, SortDir::Desc);
        assert!(query.search.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_parse_full_query() {
        let query = ListQuery::from_query_string(
            "?page=2&size=25&sortBy=title&sortDir=ASC&search=rust%20conf&status=INACTIVE&category=",
        );

        assert_eq!(query.page, 2);
        assert_eq!(query.size, 25);
        assert_eq!(query.sort_by, "title");
        assert_eq!(query.sort_dir, SortDir::Asc);
        assert_eq!(query.search.as_deref(), Some("rust conf"));
        assert_eq!(query.filter("status"), Some("INACTIVE"));
        assert_eq!(query.filter("category"), None);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let query = ListQuery::from_query_string("page=-1&size=0&sortDir=sideways");
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 10);
        assert_eq!(query.sort_dir, SortDir::Desc);
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = ListQuery::default()
            .with_page(3)
            .with_size(25)
            .with_sort("orderIndex", SortDir::Asc)
            .with_search("a&b = c")
            .with_filter("status", "ACTIVE");

        let reparsed = ListQuery::from_query_string(&query.to_query_string());
        assert_eq!(reparsed, query);
    }

    #[test]
    fn test_changes_reset_page() {
        let mut query = ListQuery::default().with_page(4);
        query.set_size(25);
        assert_eq!(query.page, 0);

        query.set_page(4);
        query.set_filter("status", "BLOCKED");
        assert_eq!(query.page, 0);

        query.set_page(4);
        query.set_search("  ");
        assert_eq!(query.page, 0);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_sort_toggles_on_same_column() {
        let mut query = ListQuery::default();
        query.set_sort("createdAt", None);
        assert_eq!(query.sort_dir, SortDir::Asc);

        query.set_sort("title", None);
        assert_eq!(query.sort_dir, SortDir::Asc);
        query.set_sort("title", None);
        assert_eq!(query.sort_dir, SortDir::Desc);
    }

    #[test]
    fn test_reserved_keys_are_not_filters() {
        let mut query = ListQuery::default();
        query.set_filter("page", "9");
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_retain_filters() {
        let mut query = ListQuery::from_query_string("status=ACTIVE&platform=github&bogus=1");
        query.retain_filters(&["status", "platform"]);
        assert_eq!(query.filters.len(), 2);
        assert!(query.filter("bogus").is_none());
    }
}
