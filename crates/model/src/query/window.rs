use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The current pagination + sort request shape. Mutated only by user
/// interaction; each mutation triggers exactly one new row load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryWindow {
    /// 0-based page index.
    pub page_index: usize,
    pub page_size: usize,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl Default for QueryWindow {
    fn default() -> Self {
        QueryWindow {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: None,
            sort_direction: None,
        }
    }
}

impl QueryWindow {
    pub fn page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_first_unsorted_page() {
        let window = QueryWindow::default();
        assert_eq!(window.page_index, 0);
        assert_eq!(window.page_size, DEFAULT_PAGE_SIZE);
        assert!(window.sort_field.is_none());
        assert!(window.sort_direction.is_none());
    }

    #[test]
    fn chained_setup_keeps_other_fields() {
        let window = QueryWindow::default()
            .page(3)
            .sorted_by("total", SortDirection::Desc);
        assert_eq!(window.page_index, 3);
        assert_eq!(window.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(window.sort_field.as_deref(), Some("total"));
        assert_eq!(window.sort_direction, Some(SortDirection::Desc));
    }
}
