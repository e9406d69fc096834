//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a003_raw_material--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the tab key searchable from the DOM inspector.

/// Table of records with create form and filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Stats cards / analytical view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Action page (sync, analysis, report download).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// Administration page.
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_USECASE,
    PAGE_CAT_SYSTEM,
];

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(page_id: &str) -> bool {
    match page_id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a003_raw_material--list"));
        assert!(is_valid_page_id("d400_dashboard_stats--dashboard"));
        assert!(!is_valid_page_id("a003_raw_material"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a003_raw_material--detail"));
    }
}
