//! Page category constants.
//!
//! Every routed page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"ref_departments--list"`)
//!   - `data-page-category` with one of the constants below

/// Rows of one table with search and CRUD actions.
pub const PAGE_CAT_LIST: &str = "list";

/// Count cards and navigation tiles.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Sign-in and other system pages.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids() {
        assert!(is_valid_page_id("ref_departments--list"));
        assert!(!is_valid_page_id("ref_departments"));
        assert!(!is_valid_page_id("--list"));
    }
}
