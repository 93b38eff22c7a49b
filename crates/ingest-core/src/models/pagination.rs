use serde::Deserialize;
use utoipa::IntoParams;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Paging parameters for metadata listings (1-indexed pages).
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page number, starting at 1. Values <= 0 are treated as 1.
    pub page: Option<i64>,
    /// Items per page. Values <= 0 are treated as 50; capped at 1000.
    pub page_size: Option<i64>,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Normalized `(page, page_size)`.
    pub fn normalized(&self) -> (i64, i64) {
        normalize_page(self.page.unwrap_or(1), self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }
}

/// Apply the listing defaults: page <= 0 becomes 1, page_size <= 0 becomes
/// the default, and oversized pages are clamped.
pub fn normalize_page(page: i64, page_size: i64) -> (i64, i64) {
    let page = if page <= 0 { 1 } else { page };
    let page_size = if page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size.min(MAX_PAGE_SIZE)
    };
    (page, page_size)
}

/// Row offset for a normalized page.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    let (page, page_size) = normalize_page(page, page_size);
    (page - 1).saturating_mul(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_use_defaults() {
        assert_eq!(normalize_page(0, 0), (1, 50));
        assert_eq!(normalize_page(-3, -1), (1, 50));
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(normalize_page(2, 5000), (2, MAX_PAGE_SIZE));
    }

    #[test]
    fn test_offset() {
        assert_eq!(page_offset(1, 50), 0);
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(0, 0), page_offset(1, 50));
    }

    #[test]
    fn test_page_request_missing_fields() {
        let req = PageRequest::default();
        assert_eq!(req.normalized(), (1, 50));
        assert_eq!(PageRequest::new(4, 25).normalized(), (4, 25));
    }
}
