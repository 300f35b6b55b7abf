//! Pagination utilities for list endpoints

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaginationParams {
    /// Page number (1-indexed)
    pub page: Option<u32>,

    /// Items per page
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Maximum allowed items per page
    pub const MAX_PER_PAGE: u32 = 100;

    /// Returns the clamped per_page value
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(20).clamp(1, Self::MAX_PER_PAGE)
    }

    /// Returns the page (1-indexed, minimum 1)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> usize {
        (self.page() as usize - 1) * self.per_page() as usize
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total_items: u64) -> Self {
        let per_page = params.per_page();
        let page = params.page();
        let total_pages = total_items.div_ceil(u64::from(per_page)) as u32;

        Self {
            page,
            per_page,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize + Clone> Paginated<T> {
    /// One page of an in-memory collection, in collection order.
    pub fn from_slice(items: &[T], params: &PaginationParams) -> Self {
        let data = items
            .iter()
            .skip(params.offset())
            .take(params.per_page() as usize)
            .cloned()
            .collect();

        Self {
            data,
            pagination: PaginationMeta::new(params, items.len() as u64),
        }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(3), Some(500), 3, 100)]
    fn test_params_are_clamped(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_per_page: u32,
    ) {
        let params = PaginationParams { page, per_page };

        assert_eq!(params.page(), expected_page);
        assert_eq!(params.per_page(), expected_per_page);
    }

    #[test]
    fn test_from_slice_returns_requested_page() {
        let items: Vec<u32> = (1..=5).collect();
        let params = PaginationParams {
            page: Some(2),
            per_page: Some(2),
        };

        let page = Paginated::from_slice(&items, &params);

        assert_eq!(page.data, vec![3, 4]);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let params = PaginationParams {
            page: Some(9),
            per_page: None,
        };

        let page = Paginated::from_slice(&[1, 2, 3], &params);

        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_items, 3);
        assert!(!page.pagination.has_next);
    }
}
