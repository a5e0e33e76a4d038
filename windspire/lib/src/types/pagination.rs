use serde::{Deserialize, Serialize};

/// Page selection for list endpoints. Unset or zero values are left to the
/// backend's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Requests a specific page of `limit` items.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Requests the first page with at most `limit` items.
    pub fn limit(limit: u32) -> Self {
        Self {
            page: None,
            limit: Some(limit),
        }
    }

    /// `(name, value)` pairs to append to the query string, skipping unset
    /// and zero values.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [("page", self.page), ("limit", self.limit)]
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| *v > 0).map(|v| (name, v.to_string())))
            .collect()
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(alias = "total_pages")]
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    /// Transforms every record on the page, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_unset_and_zero() {
        assert!(PaginationParams::default().query_pairs().is_empty());
        assert_eq!(
            PaginationParams { page: Some(0), limit: Some(25) }.query_pairs(),
            vec![("limit", "25".to_string())]
        );
        assert_eq!(
            PaginationParams::new(2, 10).query_pairs(),
            vec![("page", "2".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn test_map_preserves_metadata() {
        let page = PaginatedResult {
            data: vec![1, 2, 3],
            total: 23,
            page: 2,
            limit: 3,
            total_pages: 8,
        };

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20, 30]);
        assert_eq!((mapped.total, mapped.page, mapped.limit, mapped.total_pages), (23, 2, 3, 8));
    }
}
