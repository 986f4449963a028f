use serde::{Deserialize, Serialize};

/// Zero-based page coordinates for offset pagination.
///
/// `page` selects which window of results to fetch and `size` caps how
/// many documents that window holds. The document offset is always
/// `page * size`; requests past the end of a result set are valid and
/// simply come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u64,
    /// Maximum number of results in the page.
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Number of documents skipped before this page begins.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

/// Half-open window `[from, to)` of document offsets covered by a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub from: u64,
    pub to: u64,
}

/// One page of query results together with the size of the full match.
///
/// `total` counts every document matching the query, `count` the
/// documents actually returned, and `range` the offsets they occupy.
/// `count == results.len()` always holds, as does
/// `range.to - range.from == count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedQueryResult<T> {
    pub total: u64,
    pub count: u64,
    pub range: PageRange,
    pub results: Vec<T>,
}

impl<T> PaginatedQueryResult<T> {
    /// Assemble a page from the documents fetched at offset `from`.
    pub fn new(total: u64, from: u64, results: Vec<T>) -> Self {
        let count = results.len() as u64;
        Self {
            total,
            count,
            range: PageRange {
                from,
                to: from.saturating_add(count),
            },
            results,
        }
    }

    /// The page of a query that matched nothing.
    pub fn empty() -> Self {
        Self {
            total: 0,
            count: 0,
            range: PageRange { from: 0, to: 0 },
            results: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
