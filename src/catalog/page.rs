//! Offset/limit pagination over the filtered, sorted catalog.

use serde::Serialize;

pub const DEFAULT_LIMIT: usize = 20;

/// Validated pagination inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        PageParams {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageParams {
    /// Lenient parsing: non-numeric, zero or negative values coerce to the
    /// defaults (`limit` 20, `offset` 0) instead of erroring, mirroring the
    /// API's tolerant query handling.
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = offset
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .map(|v| v as usize)
            .unwrap_or(0);
        PageParams { limit, offset }
    }
}

/// Pagination metadata returned alongside every list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Slices one page out of an ordered collection. An offset past the end
/// yields an empty page with correct metadata, never an error.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> (Vec<T>, PageMeta) {
    let total = items.len();
    let start = params.offset.min(total);
    let end = start.saturating_add(params.limit).min(total);

    let page: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(end - start)
        .collect();

    let meta = PageMeta {
        total,
        limit: params.limit,
        offset: params.offset,
        has_more: params.offset + page.len() < total,
    };
    (page, meta)
}
