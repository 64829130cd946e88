use diesel::QueryResult;
use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 6;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of items available
    pub total: i64,
    /// Number of items requested (limit)
    pub limit: i64,
    /// Number of items skipped (offset)
    pub offset: i64,
}

/// `limit`/`offset` after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }

    /// Total for a page whose rows carry `COUNT(*) OVER()`. A page past the
    /// end has no row to carry it, so `count` runs instead.
    pub fn total<T>(
        self,
        rows: &[(T, i64)],
        count: impl FnOnce() -> QueryResult<i64>,
    ) -> QueryResult<i64> {
        match rows.first() {
            Some((_, total)) => Ok(*total),
            None if self.offset > 0 => count(),
            None => Ok(0),
        }
    }

    pub fn metadata(self, total: i64) -> PaginationMetadata {
        PaginationMetadata {
            total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
