use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Paging and sorting parameters for a listing request.
///
/// When `sort_by` is absent the entity's default sort column applies; the
/// entity id is always appended as a tiebreaker so pagination walks a
/// stable total order even with duplicate sort keys.
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySpec {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: Option<String>,
    pub sort_desc: bool,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_desc: false,
        }
    }
}

impl QuerySpec {
    /// A spec that fetches everything in one page. Internal callers only;
    /// transport-facing listings always go through [`QuerySpec::normalized`].
    pub fn unpaged() -> Self {
        Self {
            page: 1,
            page_size: u32::MAX,
            ..Self::default()
        }
    }

    /// Clamp the raw request into valid bounds: page at least 1, page size
    /// between 1 and the configured maximum.
    pub fn normalized(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size.max(1)),
            sort_by: self.sort_by.clone(),
            sort_desc: self.sort_desc,
        }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// ORDER BY clause body for this spec, validating the requested sort
    /// column against the entity's columns.
    pub fn order_clause(&self, allowed: &[&str], default_column: &str) -> AppResult<String> {
        let column = match &self.sort_by {
            Some(column) => {
                if !allowed.contains(&column.as_str()) {
                    return Err(AppError::validation(format!(
                        "Cannot sort by unknown column '{}'",
                        column
                    )));
                }
                column.as_str()
            }
            None => default_column,
        };
        let direction = if self.sort_desc { "DESC" } else { "ASC" };
        Ok(format!("{} {}, id ASC", column, direction))
    }
}

/// One page of entities plus the total match count, computed before
/// paging was applied.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    pub total_items: i64,
}

/// Transport-facing page envelope.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub page: u32,
    pub page_size: u32,
}
