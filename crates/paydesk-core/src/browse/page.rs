//! Page requests, page results and the slicing window between them.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};
use crate::record::Record;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A requested page of a filtered collection.
///
/// `limit` is always non-zero. `page` is 1-based; a `page` of 0 or one past
/// the last page is corrected to page 1 when the window is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageRequestRepr")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct PageRequestRepr {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn first_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<PageRequestRepr> for PageRequest {
    type Error = Error;

    fn try_from(repr: PageRequestRepr) -> Result<Self, Self::Error> {
        PageRequest::new(repr.page, repr.limit)
    }
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self, Error> {
        if limit == 0 {
            return Err(InvalidInputError::Page {
                reason: "limit must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(Self { page, limit })
    }

    /// The first page with the given size.
    pub fn first(limit: u32) -> Result<Self, Error> {
        Self::new(1, limit)
    }

    /// The same page size at another page.
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// The requested page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of records, borrowed from the browsed collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<'a> {
    /// Records on this page, most recent first.
    pub items: Vec<&'a Record>,
    /// The page actually served, always within `1..=total_pages`.
    pub page: u32,
    /// Number of pages; at least 1 even when nothing matched.
    pub total_pages: u32,
    /// Number of records that matched the criteria.
    pub total: usize,
}

impl PageResult<'_> {
    /// True if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// True if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// True if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// The resolved page number and slice bounds for `total` matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub page: u32,
    pub total_pages: u32,
    pub range: Range<usize>,
}

impl PageWindow {
    pub fn new(total: usize, request: PageRequest) -> Self {
        let limit = request.limit as usize;
        let total_pages = u32::try_from(total.div_ceil(limit).max(1)).unwrap_or(u32::MAX);

        let page = if (1..=total_pages).contains(&request.page) {
            request.page
        } else {
            1
        };

        let start = (page as usize - 1).saturating_mul(limit).min(total);
        let end = start.saturating_add(limit).min(total);

        Self {
            page,
            total_pages,
            range: start..end,
        }
    }
}
