//! Pagination envelope for list endpoints

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::specification::Specification;
use crate::traits::{Entity, Repository};

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 6;
/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 50;

/// Server-side paging limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Page size used when none (or zero) is requested.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound on any requested page size.
    #[serde(default = "max_page_size")]
    pub max_page_size: usize,
}

impl PageLimits {
    /// Resolve a requested page size: missing or zero falls back to the
    /// default, anything above the cap is clamped.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            None | Some(0) => self.default_page_size.min(self.max_page_size),
            Some(size) => size.min(self.max_page_size),
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn max_page_size() -> usize {
    MAX_PAGE_SIZE
}

/// One page of results plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination<T> {
    /// Requested page (0-based).
    pub page_index: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Number of entities matching the specification, independent of paging.
    pub count: u64,
    /// The items on this page.
    pub data: Vec<T>,
}

impl<T> Pagination<T> {
    pub fn new(page_index: usize, page_size: usize, count: u64, data: Vec<T>) -> Self {
        Self {
            page_index,
            page_size,
            count,
            data,
        }
    }

    /// Total number of pages, `ceil(count / page_size)`.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.count.div_ceil(self.page_size as u64)
    }

    /// Whether a page exists after this one.
    pub fn has_next(&self) -> bool {
        (self.page_index as u64) < self.total_pages().saturating_sub(1)
    }

    /// Whether a page exists before this one.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }
}

/// Run `list` and `count` for a specification and assemble a page.
///
/// Every paged listing goes through here. The two reads are independent and
/// run concurrently.
///
/// # Example
///
/// ```ignore
/// let spec = product_specification(&params, &limits)?;
/// let page = paginate(&repo, &spec, params.page_index, limits.page_size(params.page_size)).await?;
/// ```
pub async fn paginate<T, R, P>(
    repo: &P,
    spec: &Specification<T, R>,
    page_index: usize,
    page_size: usize,
) -> Result<Pagination<R>>
where
    T: Entity,
    R: Send + 'static,
    P: Repository<T>,
{
    let (data, count) = futures::try_join!(repo.list(spec), repo.count(spec))?;
    Ok(Pagination::new(page_index, page_size, count, data))
}
