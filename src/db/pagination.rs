use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Pages below 1 are clamped to 1; `per_page` is clamped to at least 1.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of items to skip before this page starts. Capped at
    /// `i64::MAX`, the largest skip MongoDB accepts.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as u64)
    }
}

/// One page of a listing, shaped for the public frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let last_page = total.div_ceil(request.per_page).max(1);
        Self {
            items,
            current_page: request.page,
            last_page,
            per_page: request.per_page,
            total,
        }
    }

    /// Slice an already ordered, fully materialized listing.
    pub fn from_slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let items = all
            .iter()
            .skip(request.offset() as usize)
            .take(request.per_page as usize)
            .cloned()
            .collect();
        Self::new(items, request, all.len() as u64)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
