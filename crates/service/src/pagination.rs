//! Pagination utilities for service layer
//!
//! Turns a `ListRequest` into an index window over an insertion-ordered collection.

use std::ops::Range;

use models::ListRequest;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// entries skipped from the start
    pub offset: usize,
    /// maximum entries returned; `None` for no limit
    pub count: Option<usize>,
}

impl Pagination {
    /// Clamp to the collection length.
    pub fn window(self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = match self.count {
            Some(count) => start.saturating_add(count).min(len),
            None => len,
        };
        start..end
    }
}

impl From<ListRequest> for Pagination {
    fn from(req: ListRequest) -> Self {
        Self {
            offset: req.offset.unwrap_or(0),
            count: req.count.filter(|c| *c > 0),
        }
    }
}
