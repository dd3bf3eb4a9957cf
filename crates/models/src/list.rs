use serde::{Deserialize, Serialize};

/// Listing window. `offset` skips entries in insertion order; `count` of
/// `None` or `Some(0)` means everything after the offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub offset: Option<usize>,
    pub count: Option<usize>,
}

impl ListRequest {
    pub fn new(offset: usize, count: usize) -> Self {
        Self { offset: Some(offset), count: Some(count) }
    }

    pub fn all() -> Self { Self::default() }
}
