use serde::{Deserialize, Serialize};

/// Paginated list envelope returned by collection endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps an unpaginated list so callers can treat both shapes alike.
    #[must_use]
    pub fn from_items(results: Vec<T>) -> Self {
        Self { count: results.len() as u64, next: None, previous: None, results }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}
