use typed_builder::TypedBuilder;

/// Query string of a collection request.
///
/// ```rust
/// use fdesk_http::ListQuery;
///
/// let query = ListQuery::builder().page(2).search("hilux").build().filter("status", "available");
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("page".to_owned(), "2".to_owned()),
///         ("search".to_owned(), "hilux".to_owned()),
///         ("status".to_owned(), "available".to_owned()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct ListQuery {
    #[builder(default, setter(strip_option))]
    pub page: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub page_size: Option<u32>,
    #[builder(default, setter(strip_option, into))]
    pub search: Option<String>,
    /// Backend ordering expression, e.g. `-created_at`.
    #[builder(default, setter(strip_option, into))]
    pub ordering: Option<String>,
    #[builder(default)]
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary `key=value` filter. Repeated keys are kept.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.page_size.is_none()
            && self.search.is_none()
            && self.ordering.is_none()
            && self.filters.is_empty()
    }

    /// Flattens the query into `key=value` pairs. Blank search and ordering are dropped.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(4 + self.filters.len());
        if let Some(page) = self.page {
            pairs.push(("page".to_owned(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size".to_owned(), size.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_owned(), search.to_owned()));
        }
        if let Some(ordering) = self.ordering.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("ordering".to_owned(), ordering.to_owned()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}
