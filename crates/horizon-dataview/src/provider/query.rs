//! Paged data request.

/// A single paged request against a data source.
///
/// Carries the window of items being asked for and the filter in effect, if
/// any. Both the fetch and the count callbacks of a
/// [`DataCommunicator`](super::DataCommunicator) receive a `Query`; a count
/// callback should ignore the window and only look at the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<F> {
    offset: usize,
    limit: usize,
    filter: Option<F>,
}

impl<F> Query<F> {
    /// Creates an unfiltered query for `limit` items starting at `offset`.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            filter: None,
        }
    }

    /// Creates a query with an optional filter.
    pub fn with_filter(offset: usize, limit: usize, filter: Option<F>) -> Self {
        Self {
            offset,
            limit,
            filter,
        }
    }

    /// Index of the first requested item.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of items requested.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// One past the index of the last requested item, saturating at
    /// `usize::MAX`.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// The filter in effect, or `None` when no filter has been set yet.
    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }
}
