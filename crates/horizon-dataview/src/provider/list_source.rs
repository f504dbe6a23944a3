//! In-memory data source.

use std::sync::Arc;

use parking_lot::RwLock;

use super::communicator::DataCommunicator;
use super::query::Query;

/// Type alias for a filter matcher function.
///
/// Returns `true` if the item matches the filter, `false` to exclude it.
pub type FilterMatcher<T, F> = Arc<dyn Fn(&T, &F) -> bool + Send + Sync>;

/// An in-memory data source producing ready-wired communicators.
///
/// `ListSource<T, F>` keeps its items in a `Vec` and interprets filters
/// through a caller-supplied matcher. It is the reference backend for
/// components whose data fits in memory, and the natural test double for
/// the lazy-view machinery.
///
/// The source is cheaply cloneable; clones share the same backing items, as
/// do all communicators handed out by [`communicator`](Self::communicator).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_dataview::{LazyDataView, ListSource};
///
/// let source = ListSource::new(
///     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
///     |name: &String, needle: &String| name.contains(needle.as_str()),
/// );
///
/// let communicator = Arc::new(source.communicator());
/// communicator.set_filter(Some("o".to_string()));
///
/// let view = LazyDataView::new(communicator);
/// assert_eq!(view.items(), vec!["bob".to_string(), "carol".to_string()]);
/// ```
pub struct ListSource<T, F> {
    items: Arc<RwLock<Vec<T>>>,
    matcher: FilterMatcher<T, F>,
}

impl<T, F> Clone for ListSource<T, F> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            matcher: Arc::clone(&self.matcher),
        }
    }
}

impl<T, F> ListSource<T, F>
where
    T: Clone + Send + Sync + 'static,
    F: Clone + Send + Sync + 'static,
{
    /// Creates a source over `items`, interpreting filters with `matcher`.
    pub fn new<M>(items: Vec<T>, matcher: M) -> Self
    where
        M: Fn(&T, &F) -> bool + Send + Sync + 'static,
    {
        Self {
            items: Arc::new(RwLock::new(items)),
            matcher: Arc::new(matcher),
        }
    }

    /// Number of items, ignoring any filter.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the source holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Replaces the backing items.
    ///
    /// Communicators already handed out keep reading through to this source,
    /// so a caller swapping items should follow up with
    /// [`DataCommunicator::refresh_all`] on each of them.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
    }

    /// Builds a communicator wired to this source.
    ///
    /// The communicator fetches windows of matching items and counts exactly
    /// through the source, so it starts in exact count mode.
    pub fn communicator(&self) -> DataCommunicator<T, F> {
        let items = Arc::clone(&self.items);
        let matcher = Arc::clone(&self.matcher);
        let communicator = DataCommunicator::new(move |query: &Query<F>| {
            items
                .read()
                .iter()
                .filter(|item| match query.filter() {
                    Some(filter) => matcher(item, filter),
                    None => true,
                })
                .skip(query.offset())
                .take(query.limit())
                .cloned()
                .collect()
        });

        let items = Arc::clone(&self.items);
        let matcher = Arc::clone(&self.matcher);
        communicator.set_count_callback(move |query: &Query<F>| match query.filter() {
            Some(filter) => items.read().iter().filter(|item| matcher(item, filter)).count(),
            None => items.read().len(),
        });
        communicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> ListSource<u32, u32> {
        // Filter semantics: keep values greater than or equal to the filter.
        ListSource::new((0..100).collect(), |item, min| item >= min)
    }

    #[test]
    fn test_unfiltered_fetch_and_count() {
        let source = numbers();
        let communicator = source.communicator();

        assert!(communicator.is_defined_size());
        assert_eq!(communicator.item_count(), 100);
        assert_eq!(communicator.fetch(10, 5), vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_filtered_fetch_and_count() {
        let source = numbers();
        let communicator = source.communicator();
        communicator.set_filter(Some(90));

        assert_eq!(communicator.item_count(), 10);
        assert_eq!(communicator.fetch(0, 3), vec![90, 91, 92]);
        // Offsets are relative to the filtered sequence
        assert_eq!(communicator.fetch(8, 5), vec![98, 99]);
    }

    #[test]
    fn test_set_items_reflected_after_refresh() {
        let source = numbers();
        let communicator = source.communicator();
        assert_eq!(communicator.item_count(), 100);

        source.set_items(vec![1, 2, 3]);
        communicator.refresh_all();

        assert_eq!(communicator.item_count(), 3);
        assert_eq!(source.len(), 3);
        assert!(!source.is_empty());
    }

    #[test]
    fn test_clones_share_items() {
        let source = numbers();
        let clone = source.clone();
        clone.set_items(vec![7]);
        assert_eq!(source.len(), 1);
    }
}
