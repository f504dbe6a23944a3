//! Filterable lazy data view.

use std::sync::Arc;

use horizon_dataview_core::signal::ConnectionId;
use parking_lot::RwLock;

use super::combiner::{combine_filters, FilterCombiner, IdentityCombiner};
use super::communicator::{CountChange, DataCommunicator};
use super::lazy_view::LazyDataView;
use super::query::Query;

/// A lazy data view with a typed filter API.
///
/// The view bridges three parties without owning the filter value itself:
///
/// - the **component** stores the filter; the view reaches it only through
///   the *filter consumer* (writes a new value into the component) and the
///   *filter supplier* (reads the currently stored value), both fixed at
///   construction;
/// - the **combiner** merges the component's current filter with each newly
///   supplied one ([`IdentityCombiner`] by default, so a new filter simply
///   replaces the old);
/// - the **data communicator** performs the actual fetching and counting.
///
/// [`set_filter`](Self::set_filter) never touches the communicator: writing
/// through the consumer is the component's own mutation path, so whatever
/// side effects the component ties to a filter change (typically forwarding
/// the filter to the communicator and refreshing) still happen. Triggering
/// that refresh is the consumer's contract, not this view's.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_dataview::{DataCommunicator, FilterableLazyDataView, Query};
/// use horizon_dataview_core::Property;
///
/// // A component double: filter storage that forwards to the communicator.
/// let communicator: Arc<DataCommunicator<String, String>> =
///     Arc::new(DataCommunicator::new(|_query: &Query<String>| Vec::new()));
/// let slot = Arc::new(Property::new(String::new()));
///
/// let consumer_slot = slot.clone();
/// let consumer_comm = communicator.clone();
/// let supplier_slot = slot.clone();
/// let view = FilterableLazyDataView::new(
///     communicator.clone(),
///     move |filter: String| {
///         if consumer_slot.set(filter.clone()) {
///             consumer_comm.set_filter(Some(filter));
///         }
///     },
///     move || supplier_slot.get(),
/// );
///
/// view.set_filter("name=alice".to_string());
/// assert_eq!(slot.get(), "name=alice");
/// assert_eq!(communicator.filter(), Some("name=alice".to_string()));
/// ```
pub struct FilterableLazyDataView<T, F> {
    view: LazyDataView<T, F>,
    /// Writes a combined filter value into the component.
    filter_consumer: Arc<dyn Fn(F) + Send + Sync>,
    /// Reads the component's currently stored filter value.
    filter_supplier: Arc<dyn Fn() -> F + Send + Sync>,
    /// Merges the component's current filter with a newly configured one.
    combiner: RwLock<Arc<dyn FilterCombiner<F>>>,
}

impl<T, F> FilterableLazyDataView<T, F>
where
    T: Send + Sync + 'static,
    F: Clone + Send + Sync + 'static,
{
    /// Creates a view bound to a communicator and a component's filter
    /// storage.
    ///
    /// `filter_consumer` writes a filter value into the component;
    /// `filter_supplier` reads the value currently stored there. Both are
    /// fixed for the lifetime of the view. The combiner starts as
    /// [`IdentityCombiner`].
    pub fn new<Consumer, Supplier>(
        communicator: Arc<DataCommunicator<T, F>>,
        filter_consumer: Consumer,
        filter_supplier: Supplier,
    ) -> Self
    where
        Consumer: Fn(F) + Send + Sync + 'static,
        Supplier: Fn() -> F + Send + Sync + 'static,
    {
        Self {
            view: LazyDataView::new(communicator),
            filter_consumer: Arc::new(filter_consumer),
            filter_supplier: Arc::new(filter_supplier),
            combiner: RwLock::new(Arc::new(IdentityCombiner)),
        }
    }

    /// Sets a filter on the bound component.
    ///
    /// Reads the component's current filter through the supplier, combines
    /// it with `filter` using the active combiner (the existing filter on
    /// the combiner's "current" side, `filter` on the "new" side), and
    /// writes the result back through the consumer. The component's filter
    /// is never mutated directly, so any side effects the component
    /// associates with filter changes are preserved.
    pub fn set_filter(&self, filter: F) {
        let combiner = self.combiner.read().clone();
        let existing = (self.filter_supplier)();
        let combined = combine_filters(combiner.as_ref(), filter, existing);
        tracing::trace!(
            target: "horizon_dataview::view",
            "combined filter pushed to component"
        );
        (self.filter_consumer)(combined);
    }

    /// Replaces the active filter combiner.
    ///
    /// Takes effect for subsequent [`set_filter`](Self::set_filter) calls
    /// only; a filter already stored in the component is not recombined.
    pub fn set_filter_combiner<C>(&self, combiner: C)
    where
        C: FilterCombiner<F> + 'static,
    {
        *self.combiner.write() = Arc::new(combiner);
    }

    /// Registers a filter-aware count callback on the data communicator,
    /// enabling exact filtered counts.
    ///
    /// Pure delegation; the view keeps no state of its own here.
    pub fn set_item_count_callback_with_filter<Count>(&self, callback: Count)
    where
        Count: Fn(&Query<F>) -> usize + Send + Sync + 'static,
    {
        self.view.communicator().set_count_callback(callback);
    }

    /// The base lazy view this filterable view extends.
    pub fn lazy(&self) -> &LazyDataView<T, F> {
        &self.view
    }

    /// The underlying data communicator.
    pub fn communicator(&self) -> &Arc<DataCommunicator<T, F>> {
        self.view.communicator()
    }

    /// Returns the item count, exact or estimated depending on the
    /// communicator's count mode.
    pub fn item_count(&self) -> usize {
        self.view.item_count()
    }

    /// Fetches the item at `index`, or `None` past the end of the data.
    pub fn item(&self, index: usize) -> Option<T> {
        self.view.item(index)
    }

    /// Fetches all items matching the active filter.
    pub fn items(&self) -> Vec<T> {
        self.view.items()
    }

    /// Connects a slot to the communicator's count change signal.
    pub fn on_item_count_changed<S>(&self, slot: S) -> ConnectionId
    where
        S: Fn(&CountChange) + Send + Sync + 'static,
    {
        self.view.on_item_count_changed(slot)
    }

    /// Discards fetched data and notifies bound views to re-fetch.
    pub fn refresh_all(&self) {
        self.view.refresh_all();
    }
}
