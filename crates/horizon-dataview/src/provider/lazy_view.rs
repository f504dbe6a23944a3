//! Base lazy data view.

use std::sync::Arc;

use horizon_dataview_core::signal::ConnectionId;

use super::communicator::{CountChange, DataCommunicator};
use super::query::Query;

/// A lazy-loading view over a [`DataCommunicator`].
///
/// The view is a thin, typed facade: it owns no data of its own and forwards
/// everything to the communicator it was constructed with. It is the base
/// capability that [`FilterableLazyDataView`](super::FilterableLazyDataView)
/// builds on, and can be used directly for unfiltered components.
///
/// One view is constructed per component/communicator pairing and lives as
/// long as that pairing.
pub struct LazyDataView<T, F> {
    communicator: Arc<DataCommunicator<T, F>>,
}

impl<T, F> Clone for LazyDataView<T, F> {
    fn clone(&self) -> Self {
        Self {
            communicator: Arc::clone(&self.communicator),
        }
    }
}

impl<T, F> LazyDataView<T, F>
where
    T: Send + Sync + 'static,
    F: Clone + Send + Sync + 'static,
{
    /// Creates a view over the given communicator.
    pub fn new(communicator: Arc<DataCommunicator<T, F>>) -> Self {
        Self { communicator }
    }

    /// The underlying data communicator.
    pub fn communicator(&self) -> &Arc<DataCommunicator<T, F>> {
        &self.communicator
    }

    /// Returns the item count, exact or estimated depending on the
    /// communicator's count mode.
    pub fn item_count(&self) -> usize {
        self.communicator.item_count()
    }

    /// Fetches the item at `index`, or `None` past the end of the data.
    pub fn item(&self, index: usize) -> Option<T> {
        self.communicator.fetch(index, 1).into_iter().next()
    }

    /// Fetches all items, paging through the communicator until the data is
    /// exhausted.
    ///
    /// Intended for component logic that genuinely needs every item (for
    /// example select-all); rendering paths should fetch windows instead.
    pub fn items(&self) -> Vec<T> {
        let page_size = self.communicator.page_size();
        let mut all = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.communicator.fetch(offset, page_size);
            let got = page.len();
            all.extend(page);
            if got < page_size {
                break;
            }
            offset += got;
        }
        all
    }

    /// Registers a plain count callback on the communicator, switching it to
    /// exact count mode.
    pub fn set_item_count_callback<Count>(&self, callback: Count)
    where
        Count: Fn(&Query<F>) -> usize + Send + Sync + 'static,
    {
        self.communicator.set_count_callback(callback);
    }

    /// Switches the communicator to estimated counting with the given
    /// estimate.
    pub fn set_item_count_estimate(&self, estimate: usize) -> crate::Result<()> {
        self.communicator.set_item_count_estimate(estimate)
    }

    /// Sets how much the estimate grows when fetched data reaches its edge.
    pub fn set_item_count_estimate_increase(&self, increase: usize) -> crate::Result<()> {
        self.communicator.set_item_count_estimate_increase(increase)
    }

    /// Switches to estimated counting without changing the estimate.
    pub fn set_item_count_unknown(&self) {
        // Cannot fail: disabling exact mode needs no callback.
        let _ = self.communicator.set_defined_size(false);
    }

    /// Switches back to exact counting through the registered count
    /// callback.
    ///
    /// Fails with
    /// [`Error::MissingCountCallback`](crate::Error::MissingCountCallback)
    /// when no count callback is registered.
    pub fn set_item_count_exact(&self) -> crate::Result<()> {
        self.communicator.set_defined_size(true)
    }

    /// Connects a slot to the communicator's count change signal.
    pub fn on_item_count_changed<S>(&self, slot: S) -> ConnectionId
    where
        S: Fn(&CountChange) + Send + Sync + 'static,
    {
        self.communicator.item_count_changed.connect(slot)
    }

    /// Discards fetched data and notifies bound views to re-fetch.
    pub fn refresh_all(&self) {
        self.communicator.refresh_all();
    }
}
