//! Data communicator: paged fetching and count bookkeeping.
//!
//! `DataCommunicator` sits between a lazy view and the backing data source.
//! The source is reached exclusively through callbacks, so the communicator
//! works the same whether the data lives in memory, behind a database, or
//! across the network.

use std::sync::Arc;

use horizon_dataview_core::Signal;
use parking_lot::{Mutex, RwLock};

use super::query::Query;

/// Type alias for a fetch callback.
///
/// Receives the paged [`Query`] (window plus active filter) and returns the
/// items in that window.
pub type FetchCallback<T, F> = Arc<dyn Fn(&Query<F>) -> Vec<T> + Send + Sync>;

/// Type alias for a count callback.
///
/// Receives a [`Query`] carrying the active filter and returns the total
/// number of matching items. The query window should be ignored.
pub type CountCallback<F> = Arc<dyn Fn(&Query<F>) -> usize + Send + Sync>;

/// Default number of items fetched per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A change in the item count reported by a [`DataCommunicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountChange {
    /// The new item count.
    pub count: usize,
    /// `true` when the count is an estimate rather than an exact total.
    pub is_estimate: bool,
}

/// Owns paged, lazy fetching and count computation for items of type `T`
/// filtered by values of type `F`.
///
/// # Count modes
///
/// A communicator is in one of two count modes:
///
/// - **Exact** (defined size): a count callback is registered and
///   [`item_count`](Self::item_count) asks it for the real total.
/// - **Estimated** (undefined size): no count callback, or estimation was
///   requested explicitly. The count starts at an estimate (four pages by
///   default) and adapts as pages are fetched: a full page reaching the end
///   of the estimated range grows the estimate by a configurable increase,
///   while a short page pins the exact count at the end of the returned
///   items.
///
/// A fresh communicator has no count callback and therefore starts in
/// estimated mode; registering a callback switches it to exact mode.
///
/// # Signals
///
/// - [`item_count_changed`](Self::item_count_changed) fires whenever the
///   reported count differs from the last one reported.
/// - [`data_reset`](Self::data_reset) fires when previously fetched data
///   became stale (filter replaced, [`refresh_all`](Self::refresh_all));
///   bound views re-fetch in response.
pub struct DataCommunicator<T, F> {
    fetch_callback: RwLock<FetchCallback<T, F>>,
    count_callback: RwLock<Option<CountCallback<F>>>,
    /// The filter applied to every outgoing query.
    filter: RwLock<Option<F>>,
    page_size: RwLock<usize>,
    /// `true` when counts come from the count callback.
    defined_size: RwLock<bool>,
    item_count_estimate: RwLock<usize>,
    item_count_estimate_increase: RwLock<usize>,
    /// Exact count discovered by a short fetch in estimated mode.
    known_count: RwLock<Option<usize>>,
    /// Last count reported through `item_count_changed`, for deduplication.
    last_reported: Mutex<Option<CountChange>>,
    /// Emitted when the reported item count changes.
    pub item_count_changed: Signal<CountChange>,
    /// Emitted when fetched data became stale and must be re-fetched.
    pub data_reset: Signal<()>,
}

impl<T, F> DataCommunicator<T, F>
where
    T: Send + Sync + 'static,
    F: Clone + Send + Sync + 'static,
{
    /// Creates a communicator around the given fetch callback.
    ///
    /// The page size defaults to [`DEFAULT_PAGE_SIZE`]; the initial count
    /// estimate and estimate increase default to four pages each.
    pub fn new<Fetch>(fetch_callback: Fetch) -> Self
    where
        Fetch: Fn(&Query<F>) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            fetch_callback: RwLock::new(Arc::new(fetch_callback)),
            count_callback: RwLock::new(None),
            filter: RwLock::new(None),
            page_size: RwLock::new(DEFAULT_PAGE_SIZE),
            defined_size: RwLock::new(false),
            item_count_estimate: RwLock::new(DEFAULT_PAGE_SIZE * 4),
            item_count_estimate_increase: RwLock::new(DEFAULT_PAGE_SIZE * 4),
            known_count: RwLock::new(None),
            last_reported: Mutex::new(None),
            item_count_changed: Signal::new(),
            data_reset: Signal::new(),
        }
    }

    /// Replaces the fetch callback.
    pub fn set_fetch_callback<Fetch>(&self, fetch_callback: Fetch)
    where
        Fetch: Fn(&Query<F>) -> Vec<T> + Send + Sync + 'static,
    {
        *self.fetch_callback.write() = Arc::new(fetch_callback);
    }

    /// Registers a count callback and switches to exact count mode.
    ///
    /// The callback replaces any previously registered one and is consulted
    /// by every subsequent [`item_count`](Self::item_count) call.
    pub fn set_count_callback<Count>(&self, count_callback: Count)
    where
        Count: Fn(&Query<F>) -> usize + Send + Sync + 'static,
    {
        tracing::debug!(
            target: "horizon_dataview::communicator",
            "count callback registered, switching to exact count mode"
        );
        *self.count_callback.write() = Some(Arc::new(count_callback));
        *self.defined_size.write() = true;
        *self.known_count.write() = None;
    }

    /// Whether a count callback is currently registered.
    pub fn has_count_callback(&self) -> bool {
        self.count_callback.read().is_some()
    }

    /// Replaces the active filter and resets fetched data.
    ///
    /// Emits [`data_reset`](Self::data_reset) so bound views re-fetch with
    /// the new filter.
    pub fn set_filter(&self, filter: Option<F>) {
        tracing::debug!(
            target: "horizon_dataview::communicator",
            has_filter = filter.is_some(),
            "filter replaced"
        );
        *self.filter.write() = filter;
        self.invalidate_counts();
        self.data_reset.emit(());
    }

    /// The active filter, if any.
    pub fn filter(&self) -> Option<F> {
        self.filter.read().clone()
    }

    /// Sets the page size used for paged traversal.
    ///
    /// Fails with [`Error::ZeroPageSize`](crate::Error::ZeroPageSize) for a
    /// zero page size.
    pub fn set_page_size(&self, page_size: usize) -> crate::Result<()> {
        if page_size == 0 {
            return Err(crate::Error::ZeroPageSize);
        }
        *self.page_size.write() = page_size;
        Ok(())
    }

    /// The current page size.
    pub fn page_size(&self) -> usize {
        *self.page_size.read()
    }

    /// Whether the communicator is in exact (defined size) count mode.
    pub fn is_defined_size(&self) -> bool {
        *self.defined_size.read()
    }

    /// Switches between exact and estimated count modes.
    ///
    /// Enabling exact mode requires a registered count callback and fails
    /// with [`Error::MissingCountCallback`](crate::Error::MissingCountCallback)
    /// otherwise. Disabling it always succeeds and returns counting to the
    /// estimate-driven protocol.
    pub fn set_defined_size(&self, defined: bool) -> crate::Result<()> {
        if defined && !self.has_count_callback() {
            return Err(crate::Error::MissingCountCallback);
        }
        *self.defined_size.write() = defined;
        if !defined {
            *self.known_count.write() = None;
        }
        Ok(())
    }

    /// Sets the estimate used while the exact count is unknown, switching to
    /// estimated count mode.
    ///
    /// Fails with [`Error::ZeroCountEstimate`](crate::Error::ZeroCountEstimate)
    /// for a zero estimate.
    pub fn set_item_count_estimate(&self, estimate: usize) -> crate::Result<()> {
        if estimate == 0 {
            return Err(crate::Error::ZeroCountEstimate);
        }
        *self.item_count_estimate.write() = estimate;
        *self.defined_size.write() = false;
        *self.known_count.write() = None;
        Ok(())
    }

    /// The current item count estimate.
    pub fn item_count_estimate(&self) -> usize {
        *self.item_count_estimate.read()
    }

    /// Sets how much the estimate grows each time fetched data reaches the
    /// end of the estimated range.
    ///
    /// Fails with
    /// [`Error::ZeroEstimateIncrease`](crate::Error::ZeroEstimateIncrease)
    /// for a zero increase.
    pub fn set_item_count_estimate_increase(&self, increase: usize) -> crate::Result<()> {
        if increase == 0 {
            return Err(crate::Error::ZeroEstimateIncrease);
        }
        *self.item_count_estimate_increase.write() = increase;
        Ok(())
    }

    /// The current estimate increase.
    pub fn item_count_estimate_increase(&self) -> usize {
        *self.item_count_estimate_increase.read()
    }

    /// `true` when the count reported by [`item_count`](Self::item_count) is
    /// an estimate rather than an exact total.
    pub fn is_count_estimated(&self) -> bool {
        !self.is_defined_size() && self.known_count.read().is_none()
    }

    /// Returns the item count: exact in defined mode, estimated otherwise.
    ///
    /// Emits [`item_count_changed`](Self::item_count_changed) when the
    /// result differs from the last reported count.
    pub fn item_count(&self) -> usize {
        let callback = if self.is_defined_size() {
            self.count_callback.read().clone()
        } else {
            None
        };

        if let Some(callback) = callback {
            let query = Query::with_filter(0, usize::MAX, self.filter());
            let count = callback(&query);
            self.report_count(count, false);
            return count;
        }

        if let Some(exact) = *self.known_count.read() {
            return exact;
        }
        self.item_count_estimate()
    }

    /// Fetches `limit` items starting at `offset`, with the active filter
    /// applied.
    ///
    /// In estimated count mode the result also drives the count protocol: a
    /// short page pins the exact count, a full page at the edge of the
    /// estimated range grows the estimate.
    pub fn fetch(&self, offset: usize, limit: usize) -> Vec<T> {
        let query = Query::with_filter(offset, limit, self.filter());
        let callback = self.fetch_callback.read().clone();
        let items = callback(&query);
        tracing::trace!(
            target: "horizon_dataview::communicator",
            offset,
            limit,
            returned = items.len(),
            "fetched page"
        );

        if !self.is_defined_size() {
            if items.len() < limit {
                let exact = offset + items.len();
                *self.known_count.write() = Some(exact);
                self.report_count(exact, false);
            } else if self.known_count.read().is_none() && query.end() >= self.item_count_estimate()
            {
                let increase = self.item_count_estimate_increase();
                let grown = self.item_count_estimate().saturating_add(increase);
                *self.item_count_estimate.write() = grown;
                self.report_count(grown, true);
            }
        }

        items
    }

    /// Discards everything fetched or counted so far.
    ///
    /// Emits [`data_reset`](Self::data_reset); bound views respond by
    /// re-fetching.
    pub fn refresh_all(&self) {
        tracing::debug!(target: "horizon_dataview::communicator", "refresh requested");
        self.invalidate_counts();
        self.data_reset.emit(());
    }

    fn invalidate_counts(&self) {
        *self.known_count.write() = None;
        *self.last_reported.lock() = None;
    }

    /// Emits `item_count_changed` unless the count matches the last report.
    fn report_count(&self, count: usize, is_estimate: bool) {
        let change = CountChange { count, is_estimate };
        {
            let mut last = self.last_reported.lock();
            if *last == Some(change) {
                return;
            }
            *last = Some(change);
        }
        self.item_count_changed.emit(change);
    }
}

static_assertions::assert_impl_all!(DataCommunicator<(), ()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Communicator over a fixed range of integers, ignoring the filter.
    fn range_communicator(total: usize) -> DataCommunicator<usize, String> {
        DataCommunicator::new(move |query: &Query<String>| {
            (query.offset()..query.end().min(total)).collect()
        })
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let communicator = range_communicator(10);
        assert_eq!(communicator.set_page_size(0), Err(crate::Error::ZeroPageSize));
        assert_eq!(communicator.page_size(), DEFAULT_PAGE_SIZE);
        communicator.set_page_size(25).unwrap();
        assert_eq!(communicator.page_size(), 25);
    }

    #[test]
    fn test_zero_estimate_rejected() {
        let communicator = range_communicator(10);
        assert_eq!(
            communicator.set_item_count_estimate(0),
            Err(crate::Error::ZeroCountEstimate)
        );
        assert_eq!(
            communicator.set_item_count_estimate_increase(0),
            Err(crate::Error::ZeroEstimateIncrease)
        );
    }

    #[test]
    fn test_defined_size_requires_count_callback() {
        let communicator = range_communicator(10);
        assert_eq!(
            communicator.set_defined_size(true),
            Err(crate::Error::MissingCountCallback)
        );
        communicator.set_count_callback(|_| 10);
        communicator.set_defined_size(true).unwrap();
        assert!(communicator.is_defined_size());
    }

    #[test]
    fn test_count_callback_switches_to_exact_mode() {
        let communicator = range_communicator(95);
        assert!(communicator.is_count_estimated());

        communicator.set_count_callback(|_| 95);
        assert!(communicator.has_count_callback());
        assert!(!communicator.is_count_estimated());
        assert_eq!(communicator.item_count(), 95);
    }

    #[test]
    fn test_estimate_grows_on_full_page_at_edge() {
        let communicator = range_communicator(500);
        communicator.set_item_count_estimate(100).unwrap();
        communicator.set_item_count_estimate_increase(40).unwrap();

        let reported = Arc::new(Mutex::new(Vec::new()));
        let capture = reported.clone();
        communicator.item_count_changed.connect(move |change| {
            capture.lock().push(*change);
        });

        // A full page short of the edge leaves the estimate alone.
        assert_eq!(communicator.fetch(0, 50).len(), 50);
        assert_eq!(communicator.item_count(), 100);

        // A full page reaching the edge grows it.
        assert_eq!(communicator.fetch(50, 50).len(), 50);
        assert_eq!(communicator.item_count(), 140);

        assert_eq!(
            *reported.lock(),
            vec![CountChange {
                count: 140,
                is_estimate: true
            }]
        );
    }

    #[test]
    fn test_short_page_pins_exact_count() {
        let communicator = range_communicator(95);

        let reported = Arc::new(Mutex::new(Vec::new()));
        let capture = reported.clone();
        communicator.item_count_changed.connect(move |change| {
            capture.lock().push(*change);
        });

        // 45 of 50 requested items come back: the data ends at 95.
        assert_eq!(communicator.fetch(50, 50).len(), 45);
        assert_eq!(communicator.item_count(), 95);
        assert!(!communicator.is_count_estimated());

        assert_eq!(
            *reported.lock(),
            vec![CountChange {
                count: 95,
                is_estimate: false
            }]
        );
    }

    #[test]
    fn test_filter_travels_with_every_query() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let capture = seen.clone();
        let communicator: DataCommunicator<usize, String> =
            DataCommunicator::new(move |query: &Query<String>| {
                capture.lock().push(query.filter().cloned());
                Vec::new()
            });

        communicator.fetch(0, 10);
        communicator.set_filter(Some("name=alice".to_string()));
        communicator.fetch(0, 10);

        assert_eq!(
            *seen.lock(),
            vec![None, Some("name=alice".to_string())]
        );
    }

    #[test]
    fn test_set_filter_emits_data_reset() {
        let communicator = range_communicator(10);
        let resets = Arc::new(Mutex::new(0));
        let capture = resets.clone();
        communicator.data_reset.connect(move |_| {
            *capture.lock() += 1;
        });

        communicator.set_filter(Some("f".to_string()));
        communicator.refresh_all();
        assert_eq!(*resets.lock(), 2);
    }

    #[test]
    fn test_count_change_reported_once() {
        let communicator = range_communicator(95);
        communicator.set_count_callback(|_| 95);

        let reports = Arc::new(Mutex::new(0));
        let capture = reports.clone();
        communicator.item_count_changed.connect(move |_| {
            *capture.lock() += 1;
        });

        communicator.item_count();
        communicator.item_count();
        assert_eq!(*reports.lock(), 1);

        // A refresh forgets the last report, so the next count fires again.
        communicator.refresh_all();
        communicator.item_count();
        assert_eq!(*reports.lock(), 2);
    }

    #[test]
    fn test_count_callback_sees_active_filter() {
        let communicator = range_communicator(100);
        communicator.set_filter(Some("active".to_string()));
        communicator.set_count_callback(|query: &Query<String>| {
            if query.filter().is_some() { 40 } else { 100 }
        });

        assert_eq!(communicator.item_count(), 40);
        communicator.set_filter(None);
        assert_eq!(communicator.item_count(), 100);
    }
}
