//! Lazy data-view layer for Horizon DataView.
//!
//! This module binds UI components to paged data sources without ever
//! materializing the full data set. It separates three responsibilities:
//!
//! - `DataCommunicator`: talks to the data source through fetch/count
//!   callbacks and tracks the item count (exact or estimated)
//! - `LazyDataView` / `FilterableLazyDataView`: the typed facade a
//!   component exposes to application code
//! - `FilterCombiner`: the strategy merging a component's stored filter
//!   with each newly configured one
//!
//! # Core Types
//!
//! - `Query`: a paged request (offset, limit, active filter)
//! - `DataCommunicator`: paged fetching and count computation
//! - `CountChange`: payload of the item-count-changed signal
//! - `LazyDataView`: lazy view over a communicator
//! - `FilterableLazyDataView`: adds the typed filter API
//! - `FilterCombiner` / `IdentityCombiner`: filter merge strategies
//! - `ListSource`: in-memory reference backend
//!
//! # Architecture Overview
//!
//! ```text
//! set_filter(F)
//!      │
//!      ▼
//! ┌──────────────────────────┐   supplier    ┌───────────────┐
//! │ FilterableLazyDataView   │──────────────>│   Component   │
//! │   (FilterCombiner)       │<──────────────│  filter slot  │
//! └──────────────────────────┘   consumer    └───────┬───────┘
//!              │                                     │ side effect
//!              ▼                                     ▼
//! ┌──────────────────────────┐   fetch/count ┌───────────────┐
//! │     LazyDataView         │──────────────>│ DataCommunica-│
//! │  (count/refresh plumbing)│               │ tor(callbacks)│
//! └──────────────────────────┘               └───────────────┘
//! ```
//!
//! The view combines the component's existing filter with the newly set one
//! and writes the result into the component's filter slot; the component's
//! own change handling (the "side effect" edge) pushes the filter into the
//! communicator and triggers a refresh. The view deliberately never short
//! circuits that edge.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_dataview::{FilterableLazyDataView, ListSource};
//! use horizon_dataview_core::Property;
//!
//! let source = ListSource::new(
//!     (1..=200).collect::<Vec<u32>>(),
//!     |item: &u32, min: &u32| item >= min,
//! );
//! let communicator = Arc::new(source.communicator());
//!
//! // Component double: stores the filter and forwards it on change.
//! let slot = Arc::new(Property::new(0u32));
//! let consumer_slot = slot.clone();
//! let consumer_comm = communicator.clone();
//! let supplier_slot = slot.clone();
//!
//! let view = FilterableLazyDataView::new(
//!     communicator,
//!     move |filter| {
//!         if consumer_slot.set(filter) {
//!             consumer_comm.set_filter(Some(filter));
//!         }
//!     },
//!     move || supplier_slot.get(),
//! );
//!
//! assert_eq!(view.item_count(), 200);
//! view.set_filter(150);
//! assert_eq!(view.item_count(), 51);
//! ```

mod combiner;
mod communicator;
mod filterable_view;
mod lazy_view;
mod list_source;
mod query;

pub use combiner::{combine_filters, FilterCombiner, IdentityCombiner};
pub use communicator::{
    CountCallback, CountChange, DataCommunicator, FetchCallback, DEFAULT_PAGE_SIZE,
};
pub use filterable_view::FilterableLazyDataView;
pub use lazy_view::LazyDataView;
pub use list_source::{FilterMatcher, ListSource};
pub use query::Query;
