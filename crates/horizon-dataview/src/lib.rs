//! Lazy, filterable data views for UI components.
//!
//! Horizon DataView binds a UI component to a paged or streaming data
//! source through a *data communicator*, fetching items on demand instead of
//! materializing the full collection up front. On top of that lazy base it
//! layers a typed filter API: callers set filters on the view, a pluggable
//! [`FilterCombiner`] merges each new filter with the one the component
//! already holds, and the combined value is pushed into the component's own
//! filter storage, from where the component's change handling drives the
//! communicator.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use horizon_dataview::{FilterableLazyDataView, ListSource};
//! use horizon_dataview_core::Property;
//!
//! #[derive(Clone)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let source = ListSource::new(
//!     vec![
//!         Person { name: "Alice".into(), age: 30 },
//!         Person { name: "Bob".into(), age: 25 },
//!         Person { name: "Charlie".into(), age: 35 },
//!     ],
//!     |person: &Person, min_age: &u32| person.age >= *min_age,
//! );
//! let communicator = Arc::new(source.communicator());
//!
//! // The component's filter slot; in a real component this lives inside
//! // the widget and re-renders on change.
//! let slot = Arc::new(Property::new(0u32));
//! let consumer_slot = slot.clone();
//! let consumer_comm = communicator.clone();
//! let supplier_slot = slot.clone();
//!
//! let view = FilterableLazyDataView::new(
//!     communicator,
//!     move |min_age| {
//!         if consumer_slot.set(min_age) {
//!             consumer_comm.set_filter(Some(min_age));
//!         }
//!     },
//!     move || supplier_slot.get(),
//! );
//!
//! view.set_filter(30);
//! assert_eq!(view.item_count(), 2);
//! ```
//!
//! # Modules
//!
//! - [`provider`]: the data-view layer (communicator, views, combiners)
//! - [`error`]: invalid-argument errors and the crate [`Result`] alias
//!
//! # Logging
//!
//! The crate logs through `tracing` under the `horizon_dataview::*`
//! targets; install a subscriber (for example `tracing_subscriber`) to see
//! the output.

pub mod error;
pub mod provider;

pub use error::{Error, Result};
pub use provider::{
    combine_filters, CountCallback, CountChange, DataCommunicator, FetchCallback, FilterCombiner,
    FilterMatcher, FilterableLazyDataView, IdentityCombiner, LazyDataView, ListSource, Query,
    DEFAULT_PAGE_SIZE,
};
