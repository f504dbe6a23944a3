//! Reactive property cell for Horizon DataView.
//!
//! A [`Property<T>`] wraps a value and detects changes. It is the storage
//! half of the signal/slot pattern: components keep their state (for
//! example, the filter currently applied to a bound data view) in
//! properties, and emit a [`crate::Signal`] when `set` reports a change.
//!
//! # Example
//!
//! ```
//! use horizon_dataview_core::{Property, Signal};
//!
//! struct FilterSlot {
//!     filter: Property<String>,
//!     filter_changed: Signal<String>,
//! }
//!
//! impl FilterSlot {
//!     fn set_filter(&self, value: String) {
//!         if self.filter.set(value.clone()) {
//!             self.filter_changed.emit(value);
//!         }
//!     }
//! }
//!
//! let slot = FilterSlot {
//!     filter: Property::new(String::new()),
//!     filter_changed: Signal::new(),
//! };
//! slot.set_filter("name=alice".to_string());
//! assert_eq!(slot.filter.get(), "name=alice");
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` uses interior mutability, so components can expose `&self`
/// setters the way the rest of the data-view layer does. When `set()` is
/// called, the new value is compared with the current one and the return
/// value says whether anything actually changed, which lets the caller skip
/// redundant change notifications.
///
/// # Example
///
/// ```
/// use horizon_dataview_core::Property;
///
/// let prop = Property::new(42);
/// assert_eq!(prop.get(), 42);
///
/// // Setting the same value returns false (no change)
/// assert!(!prop.set(42));
///
/// // Setting a different value returns true (changed)
/// assert!(prop.set(100));
/// assert_eq!(prop.get(), 100);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()`
    /// instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    ///
    /// Useful during initialization or batch updates where notifications
    /// are deferred.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
