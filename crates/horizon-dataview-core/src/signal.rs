//! Signal/slot system for Horizon DataView.
//!
//! This module provides a type-safe signal/slot mechanism for change
//! notification between data components. Signals are emitted when a
//! component's state changes, and connected slots (callbacks) are invoked in
//! response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Threading
//!
//! The data-view layer is single-threaded by contract: every mutation is
//! expected to happen on the logical thread that owns the bound component.
//! Slots are therefore always invoked *directly*, in the emitting thread,
//! before `emit` returns. `Signal<Args>` is still `Send + Sync` so it can
//! live inside shared (`Arc`) component state.
//!
//! # Example
//!
//! ```
//! use horizon_dataview_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let filter_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = filter_changed.connect(|text| {
//!     println!("Filter changed to: {}", text);
//! });
//!
//! // Emit the signal
//! filter_changed.emit("name=alice".to_string());
//!
//! // Disconnect when done
//! filter_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a reference
/// to the provided arguments, in the emitting thread.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple like `(usize, bool)` for multiple
///   arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_dataview_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard borrows the signal, so the connection cannot outlive it.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_dataview_core::Signal;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Signal::<i32>::new();
    /// let counter = Arc::new(AtomicI32::new(0));
    /// {
    ///     let counter_clone = counter.clone();
    ///     let _guard = signal.connect_scoped(move |&n| {
    ///         counter_clone.fetch_add(n, Ordering::SeqCst);
    ///     });
    ///     signal.emit(42); // counter = 42
    /// }
    /// signal.emit(43); // Nothing happens - connection was dropped
    /// assert_eq!(counter.load(Ordering::SeqCst), 42);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false`
    /// otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing. This is useful
    /// during initialization or batch updates to prevent cascading
    /// notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Slots are invoked in the
    /// current thread; `emit` returns after the last slot has run.
    ///
    /// Slots connected or disconnected *by a slot during emission* take
    /// effect on the next emit, not the current one.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(
                target: crate::logging::targets::SIGNAL,
                "signal blocked, skipping emit"
            );
            return;
        }

        // Snapshot the slots so a slot may connect/disconnect without
        // deadlocking on the connection table.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            tracing::trace!(
                target: crate::logging::targets::SIGNAL,
                connection_count = connections.len(),
                "emitting signal"
            );
            connections.iter().map(|(_, conn)| conn.slot.clone()).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// This is useful for RAII-style connection management, ensuring connections
/// are cleaned up when the receiver goes out of scope. Created via
/// [`Signal::connect_scoped`].
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_connect_and_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signal.connect(move |&n| {
            recv.lock().push(n);
        });

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1, 2]);
    }

    #[test]
    fn test_multiple_slots() {
        let signal = Signal::<()>::new();
        let counter = Arc::new(Mutex::new(0));

        for _ in 0..3 {
            let c = counter.clone();
            signal.connect(move |_| {
                *c.lock() += 1;
            });
        }

        assert_eq!(signal.connection_count(), 3);
        signal.emit(());
        assert_eq!(*counter.lock(), 3);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        let id = signal.connect(move |&n| {
            recv.lock().push(n);
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
        // Second disconnect of the same ID is a no-op
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_blocked_signal_does_not_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signal.connect(move |&n| {
            recv.lock().push(n);
        });

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(1);

        signal.set_blocked(false);
        signal.emit(2);

        assert_eq!(*received.lock(), vec![2]);
    }

    #[test]
    fn test_scoped_connection_disconnects_on_drop() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let recv = received.clone();
            let _guard = signal.connect_scoped(move |&n| {
                recv.lock().push(n);
            });
            signal.emit(1);
            assert_eq!(signal.connection_count(), 1);
        }

        assert_eq!(signal.connection_count(), 0);
        signal.emit(2);
        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_slot_may_reconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let fired = Arc::new(Mutex::new(0));

        let sig = signal.clone();
        let f = fired.clone();
        signal.connect(move |_| {
            *f.lock() += 1;
            // Connecting from within a slot must not deadlock.
            sig.connect(|_| {});
        });

        signal.emit(());
        assert_eq!(*fired.lock(), 1);
        assert_eq!(signal.connection_count(), 2);
    }
}
