//! Signal/slot notification bus.
//!
//! A small, type-safe publish/subscribe mechanism. Signals decouple the
//! monitor from its listeners: the monitor emits status transitions without
//! knowing who, if anyone, is observing them.
//!
//! Emission is always direct and synchronous: connected slots run on the
//! thread that calls [`Signal::emit`]. For reachability monitoring that is
//! the flag source's background delivery context, so slots must be prepared
//! to run off the thread that connected them.
//!
//! # Example
//!
//! ```
//! use reachwatch::signal::Signal;
//!
//! let changed = Signal::<i32>::new();
//! let id = changed.connect(|value| println!("now {value}"));
//! changed.emit(42);
//! changed.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifies a single signal/slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`]
    /// to remove that slot.
    pub struct ConnectionId;
}

type Slot<Args> = Box<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal with any number of connected slots.
///
/// `Signal<Args>` is `Send + Sync`; slots may be connected, emitted, and
/// disconnected from any thread. Use `()` for signals without an argument.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether emission is temporarily suppressed.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. It will be invoked on every subsequent emission until
    /// disconnected.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Box::new(slot))
    }

    /// Remove a connection. Returns `false` if the id was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Remove every connection.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// The number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Suppress or re-enable emission. While blocked, `emit` does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every connected slot with `args`, in the current thread.
    ///
    /// Slots run while the connection table is locked, so a slot must not
    /// connect to or disconnect from the same signal it is handling.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "reachwatch::signal", "signal blocked, skipping emit");
            return;
        }

        let connections = self.connections.lock();
        for (_, slot) in connections.iter() {
            slot(&args);
        }
    }
}
