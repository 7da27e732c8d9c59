//! Reachability monitoring.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI8, Ordering};

use parking_lot::Mutex;

use crate::error::Result;
use crate::flags::{ReachabilityFlags, classify};
use crate::registry;
use crate::registry::StatusChange;
use crate::source::{FlagSource, SystemFlagSource, WatchToken};
use crate::status::ReachabilityStatus;
use crate::target::Target;

type StatusCallback = Box<dyn Fn(ReachabilityStatus) + Send + Sync>;

/// Watches the reachability of a single target and reports transitions.
///
/// A monitor owns one [`Target`] and one flag source bound to it. While
/// running, every connectivity change from the source is classified into a
/// [`ReachabilityStatus`]; when the classification differs from the stored
/// status, the transition is recorded in the registry and fanned out to the
/// per-instance callback and the process-wide
/// [`registry::status_changed`] signal. Consecutive events that classify to
/// the same status collapse to a single delivery.
///
/// Ad-hoc monitors created here are owned by their creator; the
/// process-wide shared monitor lives in [`registry::shared`].
///
/// # Example
///
/// ```ignore
/// use reachwatch::{ReachabilityMonitor, ReachabilityStatus};
///
/// let monitor = ReachabilityMonitor::for_domain("example.com")?;
/// monitor.set_status_change_callback(|status| {
///     println!("example.com is now: {status}");
/// });
/// monitor.start_monitoring()?;
///
/// // Poll without blocking, whenever convenient:
/// if monitor.is_reachable_via_wan() {
///     // defer large transfers
/// }
/// ```
///
/// # Threading
///
/// Callback and broadcast delivery happen on the flag source's background
/// context, never on the thread that called
/// [`start_monitoring`](Self::start_monitoring). Delivery runs under the
/// monitor's state lock so that [`stop_monitoring`](Self::stop_monitoring)
/// can drain in-flight deliveries before returning; consequently a callback
/// must not call `start_monitoring` or `stop_monitoring` on its own monitor.
/// Reading [`current_status`](Self::current_status) from a callback is fine.
pub struct ReachabilityMonitor {
    source: Arc<dyn FlagSource>,
    shared: Arc<Shared>,
}

/// State shared between the monitor and its subscription closure.
struct Shared {
    target: Target,
    /// Last classified status; read lock-free by `current_status`.
    status: AtomicI8,
    inner: Mutex<MonitorInner>,
}

struct MonitorInner {
    is_running: bool,
    callback: Option<StatusCallback>,
    /// Held while running; dropping it cancels delivery.
    watch_token: Option<WatchToken>,
}

impl ReachabilityMonitor {
    /// A monitor for general internet reachability via the default route.
    pub fn new() -> Self {
        Self::from_source(Arc::new(SystemFlagSource::default_route()))
    }

    /// A monitor for the given hostname.
    ///
    /// The hostname is resolved synchronously during construction; an
    /// unresolvable name yields [`crate::ReachabilityError::Resolution`] and
    /// no monitor.
    pub fn for_domain(domain: &str) -> Result<Self> {
        Ok(Self::from_source(Arc::new(SystemFlagSource::for_domain(
            domain,
        )?)))
    }

    /// A monitor for the given socket address.
    pub fn for_address(address: SocketAddr) -> Self {
        Self::from_source(Arc::new(SystemFlagSource::for_address(address)))
    }

    /// Wrap an externally supplied flag source.
    ///
    /// The monitor takes over the subscription lifecycle: it subscribes on
    /// [`start_monitoring`](Self::start_monitoring) and releases the
    /// subscription on [`stop_monitoring`](Self::stop_monitoring) or drop.
    pub fn from_source(source: Arc<dyn FlagSource>) -> Self {
        let target = source.target();
        Self {
            source,
            shared: Arc::new(Shared {
                target,
                status: AtomicI8::new(ReachabilityStatus::Unknown.as_raw()),
                inner: Mutex::new(MonitorInner {
                    is_running: false,
                    callback: None,
                    watch_token: None,
                }),
            }),
        }
    }

    /// The target this monitor is bound to.
    pub fn target(&self) -> &Target {
        &self.shared.target
    }

    /// The last classified status. Never blocks.
    pub fn current_status(&self) -> ReachabilityStatus {
        ReachabilityStatus::from_raw(self.shared.status.load(Ordering::SeqCst))
    }

    /// Whether the target is currently reachable over any transport.
    pub fn is_reachable(&self) -> bool {
        self.current_status().is_reachable()
    }

    /// Whether the target is currently reachable over a cellular-class WAN.
    pub fn is_reachable_via_wan(&self) -> bool {
        self.current_status() == ReachabilityStatus::ReachableViaWan
    }

    /// Whether the target is currently reachable over a local-area link.
    pub fn is_reachable_via_local_network(&self) -> bool {
        self.current_status() == ReachabilityStatus::ReachableViaLocalNetwork
    }

    /// Whether the monitor is currently subscribed to its flag source.
    pub fn is_running(&self) -> bool {
        self.shared.inner.lock().is_running
    }

    /// A human-readable label for the current status.
    pub fn status_description(&self) -> &'static str {
        self.current_status().description()
    }

    /// Begin monitoring for reachability changes.
    ///
    /// Subscribes to the flag source and then classifies the source's
    /// current flags once, synchronously, so a fresh monitor does not sit in
    /// `Unknown` until the first external event fires. That initial
    /// classification counts as a transition and is fanned out like any
    /// other.
    ///
    /// Idempotent: calling this on a running monitor is a no-op and does not
    /// double-subscribe.
    pub fn start_monitoring(&self) -> Result<()> {
        let mut inner = self.shared.inner.lock();
        if inner.is_running {
            tracing::trace!(target: "reachwatch::monitor", target_name = %self.shared.target, "already monitoring");
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let token = self
            .source
            .subscribe(Box::new(move |flags| shared.apply_flags(flags)))?;
        inner.watch_token = Some(token);
        inner.is_running = true;
        tracing::debug!(target: "reachwatch::monitor", target_name = %self.shared.target, "monitoring started");

        // Initial synchronous classification, still under the state lock so
        // the first background event cannot interleave with it.
        let flags = self.source.current_flags();
        self.shared.apply_flags_locked(&mut inner, flags);
        Ok(())
    }

    /// Stop monitoring.
    ///
    /// After this returns, no further callback or broadcast fires for this
    /// monitor; an in-flight delivery is drained first. The last status is
    /// frozen but remains readable through
    /// [`current_status`](Self::current_status). Idempotent; call
    /// [`start_monitoring`](Self::start_monitoring) again to resume.
    pub fn stop_monitoring(&self) {
        let token = {
            let mut inner = self.shared.inner.lock();
            if !inner.is_running {
                return;
            }
            inner.is_running = false;
            inner.watch_token.take()
        };
        // Released outside the state lock: tearing down a platform watcher
        // can join its delivery thread, and that thread may be waiting on
        // the lock. It will observe `is_running == false` and bail.
        drop(token);
        tracing::debug!(target: "reachwatch::monitor", target_name = %self.shared.target, "monitoring stopped");
    }

    /// Replace the status-change callback.
    ///
    /// At most one callback is active per monitor; the latest registration
    /// wins. Register a no-op closure to effectively clear it. The callback
    /// runs on the flag source's delivery context.
    pub fn set_status_change_callback<F>(&self, callback: F)
    where
        F: Fn(ReachabilityStatus) + Send + Sync + 'static,
    {
        self.shared.inner.lock().callback = Some(Box::new(callback));
    }
}

impl Default for ReachabilityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}

impl Shared {
    /// Entry point for background flag-change events.
    fn apply_flags(&self, flags: ReachabilityFlags) {
        let mut inner = self.inner.lock();
        self.apply_flags_locked(&mut inner, flags);
    }

    /// Classify `flags` and, on a status transition, record and fan out.
    ///
    /// Runs with the state lock held: `stop_monitoring` takes the same lock,
    /// so once it returns no delivery can still be in flight.
    fn apply_flags_locked(&self, inner: &mut MonitorInner, flags: ReachabilityFlags) {
        if !inner.is_running {
            tracing::trace!(target: "reachwatch::monitor", target_name = %self.target, "event after stop, dropping");
            return;
        }

        let new_status = classify(flags);
        let previous = ReachabilityStatus::from_raw(self.status.load(Ordering::SeqCst));
        if new_status == previous {
            tracing::trace!(
                target: "reachwatch::monitor",
                target_name = %self.target,
                status = %new_status,
                "status unchanged, deduplicated"
            );
            return;
        }

        self.status.store(new_status.as_raw(), Ordering::SeqCst);
        registry::record_status(&self.target, new_status);
        tracing::debug!(
            target: "reachwatch::monitor",
            target_name = %self.target,
            ?flags,
            from = %previous,
            to = %new_status,
            "reachability transition"
        );

        if let Some(callback) = inner.callback.as_ref() {
            callback(new_status);
        }
        registry::status_changed().emit(StatusChange {
            target: self.target.clone(),
            status: new_status,
        });
    }
}
