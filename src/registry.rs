//! Process-wide reachability state.
//!
//! The registry holds three pieces of global state:
//!
//! - the shared default-route monitor, created lazily and at most once,
//! - the last-known status per target, readable without a monitor handle,
//! - the process-wide [`status_changed`] broadcast signal that every monitor
//!   publishes its transitions to.
//!
//! Entries in the status map live for the lifetime of the process; monitors
//! are expected to be long-lived, not churned.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::monitor::ReachabilityMonitor;
use crate::signal::Signal;
use crate::status::ReachabilityStatus;
use crate::target::Target;

/// The name identifying the process-wide status-change broadcast.
///
/// Distinct from every other event name in the process; useful when bridging
/// the [`status_changed`] signal onto an external event system.
pub const STATUS_CHANGED_EVENT: &str = "reachwatch.status-changed";

/// Payload of the [`status_changed`] broadcast.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The target whose status changed.
    pub target: Target,
    /// The new status, one per accepted transition.
    pub status: ReachabilityStatus,
}

static SHARED_MONITOR: OnceLock<ReachabilityMonitor> = OnceLock::new();
static STATUS_CHANGED: OnceLock<Signal<StatusChange>> = OnceLock::new();
static LAST_STATUS: OnceLock<Mutex<HashMap<Target, ReachabilityStatus>>> = OnceLock::new();

/// The shared default-route monitor.
///
/// Constructed on first access, bound to [`Target::DefaultRoute`]; every
/// caller observes the same instance, including under concurrent first
/// access. The shared monitor is not started automatically.
pub fn shared() -> &'static ReachabilityMonitor {
    SHARED_MONITOR.get_or_init(|| {
        tracing::debug!(target: "reachwatch::registry", "creating shared default-route monitor");
        ReachabilityMonitor::new()
    })
}

/// The process-wide broadcast signal for status transitions.
///
/// Every monitor emits a [`StatusChange`] here for each accepted transition,
/// after its own callback has run. Listeners subscribe without holding any
/// monitor reference; slots run on the emitting monitor's delivery context.
pub fn status_changed() -> &'static Signal<StatusChange> {
    STATUS_CHANGED.get_or_init(Signal::new)
}

/// The last-known status for a target, or `Unknown` if that target has never
/// been classified in this process.
pub fn last_status(target: &Target) -> ReachabilityStatus {
    status_map()
        .lock()
        .get(target)
        .copied()
        .unwrap_or(ReachabilityStatus::Unknown)
}

/// Record a classified status. Called only from a monitor's own
/// classification step.
pub(crate) fn record_status(target: &Target, status: ReachabilityStatus) {
    status_map().lock().insert(target.clone(), status);
}

fn status_map() -> &'static Mutex<HashMap<Target, ReachabilityStatus>> {
    LAST_STATUS.get_or_init(|| Mutex::new(HashMap::new()))
}
