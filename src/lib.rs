//! Host and network reachability monitoring.
//!
//! This crate answers one question continuously: is a given target — the
//! default route, a domain name, or a socket address — currently reachable,
//! and over what transport class (none, cellular-class WAN, or a local-area
//! link)? Client applications use the answer to adapt retry policy, gate
//! features, or show connectivity banners.
//!
//! It is *not* a prober: no packets are sent and no latency or bandwidth is
//! measured. A reachable status means a route class exists, not that the
//! target is actually servable.
//!
//! # Monitoring
//!
//! ```ignore
//! use reachwatch::{ReachabilityMonitor, ReachabilityStatus};
//!
//! let monitor = ReachabilityMonitor::for_domain("api.example.com")?;
//! monitor.set_status_change_callback(|status| match status {
//!     ReachabilityStatus::ReachableViaWan => println!("on cellular, go easy"),
//!     ReachabilityStatus::ReachableViaLocalNetwork => println!("on wifi/ethernet"),
//!     _ => println!("offline"),
//! });
//! monitor.start_monitoring()?;
//! ```
//!
//! # The shared monitor and the broadcast signal
//!
//! The process-wide default-route monitor lives in [`registry::shared`].
//! Components that only want to observe transitions subscribe to the
//! broadcast signal without holding any monitor reference:
//!
//! ```ignore
//! use reachwatch::registry;
//!
//! registry::status_changed().connect(|change| {
//!     println!("{} is now {}", change.target, change.status);
//! });
//! registry::shared().start_monitoring()?;
//! ```
//!
//! # Polling
//!
//! Subscribing is optional. [`ReachabilityMonitor::current_status`] is a
//! lock-free read, so callers may poll instead; transitions still update the
//! stored status silently when no callback is registered.
//!
//! # Logging
//!
//! Instrumented with `tracing` under the `reachwatch::*` targets; install a
//! subscriber (for example `tracing_subscriber::fmt::init()`) to see
//! transition logs.

pub mod error;
pub mod flags;
pub mod monitor;
pub mod registry;
pub mod signal;
pub mod source;
pub mod status;
pub mod target;

pub use error::{ReachabilityError, Result};
pub use flags::{ReachabilityFlags, classify};
pub use monitor::ReachabilityMonitor;
pub use registry::{STATUS_CHANGED_EVENT, StatusChange};
pub use signal::{ConnectionId, Signal};
pub use source::{ChangeCallback, FlagSource, SystemFlagSource, WatchToken};
pub use status::ReachabilityStatus;
pub use target::Target;
