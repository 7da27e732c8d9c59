//! Flag sources: the seam to the platform reachability primitive.
//!
//! A [`FlagSource`] supplies raw connectivity flags for one target: a
//! queryable snapshot plus a subscription that delivers a fresh flag set on
//! every connectivity change, from a background context. The monitor owns the
//! subscription through a [`WatchToken`]; dropping the token cancels delivery.
//!
//! [`SystemFlagSource`] is the production implementation, deriving flags from
//! the platform interface table. Tests substitute their own `FlagSource` to
//! drive the monitor with arbitrary flag patterns.

use std::any::Any;
use std::net::SocketAddr;

use crate::error::{ReachabilityError, Result};
use crate::flags::ReachabilityFlags;
use crate::target::Target;

/// Callback invoked with a fresh flag set on every connectivity change.
pub type ChangeCallback = Box<dyn Fn(ReachabilityFlags) + Send + Sync + 'static>;

/// Keeps a flag-change subscription alive.
///
/// Dropping the token cancels delivery; the wrapped guard (for example a
/// platform watcher handle) is released with it.
pub struct WatchToken {
    _guard: Box<dyn Any + Send>,
}

impl WatchToken {
    /// Wrap a guard object whose `Drop` tears down the subscription.
    pub fn new<G: Any + Send>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// A provider of raw connectivity flags for a single target.
///
/// Implementations must deliver change callbacks from a background context,
/// never from the thread that called [`subscribe`](Self::subscribe).
pub trait FlagSource: Send + Sync {
    /// The target this source is bound to.
    fn target(&self) -> Target;

    /// The current flag snapshot, queried synchronously.
    fn current_flags(&self) -> ReachabilityFlags;

    /// Begin delivering flag changes to `on_change`.
    ///
    /// Delivery stops when the returned token is dropped.
    fn subscribe(&self, on_change: ChangeCallback) -> Result<WatchToken>;
}

/// Flag source backed by the platform interface table.
///
/// Snapshots come from `netdev`; change notification uses the
/// platform-native watchers behind `netwatcher`. Domain-bound sources
/// resolve their hostname at construction and fail if resolution fails.
pub struct SystemFlagSource {
    target: Target,
}

impl SystemFlagSource {
    /// A source watching general internet reachability via the default route.
    pub fn default_route() -> Self {
        Self {
            target: Target::DefaultRoute,
        }
    }

    /// A source bound to a hostname.
    ///
    /// Resolution happens here, synchronously; an unresolvable name is a
    /// construction error and no source is produced.
    pub fn for_domain(domain: &str) -> Result<Self> {
        let addresses = dns_lookup::lookup_host(domain).map_err(|e| {
            ReachabilityError::Resolution {
                hostname: domain.to_string(),
                message: e.to_string(),
            }
        })?;
        if addresses.is_empty() {
            return Err(ReachabilityError::Resolution {
                hostname: domain.to_string(),
                message: "no addresses returned".to_string(),
            });
        }
        tracing::debug!(
            target: "reachwatch::source",
            domain,
            address_count = addresses.len(),
            "resolved domain for reachability source"
        );
        Ok(Self {
            target: Target::Domain(domain.to_string()),
        })
    }

    /// A source bound to a socket address.
    pub fn for_address(address: SocketAddr) -> Self {
        Self {
            target: Target::Address(address),
        }
    }
}

impl FlagSource for SystemFlagSource {
    fn target(&self) -> Target {
        self.target.clone()
    }

    fn current_flags(&self) -> ReachabilityFlags {
        compute_flags(&self.target)
    }

    fn subscribe(&self, on_change: ChangeCallback) -> Result<WatchToken> {
        let target = self.target.clone();
        let handle = netwatcher::watch_interfaces(move |_update| {
            // Any interface change can alter the route class; recompute the
            // whole flag set rather than interpreting the diff.
            on_change(compute_flags(&target));
        })
        .map_err(|e| ReachabilityError::Watch(e.to_string()))?;

        tracing::debug!(target: "reachwatch::source", target_name = %self.target, "interface watcher started");
        Ok(WatchToken::new(handle))
    }
}

/// Derive the flag set for a target from the current interface table.
fn compute_flags(target: &Target) -> ReachabilityFlags {
    if let Target::Address(addr) = target {
        if addr.ip().is_loopback() {
            return loopback_flags();
        }
    }

    let mut flags = ReachabilityFlags::empty();
    if has_active_link() {
        flags |= ReachabilityFlags::REACHABLE;
        if default_interface_is_wan() {
            flags |= ReachabilityFlags::IS_WWAN;
        }
    }
    flags
}

/// Whether at least one non-loopback interface is up with an address
/// assigned.
fn has_active_link() -> bool {
    netdev::get_interfaces()
        .iter()
        .any(|iface| iface.is_up() && !iface.is_loopback() && has_addresses(iface))
}

/// Whether the default route goes over a mobile-broadband interface.
fn default_interface_is_wan() -> bool {
    match netdev::get_default_interface() {
        Ok(iface) => matches!(
            iface.if_type,
            netdev::interface::InterfaceType::Wwanpp | netdev::interface::InterfaceType::Wwanpp2
        ),
        Err(_) => false,
    }
}

/// Flags for a loopback-bound target: reachable, local, and gateway-free
/// whenever the loopback interface itself is up.
fn loopback_flags() -> ReachabilityFlags {
    let loopback_up = netdev::get_interfaces()
        .iter()
        .any(|iface| iface.is_loopback() && iface.is_up());
    if loopback_up {
        ReachabilityFlags::REACHABLE
            | ReachabilityFlags::IS_LOCAL_ADDRESS
            | ReachabilityFlags::IS_DIRECT
    } else {
        ReachabilityFlags::empty()
    }
}

fn has_addresses(iface: &netdev::Interface) -> bool {
    !iface.ipv4.is_empty() || !iface.ipv6.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route_source_target() {
        let source = SystemFlagSource::default_route();
        assert_eq!(source.target(), Target::DefaultRoute);
    }

    #[test]
    fn test_address_source_target() {
        let addr: SocketAddr = "192.0.2.1:443".parse().unwrap();
        let source = SystemFlagSource::for_address(addr);
        assert_eq!(source.target(), Target::Address(addr));
    }

    #[test]
    fn test_unresolvable_domain_is_a_construction_error() {
        // Reserved TLD per RFC 2606; resolution must fail everywhere.
        let result = SystemFlagSource::for_domain("unresolvable.invalid");
        assert!(matches!(
            result,
            Err(ReachabilityError::Resolution { .. })
        ));
    }

    #[test]
    fn test_current_flags_does_not_panic() {
        // Actual flag content depends on the host environment.
        let source = SystemFlagSource::default_route();
        let _ = source.current_flags();
    }
}
