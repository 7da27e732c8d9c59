//! Monitoring targets.

use std::fmt;
use std::net::SocketAddr;

/// The thing a monitor watches.
///
/// Exactly one target is bound per monitor instance and it is immutable
/// after construction. Targets are also the registry key under which the
/// last-known status is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// General internet reachability via the default route.
    DefaultRoute,
    /// A specific hostname.
    Domain(String),
    /// A specific socket address.
    Address(SocketAddr),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultRoute => f.write_str("default route"),
            Self::Domain(name) => f.write_str(name),
            Self::Address(addr) => write!(f, "{addr}"),
        }
    }
}
