//! Raw connectivity flags and the flag classifier.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::status::ReachabilityStatus;

/// A bitset of raw connectivity flags reported by a flag source.
///
/// The bit layout is fixed so that externally supplied sources and test
/// fixtures can construct arbitrary patterns via [`ReachabilityFlags::from_bits`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReachabilityFlags(u32);

impl ReachabilityFlags {
    /// The link is transient (for example a PPP-style dial-up association).
    pub const TRANSIENT_CONNECTION: Self = Self(1 << 0);
    /// A route to the target exists.
    pub const REACHABLE: Self = Self(1 << 1);
    /// Traffic can only flow after a connection is first established.
    pub const CONNECTION_REQUIRED: Self = Self(1 << 2);
    /// A required connection is established automatically when traffic is sent.
    pub const CONNECTION_ON_TRAFFIC: Self = Self(1 << 3);
    /// Establishing the required connection needs user intervention.
    pub const INTERVENTION_REQUIRED: Self = Self(1 << 4);
    /// A required connection is established on demand by the platform.
    pub const CONNECTION_ON_DEMAND: Self = Self(1 << 5);
    /// The target address is bound to a local interface.
    pub const IS_LOCAL_ADDRESS: Self = Self(1 << 16);
    /// Traffic reaches the target without passing through a gateway.
    pub const IS_DIRECT: Self = Self(1 << 17);
    /// The route goes over a cellular-class WAN interface.
    pub const IS_WWAN: Self = Self(1 << 18);

    /// The empty flag set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Build a flag set from raw bits. Unknown bits are preserved; the
    /// classifier ignores them.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bit representation.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit in `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ReachabilityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ReachabilityFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ReachabilityFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ReachabilityFlags, &str); 9] = [
            (ReachabilityFlags::TRANSIENT_CONNECTION, "TRANSIENT_CONNECTION"),
            (ReachabilityFlags::REACHABLE, "REACHABLE"),
            (ReachabilityFlags::CONNECTION_REQUIRED, "CONNECTION_REQUIRED"),
            (ReachabilityFlags::CONNECTION_ON_TRAFFIC, "CONNECTION_ON_TRAFFIC"),
            (ReachabilityFlags::INTERVENTION_REQUIRED, "INTERVENTION_REQUIRED"),
            (ReachabilityFlags::CONNECTION_ON_DEMAND, "CONNECTION_ON_DEMAND"),
            (ReachabilityFlags::IS_LOCAL_ADDRESS, "IS_LOCAL_ADDRESS"),
            (ReachabilityFlags::IS_DIRECT, "IS_DIRECT"),
            (ReachabilityFlags::IS_WWAN, "IS_WWAN"),
        ];

        if self.is_empty() {
            return f.write_str("ReachabilityFlags(empty)");
        }

        write!(f, "ReachabilityFlags(")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        write!(f, ")")
    }
}

/// Classify a raw flag set into a [`ReachabilityStatus`].
///
/// Pure and total: every bit pattern maps to exactly one status.
///
/// A target is considered reachable when a route exists and either no
/// connection establishment is required, or the platform can establish it
/// automatically (on demand or on first traffic) without user intervention.
/// Reachable targets classify as `ReachableViaLocalNetwork` unless the route
/// goes over a WAN interface; when both WAN and local-network indicators are
/// present, WAN wins so that cost- and bandwidth-sensitive callers assume the
/// more constrained transport.
pub fn classify(flags: ReachabilityFlags) -> ReachabilityStatus {
    let has_route = flags.contains(ReachabilityFlags::REACHABLE);
    let needs_connection = flags.contains(ReachabilityFlags::CONNECTION_REQUIRED);
    let connects_automatically = flags.contains(ReachabilityFlags::CONNECTION_ON_DEMAND)
        || flags.contains(ReachabilityFlags::CONNECTION_ON_TRAFFIC);
    let without_intervention =
        connects_automatically && !flags.contains(ReachabilityFlags::INTERVENTION_REQUIRED);

    if !has_route || (needs_connection && !without_intervention) {
        return ReachabilityStatus::NotReachable;
    }

    if flags.contains(ReachabilityFlags::IS_WWAN) {
        ReachabilityStatus::ReachableViaWan
    } else {
        ReachabilityStatus::ReachableViaLocalNetwork
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flags_not_reachable() {
        assert_eq!(
            classify(ReachabilityFlags::empty()),
            ReachabilityStatus::NotReachable
        );
    }

    #[test]
    fn test_reachable_defaults_to_local_network() {
        assert_eq!(
            classify(ReachabilityFlags::REACHABLE),
            ReachabilityStatus::ReachableViaLocalNetwork
        );
    }

    #[test]
    fn test_wan_precedence_over_local_indicators() {
        // WAN plus the local-address/direct indicators still classifies as WAN.
        let flags = ReachabilityFlags::REACHABLE
            | ReachabilityFlags::IS_WWAN
            | ReachabilityFlags::IS_LOCAL_ADDRESS
            | ReachabilityFlags::IS_DIRECT;
        assert_eq!(classify(flags), ReachabilityStatus::ReachableViaWan);
    }

    #[test]
    fn test_connection_required_without_automatic_establishment() {
        let flags = ReachabilityFlags::REACHABLE | ReachabilityFlags::CONNECTION_REQUIRED;
        assert_eq!(classify(flags), ReachabilityStatus::NotReachable);
    }

    #[test]
    fn test_connection_on_demand_is_reachable() {
        let flags = ReachabilityFlags::REACHABLE
            | ReachabilityFlags::CONNECTION_REQUIRED
            | ReachabilityFlags::CONNECTION_ON_DEMAND;
        assert_eq!(
            classify(flags),
            ReachabilityStatus::ReachableViaLocalNetwork
        );
    }

    #[test]
    fn test_connection_on_traffic_is_reachable() {
        let flags = ReachabilityFlags::REACHABLE
            | ReachabilityFlags::CONNECTION_REQUIRED
            | ReachabilityFlags::CONNECTION_ON_TRAFFIC;
        assert_eq!(
            classify(flags),
            ReachabilityStatus::ReachableViaLocalNetwork
        );
    }

    #[test]
    fn test_intervention_required_blocks_automatic_establishment() {
        let flags = ReachabilityFlags::REACHABLE
            | ReachabilityFlags::CONNECTION_REQUIRED
            | ReachabilityFlags::CONNECTION_ON_TRAFFIC
            | ReachabilityFlags::INTERVENTION_REQUIRED;
        assert_eq!(classify(flags), ReachabilityStatus::NotReachable);
    }

    #[test]
    fn test_wwan_without_route_is_not_reachable() {
        assert_eq!(
            classify(ReachabilityFlags::IS_WWAN),
            ReachabilityStatus::NotReachable
        );
    }

    #[test]
    fn test_totality_over_low_bit_patterns() {
        // Exhaustive over the connection-establishment bits; every pattern
        // must map to exactly one defined status, never Unknown.
        for bits in 0u32..(1 << 6) {
            let status = classify(ReachabilityFlags::from_bits(bits));
            assert_ne!(status, ReachabilityStatus::Unknown, "bits {bits:#b}");
        }
        // Unknown high bits are ignored rather than rejected.
        let noisy = ReachabilityFlags::from_bits(ReachabilityFlags::REACHABLE.bits() | 0xF000_0000);
        assert_eq!(
            classify(noisy),
            ReachabilityStatus::ReachableViaLocalNetwork
        );
    }

    #[test]
    fn test_flags_debug_lists_set_bits() {
        let flags = ReachabilityFlags::REACHABLE | ReachabilityFlags::IS_WWAN;
        let rendered = format!("{flags:?}");
        assert!(rendered.contains("REACHABLE"));
        assert!(rendered.contains("IS_WWAN"));
        assert_eq!(
            format!("{:?}", ReachabilityFlags::empty()),
            "ReachabilityFlags(empty)"
        );
    }
}
