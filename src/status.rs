//! Reachability status classification.

/// The reachability classification for a monitored target.
///
/// This is a nominal classification, not an ordered scale: `ReachableViaWan`
/// is not "less reachable" than `ReachableViaLocalNetwork`, it names a
/// different transport class (cellular-style metered WAN versus a local-area
/// link such as Ethernet or Wi-Fi).
///
/// `Unknown` is the only value a monitor reports before its first
/// classification.
///
/// The discriminants are stable and part of the public contract; they are
/// the integer representation carried by broadcast payloads and used for
/// atomic storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum ReachabilityStatus {
    /// No classification has been performed yet.
    Unknown = -1,
    /// The target cannot be reached.
    NotReachable = 0,
    /// The target is reachable over a cellular-class WAN link.
    ReachableViaWan = 1,
    /// The target is reachable over a local-area link (Ethernet, Wi-Fi).
    ReachableViaLocalNetwork = 2,
}

impl ReachabilityStatus {
    /// Whether this status counts as reachable.
    pub fn is_reachable(self) -> bool {
        matches!(
            self,
            Self::ReachableViaWan | Self::ReachableViaLocalNetwork
        )
    }

    /// The stable integer representation of this status.
    pub fn as_raw(self) -> i8 {
        self as i8
    }

    /// Reconstruct a status from its integer representation.
    ///
    /// Values outside the defined set map to `Unknown`.
    pub fn from_raw(raw: i8) -> Self {
        match raw {
            0 => Self::NotReachable,
            1 => Self::ReachableViaWan,
            2 => Self::ReachableViaLocalNetwork,
            _ => Self::Unknown,
        }
    }

    /// A human-readable label for this status.
    ///
    /// Total: every status value has a defined label.
    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::NotReachable => "Not Reachable",
            Self::ReachableViaWan => "Reachable via WAN",
            Self::ReachableViaLocalNetwork => "Reachable via Local Network",
        }
    }
}

impl std::fmt::Display for ReachabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
