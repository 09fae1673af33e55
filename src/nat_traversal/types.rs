/**
 * nat_traversal/types.rs
 *
 * Core types for NAT discovery
 */

use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// Public rendezvous servers tried in order when no server is configured
pub const STUN_SERVERS: &[&str] = &[
    "stun.ekiga.net",
    "stun.ideasip.com",
    "stun.voiparound.com",
    "stun.voipbuster.com",
    "stun.voipstunt.com",
    "stun.voxgratia.org",
];

pub const DEFAULT_STUN_PORT: u16 = 3478;
pub const DEFAULT_SOURCE_IP: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
pub const DEFAULT_SOURCE_PORT: u16 = 54320;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(200);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// NAT behavior classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NatType {
    Blocked,
    OpenInternet,
    FullCone,
    SymmetricUdpFirewall,
    RestrictedNat,
    RestrictedPortNat,
    SymmetricNat,
    /// Test I against the server's advertised alternate address went unanswered
    ChangedAddressError,
}

impl fmt::Display for NatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NatType::Blocked => "Blocked",
            NatType::OpenInternet => "Open Internet",
            NatType::FullCone => "Full Cone",
            NatType::SymmetricUdpFirewall => "Symmetric UDP Firewall",
            NatType::RestrictedNat => "Restricted NAT",
            NatType::RestrictedPortNat => "Restricted Port NAT",
            NatType::SymmetricNat => "Symmetric NAT",
            NatType::ChangedAddressError => "Error during Test I on changed IP and port",
        };
        f.write_str(s)
    }
}

/// Outcome of a single probe exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeResult {
    pub responded: bool,
    /// MAPPED-ADDRESS: our binding as seen by the server
    pub external_addr: Option<SocketAddrV4>,
    /// SOURCE-ADDRESS: where the server sent the response from
    pub source_addr: Option<SocketAddrV4>,
    /// CHANGED-ADDRESS: the server's alternate IP and port
    pub changed_addr: Option<SocketAddrV4>,
}

impl ProbeResult {
    pub fn no_response() -> Self {
        Self::default()
    }
}

/// Per-probe retransmission policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// How long to wait for a reply after each send
    pub attempt_timeout: Duration,
    /// Resends after the first attempt
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Which rendezvous server(s) Test I is run against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerSelection {
    /// A single explicitly configured host
    Host(String),
    /// Try each host in order until one answers
    Candidates(Vec<String>),
}

impl ServerSelection {
    pub fn hosts(&self) -> Vec<&str> {
        match self {
            ServerSelection::Host(host) => vec![host.as_str()],
            ServerSelection::Candidates(hosts) => hosts.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for ServerSelection {
    fn default() -> Self {
        ServerSelection::Candidates(STUN_SERVERS.iter().map(|s| s.to_string()).collect())
    }
}

/// NAT discovery configuration
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Local address to bind
    pub source_ip: Ipv4Addr,

    /// Local port to bind (0 for random)
    pub source_port: u16,

    /// Rendezvous server(s)
    pub server: ServerSelection,

    /// Rendezvous server port
    pub server_port: u16,

    /// Hard ceiling for the whole discovery run
    pub timeout: Duration,

    pub retry: RetryPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            source_ip: DEFAULT_SOURCE_IP,
            source_port: DEFAULT_SOURCE_PORT,
            server: ServerSelection::default(),
            server_port: DEFAULT_STUN_PORT,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of a completed discovery run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryResult {
    pub nat_type: NatType,
    pub external_ip: Option<IpAddr>,
    pub external_port: Option<u16>,
    /// Host that answered Test I, if any did
    pub server: Option<String>,
}
