/**
 * nat_traversal/mod.rs
 *
 * NAT discovery module implementing:
 * - Classic STUN message codec
 * - Binding probes with retransmission
 * - NAT type classification
 * - TCP external address lookup
 */

mod classifier;
mod message;
mod stun;
mod transaction;
mod types;

pub use classifier::{get_nat_type, Classification};
pub use message::{Attribute, AttributeType, Message, MessageError, MessageType, HEADER_SIZE};
pub use stun::{stun_test, DatagramTransport, StunError};
pub use transaction::{TransactionId, TRANSACTION_ID_LEN};
pub use types::{
    DiscoveryConfig, DiscoveryResult, NatType, ProbeResult, RetryPolicy, ServerSelection,
    DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_RETRIES, DEFAULT_SOURCE_IP, DEFAULT_SOURCE_PORT,
    DEFAULT_STUN_PORT, DEFAULT_TIMEOUT, STUN_SERVERS,
};

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::{TcpSocket, UdpSocket};
use tracing::{debug, info};

/// Upper bound on the stream server's `"<ip> <port>"` line
const MAX_STREAM_LINE: u64 = 128;

/// Discover the external mapping and classify the NAT in front of this host
///
/// The whole classification runs under `config.timeout`. On expiry the
/// in-flight probe is dropped and `StunError::DeadlineExceeded` is returned,
/// however far the classification had got.
pub async fn discover(config: &DiscoveryConfig) -> Result<DiscoveryResult, StunError> {
    let socket = bind_udp(config.source_ip, config.source_port)?;
    info!("Starting NAT discovery from {}", socket.local_addr()?);

    let run = get_nat_type(
        &socket,
        IpAddr::V4(config.source_ip),
        &config.server,
        config.server_port,
        &config.retry,
    );

    let classification = tokio::time::timeout(config.timeout, run)
        .await
        .map_err(|_| StunError::DeadlineExceeded(config.timeout))??;

    let external = classification.initial.external_addr;
    info!("NAT type: {}", classification.nat_type);
    if let Some(addr) = external {
        info!("External address: {}", addr);
    }

    Ok(DiscoveryResult {
        nat_type: classification.nat_type,
        external_ip: external.map(|a| IpAddr::V4(*a.ip())),
        external_port: external.map(|a| a.port()),
        server: classification.server,
    })
}

/// Bind the discovery socket with SO_REUSEADDR
fn bind_udp(ip: Ipv4Addr, port: u16) -> Result<UdpSocket, StunError> {
    let addr = SocketAddr::from((ip, port));
    let bind_err = |source| StunError::Bind { addr, source };

    let socket = socket2::Socket::new(
        socket2::Domain::IPV4,
        socket2::Type::DGRAM,
        Some(socket2::Protocol::UDP),
    )
    .map_err(bind_err)?;

    socket.set_reuse_address(true).map_err(bind_err)?;
    socket.bind(&addr.into()).map_err(bind_err)?;
    socket.set_nonblocking(true).map_err(bind_err)?;

    UdpSocket::from_std(socket.into()).map_err(bind_err)
}

/// Look up the external address over TCP
///
/// The server speaks first with a single line `"<ip> <port>"`. Nothing is
/// sent and no classification is done.
pub async fn discover_via_stream(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<(IpAddr, u16), StunError> {
    let lookup = async {
        let target = stun::resolve(host, port)
            .await
            .ok_or_else(|| StunError::Resolve(host.to_string()))?;

        let socket = TcpSocket::new_v4()?;
        socket.set_reuseaddr(true)?;
        let stream = socket.connect(target).await?;
        debug!("Connected to {}", target);

        let mut line = String::new();
        BufReader::new(stream.take(MAX_STREAM_LINE))
            .read_line(&mut line)
            .await?;
        parse_endpoint(&line)
    };

    tokio::time::timeout(timeout, lookup)
        .await
        .map_err(|_| StunError::DeadlineExceeded(timeout))?
}

fn parse_endpoint(line: &str) -> Result<(IpAddr, u16), StunError> {
    let invalid = || StunError::InvalidStreamResponse(line.trim().to_string());

    let mut parts = line.split_whitespace();
    let (Some(ip), Some(port)) = (parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let ip = ip.parse().map_err(|_| invalid())?;
    let port = port.parse().map_err(|_| invalid())?;
    Ok((ip, port))
}
