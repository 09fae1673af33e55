/**
 * nat_traversal/stun.rs
 *
 * Single STUN binding exchange with retransmission
 */

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, trace, warn};

use super::message::{Attribute, Message, MessageError, MessageType};
use super::types::{ProbeResult, RetryPolicy};

/// Receive buffer size, large enough for any classic STUN response
const RECV_BUFFER_SIZE: usize = 2048;

/// Discovery errors
#[derive(Debug, Error)]
pub enum StunError {
    #[error(transparent)]
    Message(#[from] MessageError),

    #[error("socket error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("could not resolve {0}")]
    Resolve(String),

    #[error("discovery did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("invalid stream response: {0:?}")]
    InvalidStreamResponse(String),
}

/// Unreliable datagram transport a probe runs over
///
/// Implemented for `tokio::net::UdpSocket`. Tests substitute a scripted server.
pub trait DatagramTransport {
    fn send_to(
        &self,
        buf: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send;

    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send;
}

impl DatagramTransport for UdpSocket {
    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target).await
    }

    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        UdpSocket::recv_from(self, buf).await
    }
}

/// Resolve a server host to its first IPv4 socket address
pub(crate) async fn resolve(host: &str, port: u16) -> Option<SocketAddr> {
    match tokio::net::lookup_host((host, port)).await {
        Ok(mut addrs) => addrs.find(SocketAddr::is_ipv4),
        Err(e) => {
            debug!("Failed to resolve {}: {}", host, e);
            None
        }
    }
}

/// Run one binding test against `host:port`
///
/// Unresolvable hosts and exhausted retries both come back as a
/// non-responding result. Datagrams that are not a binding response to this
/// request restart the send cycle, so the caller must enforce a deadline.
pub async fn stun_test<T: DatagramTransport>(
    transport: &T,
    host: &str,
    port: u16,
    attributes: Vec<Attribute>,
    retry: &RetryPolicy,
) -> Result<ProbeResult, StunError> {
    let request = Message::binding_request(attributes);
    let data = request.encode()?;

    let Some(target) = resolve(host, port).await else {
        warn!("Could not resolve STUN host {}", host);
        return Ok(ProbeResult::no_response());
    };

    let mut buffer = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        let Some(len) = exchange(transport, &data, target, &mut buffer, retry).await? else {
            debug!(
                "No response from {} after {} attempts",
                target,
                retry.max_retries + 1
            );
            return Ok(ProbeResult::no_response());
        };

        let response = Message::decode(&buffer[..len])?;

        if response.message_type != MessageType::BindResponse {
            debug!(
                "Ignoring {} while waiting for {}",
                response.message_type.name(),
                request.transaction_id
            );
            continue;
        }
        if response.transaction_id != request.transaction_id {
            debug!(
                "Ignoring response for {} while waiting for {}",
                response.transaction_id, request.transaction_id
            );
            continue;
        }

        return Ok(ProbeResult {
            responded: true,
            external_addr: response.mapped_address(),
            source_addr: response.source_address(),
            changed_addr: response.changed_address(),
        });
    }
}

/// Send `data` and wait for any datagram, resending on each local timeout
///
/// Returns the received length, or `None` once every attempt timed out.
async fn exchange<T: DatagramTransport>(
    transport: &T,
    data: &[u8],
    target: SocketAddr,
    buffer: &mut [u8],
    retry: &RetryPolicy,
) -> Result<Option<usize>, StunError> {
    for attempt in 0..=retry.max_retries {
        trace!("sendto: {} (attempt {})", target, attempt + 1);
        transport.send_to(data, target).await?;

        match tokio::time::timeout(retry.attempt_timeout, transport.recv_from(buffer)).await {
            Ok(Ok((len, from))) => {
                debug!("recvfrom: {}", from);
                return Ok(Some(len));
            }
            // ICMP errors surface here on some platforms, treat them like silence
            Ok(Err(e)) => debug!("Receive from {} failed: {}", target, e),
            Err(_) => trace!("No reply from {} within {:?}", target, retry.attempt_timeout),
        }
    }

    Ok(None)
}
