/**
 * nat_traversal/classifier.rs
 *
 * NAT type classification (RFC 3489 section 10.1)
 *
 * Test I:   plain binding request
 * Test II:  binding request asking for a reply from another IP and port
 * Test III: binding request asking for a reply from another port only
 */

use std::net::IpAddr;
use tracing::{debug, warn};

use super::message::Attribute;
use super::stun::{stun_test, DatagramTransport, StunError};
use super::types::{NatType, ProbeResult, RetryPolicy, ServerSelection};

/// Outcome of a classification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub nat_type: NatType,
    /// First successful Test I, carrying the external mapping
    pub initial: ProbeResult,
    /// Last probe that was run
    pub last: ProbeResult,
    /// Host that answered Test I
    pub server: Option<String>,
}

impl Classification {
    fn new(nat_type: NatType, initial: ProbeResult, last: ProbeResult, server: &str) -> Self {
        Self {
            nat_type,
            initial,
            last,
            server: Some(server.to_string()),
        }
    }
}

fn change_request(change_ip: bool, change_port: bool) -> Vec<Attribute> {
    vec![Attribute::ChangeRequest {
        change_ip,
        change_port,
    }]
}

/// Classify the NAT between `local_ip` and the rendezvous server
///
/// Every step depends on the previous result, so probes run strictly in
/// sequence over the one transport.
pub async fn get_nat_type<T: DatagramTransport>(
    transport: &T,
    local_ip: IpAddr,
    server: &ServerSelection,
    port: u16,
    retry: &RetryPolicy,
) -> Result<Classification, StunError> {
    debug!("Do Test I");
    let mut initial = ProbeResult::no_response();
    let mut answered = None;
    for host in server.hosts() {
        debug!("Trying STUN host: {}", host);
        initial = stun_test(transport, host, port, Vec::new(), retry).await?;
        if initial.responded {
            answered = Some(host);
            break;
        }
    }

    let Some(host) = answered else {
        return Ok(Classification {
            nat_type: NatType::Blocked,
            initial,
            last: initial,
            server: None,
        });
    };
    debug!("Result: {:?}", initial);

    let external = initial.external_addr;
    let not_translated = external.is_some_and(|addr| IpAddr::V4(*addr.ip()) == local_ip);

    debug!("Do Test II");
    let test2 = stun_test(transport, host, port, change_request(true, true), retry).await?;
    debug!("Result: {:?}", test2);

    if not_translated {
        let nat_type = if test2.responded {
            NatType::OpenInternet
        } else {
            NatType::SymmetricUdpFirewall
        };
        return Ok(Classification::new(nat_type, initial, test2, host));
    }

    if test2.responded {
        return Ok(Classification::new(NatType::FullCone, initial, test2, host));
    }

    let Some(changed) = initial.changed_addr else {
        warn!("{} did not report a changed address", host);
        return Ok(Classification::new(
            NatType::ChangedAddressError,
            initial,
            test2,
            host,
        ));
    };

    debug!("Do Test I against {}", changed);
    let changed_ip = changed.ip().to_string();
    let retest = stun_test(transport, &changed_ip, changed.port(), Vec::new(), retry).await?;
    debug!("Result: {:?}", retest);

    if !retest.responded {
        return Ok(Classification::new(
            NatType::ChangedAddressError,
            initial,
            retest,
            host,
        ));
    }

    if retest.external_addr != external {
        return Ok(Classification::new(NatType::SymmetricNat, initial, retest, host));
    }

    debug!("Do Test III");
    let test3 = stun_test(transport, &changed_ip, port, change_request(false, true), retry).await?;
    debug!("Result: {:?}", test3);

    let nat_type = if test3.responded {
        NatType::RestrictedNat
    } else {
        NatType::RestrictedPortNat
    };
    Ok(Classification::new(nat_type, initial, test3, host))
}
