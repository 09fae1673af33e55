/**
 * nat_traversal/message.rs
 *
 * Classic STUN (RFC 3489) message codec
 *
 * Header:    type:u16  length:u16  transaction_id:[u8; 16]
 * Attribute: code:u16  length:u16  value:[u8; length]
 */

use std::net::{Ipv4Addr, SocketAddrV4};
use thiserror::Error;
use tracing::warn;

use super::transaction::{TransactionId, TRANSACTION_ID_LEN};

/// Message header size (20 bytes)
pub const HEADER_SIZE: usize = 4 + TRANSACTION_ID_LEN;

/// Attribute header size (code + length)
const ATTR_HEADER_SIZE: usize = 4;

/// reserved(1) + family(1) + port(2) + ipv4(4)
const ADDRESS_VALUE_LEN: usize = 8;

const FAMILY_IPV4: u8 = 0x01;

/// CHANGE-REQUEST flag bits
const CHANGE_IP_FLAG: u32 = 0x04;
const CHANGE_PORT_FLAG: u32 = 0x02;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("encoding error: {0}")]
    Encoding(String),
    #[error("malformed message: {0}")]
    Malformed(String),
}

/// STUN message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    BindRequest,
    BindResponse,
    BindErrorResponse,
    SharedSecretRequest,
    SharedSecretResponse,
    SharedSecretErrorResponse,
}

impl MessageType {
    pub const ALL: [MessageType; 6] = [
        MessageType::BindRequest,
        MessageType::BindResponse,
        MessageType::BindErrorResponse,
        MessageType::SharedSecretRequest,
        MessageType::SharedSecretResponse,
        MessageType::SharedSecretErrorResponse,
    ];

    /// Wire code
    pub const fn code(self) -> u16 {
        match self {
            MessageType::BindRequest => 0x0001,
            MessageType::BindResponse => 0x0101,
            MessageType::BindErrorResponse => 0x0111,
            MessageType::SharedSecretRequest => 0x0002,
            MessageType::SharedSecretResponse => 0x0102,
            MessageType::SharedSecretErrorResponse => 0x0112,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            MessageType::BindRequest => "BindRequestMsg",
            MessageType::BindResponse => "BindResponseMsg",
            MessageType::BindErrorResponse => "BindErrorResponseMsg",
            MessageType::SharedSecretRequest => "SharedSecretRequestMsg",
            MessageType::SharedSecretResponse => "SharedSecretResponseMsg",
            MessageType::SharedSecretErrorResponse => "SharedSecretErrorResponseMsg",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// STUN attribute types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    MappedAddress,
    ResponseAddress,
    ChangeRequest,
    SourceAddress,
    ChangedAddress,
    Username,
    Password,
    MessageIntegrity,
    ErrorCode,
    UnknownAttribute,
    ReflectedFrom,
    XorOnly,
    XorMappedAddress,
    ServerName,
    /// Non standard extension
    SecondaryAddress,
}

impl AttributeType {
    pub const ALL: [AttributeType; 15] = [
        AttributeType::MappedAddress,
        AttributeType::ResponseAddress,
        AttributeType::ChangeRequest,
        AttributeType::SourceAddress,
        AttributeType::ChangedAddress,
        AttributeType::Username,
        AttributeType::Password,
        AttributeType::MessageIntegrity,
        AttributeType::ErrorCode,
        AttributeType::UnknownAttribute,
        AttributeType::ReflectedFrom,
        AttributeType::XorOnly,
        AttributeType::XorMappedAddress,
        AttributeType::ServerName,
        AttributeType::SecondaryAddress,
    ];

    /// Wire code
    pub const fn code(self) -> u16 {
        match self {
            AttributeType::MappedAddress => 0x0001,
            AttributeType::ResponseAddress => 0x0002,
            AttributeType::ChangeRequest => 0x0003,
            AttributeType::SourceAddress => 0x0004,
            AttributeType::ChangedAddress => 0x0005,
            AttributeType::Username => 0x0006,
            AttributeType::Password => 0x0007,
            AttributeType::MessageIntegrity => 0x0008,
            AttributeType::ErrorCode => 0x0009,
            AttributeType::UnknownAttribute => 0x000A,
            AttributeType::ReflectedFrom => 0x000B,
            AttributeType::XorOnly => 0x0021,
            AttributeType::XorMappedAddress => 0x8020,
            AttributeType::ServerName => 0x8022,
            AttributeType::SecondaryAddress => 0x8050,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            AttributeType::MappedAddress => "MappedAddress",
            AttributeType::ResponseAddress => "ResponseAddress",
            AttributeType::ChangeRequest => "ChangeRequest",
            AttributeType::SourceAddress => "SourceAddress",
            AttributeType::ChangedAddress => "ChangedAddress",
            AttributeType::Username => "Username",
            AttributeType::Password => "Password",
            AttributeType::MessageIntegrity => "MessageIntegrity",
            AttributeType::ErrorCode => "ErrorCode",
            AttributeType::UnknownAttribute => "UnknownAttribute",
            AttributeType::ReflectedFrom => "ReflectedFrom",
            AttributeType::XorOnly => "XorOnly",
            AttributeType::XorMappedAddress => "XorMappedAddress",
            AttributeType::ServerName => "ServerName",
            AttributeType::SecondaryAddress => "SecondaryAddress",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Types that decode into a dedicated `Attribute` variant
    pub const fn is_interpreted(self) -> bool {
        matches!(
            self,
            AttributeType::MappedAddress
                | AttributeType::ResponseAddress
                | AttributeType::ChangeRequest
                | AttributeType::SourceAddress
                | AttributeType::ChangedAddress
                | AttributeType::ReflectedFrom
        )
    }
}

/// A decoded STUN attribute
///
/// Only the address attributes and CHANGE-REQUEST are interpreted, every other
/// recognized type is carried as its raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    MappedAddress(SocketAddrV4),
    ResponseAddress(SocketAddrV4),
    ChangeRequest { change_ip: bool, change_port: bool },
    SourceAddress(SocketAddrV4),
    ChangedAddress(SocketAddrV4),
    ReflectedFrom(SocketAddrV4),
    /// Value of an uninterpreted type. `kind` must not be one of the
    /// interpreted types (see `AttributeType::is_interpreted`), encoding
    /// rejects it.
    Raw { kind: AttributeType, value: Vec<u8> },
}

impl Attribute {
    pub fn kind(&self) -> AttributeType {
        match self {
            Attribute::MappedAddress(_) => AttributeType::MappedAddress,
            Attribute::ResponseAddress(_) => AttributeType::ResponseAddress,
            Attribute::ChangeRequest { .. } => AttributeType::ChangeRequest,
            Attribute::SourceAddress(_) => AttributeType::SourceAddress,
            Attribute::ChangedAddress(_) => AttributeType::ChangedAddress,
            Attribute::ReflectedFrom(_) => AttributeType::ReflectedFrom,
            Attribute::Raw { kind, .. } => *kind,
        }
    }

    fn value_bytes(&self) -> Vec<u8> {
        match self {
            Attribute::MappedAddress(addr)
            | Attribute::ResponseAddress(addr)
            | Attribute::SourceAddress(addr)
            | Attribute::ChangedAddress(addr)
            | Attribute::ReflectedFrom(addr) => encode_address(addr).to_vec(),
            Attribute::ChangeRequest {
                change_ip,
                change_port,
            } => {
                let mut flags = 0u32;
                if *change_ip {
                    flags |= CHANGE_IP_FLAG;
                }
                if *change_port {
                    flags |= CHANGE_PORT_FLAG;
                }
                flags.to_be_bytes().to_vec()
            }
            Attribute::Raw { value, .. } => value.clone(),
        }
    }

    fn decode(kind: AttributeType, value: &[u8]) -> Result<Self, MessageError> {
        let attr = match kind {
            AttributeType::MappedAddress => Attribute::MappedAddress(decode_address(kind, value)?),
            AttributeType::ResponseAddress => {
                Attribute::ResponseAddress(decode_address(kind, value)?)
            }
            AttributeType::SourceAddress => Attribute::SourceAddress(decode_address(kind, value)?),
            AttributeType::ChangedAddress => {
                Attribute::ChangedAddress(decode_address(kind, value)?)
            }
            AttributeType::ReflectedFrom => Attribute::ReflectedFrom(decode_address(kind, value)?),
            AttributeType::ChangeRequest => {
                let flags: [u8; 4] = value.try_into().map_err(|_| {
                    MessageError::Malformed(format!(
                        "ChangeRequest value must be 4 bytes, got {}",
                        value.len()
                    ))
                })?;
                let flags = u32::from_be_bytes(flags);
                Attribute::ChangeRequest {
                    change_ip: flags & CHANGE_IP_FLAG != 0,
                    change_port: flags & CHANGE_PORT_FLAG != 0,
                }
            }
            _ => Attribute::Raw {
                kind,
                value: value.to_vec(),
            },
        };
        Ok(attr)
    }
}

fn encode_address(addr: &SocketAddrV4) -> [u8; ADDRESS_VALUE_LEN] {
    let mut value = [0u8; ADDRESS_VALUE_LEN];
    value[1] = FAMILY_IPV4;
    value[2..4].copy_from_slice(&addr.port().to_be_bytes());
    value[4..8].copy_from_slice(&addr.ip().octets());
    value
}

/// Reads port and IPv4 address from their fixed offsets
///
/// Other address families are still read at the IPv4 offsets, so the result
/// is only meaningful for family 0x01.
fn decode_address(kind: AttributeType, value: &[u8]) -> Result<SocketAddrV4, MessageError> {
    if value.len() < ADDRESS_VALUE_LEN {
        return Err(MessageError::Malformed(format!(
            "{} value too short: {} bytes",
            kind.name(),
            value.len()
        )));
    }
    if value[1] != FAMILY_IPV4 {
        warn!(
            "{} has address family {:#04x}, reading it as IPv4",
            kind.name(),
            value[1]
        );
    }

    let port = u16::from_be_bytes([value[2], value[3]]);
    let ip = Ipv4Addr::new(value[4], value[5], value[6], value[7]);
    Ok(SocketAddrV4::new(ip, port))
}

/// A STUN message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message_type: MessageType,
    pub transaction_id: TransactionId,
    pub attributes: Vec<Attribute>,
}

impl Message {
    pub fn new(
        message_type: MessageType,
        transaction_id: TransactionId,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self {
            message_type,
            transaction_id,
            attributes,
        }
    }

    /// Build a binding request with a fresh transaction ID
    pub fn binding_request(attributes: Vec<Attribute>) -> Self {
        Self::new(MessageType::BindRequest, TransactionId::random(), attributes)
    }

    /// Serialize to wire bytes
    pub fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut body = Vec::new();

        for attr in &self.attributes {
            if let Attribute::Raw { kind, .. } = attr {
                if kind.is_interpreted() {
                    return Err(MessageError::Encoding(format!(
                        "{} cannot be carried as a raw attribute",
                        kind.name()
                    )));
                }
            }

            let value = attr.value_bytes();
            let len = u16::try_from(value.len()).map_err(|_| {
                MessageError::Encoding(format!(
                    "{} value of {} bytes exceeds the 16-bit length field",
                    attr.kind().name(),
                    value.len()
                ))
            })?;

            body.extend_from_slice(&attr.kind().code().to_be_bytes());
            body.extend_from_slice(&len.to_be_bytes());
            body.extend_from_slice(&value);
        }

        let body_len = u16::try_from(body.len()).map_err(|_| {
            MessageError::Encoding(format!(
                "attributes total {} bytes, exceeding the 16-bit length field",
                body.len()
            ))
        })?;

        let mut bytes = Vec::with_capacity(HEADER_SIZE + body.len());
        bytes.extend_from_slice(&self.message_type.code().to_be_bytes());
        bytes.extend_from_slice(&body_len.to_be_bytes());
        bytes.extend_from_slice(self.transaction_id.as_bytes());
        bytes.extend_from_slice(&body);

        Ok(bytes)
    }

    /// Parse wire bytes
    ///
    /// The declared length must exactly cover the attribute section, and every
    /// attribute must fit inside it. Unknown attribute codes are skipped.
    pub fn decode(data: &[u8]) -> Result<Self, MessageError> {
        if data.len() < HEADER_SIZE {
            return Err(MessageError::Malformed(format!(
                "message too short: {} bytes",
                data.len()
            )));
        }

        let code = u16::from_be_bytes([data[0], data[1]]);
        let message_type = MessageType::from_code(code).ok_or_else(|| {
            MessageError::Malformed(format!("unknown message type: 0x{:04x}", code))
        })?;

        let declared_len = u16::from_be_bytes([data[2], data[3]]) as usize;
        let body = &data[HEADER_SIZE..];
        if declared_len != body.len() {
            return Err(MessageError::Malformed(format!(
                "declared length {} does not match {} attribute bytes",
                declared_len,
                body.len()
            )));
        }

        let mut id = [0u8; TRANSACTION_ID_LEN];
        id.copy_from_slice(&data[4..HEADER_SIZE]);

        let mut attributes = Vec::new();
        let mut rest = body;
        while !rest.is_empty() {
            if rest.len() < ATTR_HEADER_SIZE {
                return Err(MessageError::Malformed(format!(
                    "truncated attribute header: {} bytes left",
                    rest.len()
                )));
            }

            let attr_code = u16::from_be_bytes([rest[0], rest[1]]);
            let attr_len = u16::from_be_bytes([rest[2], rest[3]]) as usize;
            let end = ATTR_HEADER_SIZE + attr_len;
            let value = rest.get(ATTR_HEADER_SIZE..end).ok_or_else(|| {
                MessageError::Malformed(format!(
                    "attribute 0x{:04x} declares {} bytes but only {} remain",
                    attr_code,
                    attr_len,
                    rest.len() - ATTR_HEADER_SIZE
                ))
            })?;

            match AttributeType::from_code(attr_code) {
                Some(kind) => attributes.push(Attribute::decode(kind, value)?),
                None => tracing::trace!("Skipping unknown attribute 0x{:04x}", attr_code),
            }

            rest = &rest[end..];
        }

        Ok(Self {
            message_type,
            transaction_id: TransactionId::from_bytes(id),
            attributes,
        })
    }

    pub fn mapped_address(&self) -> Option<SocketAddrV4> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::MappedAddress(addr) => Some(*addr),
            _ => None,
        })
    }

    pub fn source_address(&self) -> Option<SocketAddrV4> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::SourceAddress(addr) => Some(*addr),
            _ => None,
        })
    }

    pub fn changed_address(&self) -> Option<SocketAddrV4> {
        self.attributes.iter().find_map(|a| match a {
            Attribute::ChangedAddress(addr) => Some(*addr),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> TransactionId {
        TransactionId::from_bytes([0x11; TRANSACTION_ID_LEN])
    }

    fn addr(a: u8, b: u8, c: u8, d: u8, port: u16) -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(a, b, c, d), port)
    }

    #[test]
    fn encodes_plain_binding_request() {
        let bytes = Message::new(MessageType::BindRequest, id(), vec![])
            .encode()
            .unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..4], &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(&bytes[4..20], &[0x11; 16]);
    }

    #[test]
    fn encodes_change_request_flags() {
        let both = Message::new(
            MessageType::BindRequest,
            id(),
            vec![Attribute::ChangeRequest {
                change_ip: true,
                change_port: true,
            }],
        )
        .encode()
        .unwrap();
        assert_eq!(&both[2..4], &[0x00, 0x08]);
        assert_eq!(&both[20..], &[0x00, 0x03, 0x00, 0x04, 0x00, 0x00, 0x00, 0x06]);

        let port_only = Message::new(
            MessageType::BindRequest,
            id(),
            vec![Attribute::ChangeRequest {
                change_ip: false,
                change_port: true,
            }],
        )
        .encode()
        .unwrap();
        assert_eq!(&port_only[24..], &[0x00, 0x00, 0x00, 0x02]);
    }

    #[test]
    fn decodes_binding_response_addresses() {
        let mut data = vec![0x01, 0x01, 0x00, 0x24];
        data.extend_from_slice(&[0x11; 16]);
        // MAPPED-ADDRESS 203.0.113.7:40000
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x08, 0x00, 0x01, 0x9c, 0x40, 203, 0, 113, 7]);
        // SOURCE-ADDRESS 198.51.100.1:3478
        data.extend_from_slice(&[0x00, 0x04, 0x00, 0x08, 0x00, 0x01, 0x0d, 0x96, 198, 51, 100, 1]);
        // CHANGED-ADDRESS 198.51.100.2:3479
        data.extend_from_slice(&[0x00, 0x05, 0x00, 0x08, 0x00, 0x01, 0x0d, 0x97, 198, 51, 100, 2]);

        let msg = Message::decode(&data).unwrap();

        assert_eq!(msg.message_type, MessageType::BindResponse);
        assert_eq!(msg.transaction_id, id());
        assert_eq!(msg.mapped_address(), Some(addr(203, 0, 113, 7, 40000)));
        assert_eq!(msg.source_address(), Some(addr(198, 51, 100, 1, 3478)));
        assert_eq!(msg.changed_address(), Some(addr(198, 51, 100, 2, 3479)));
    }

    #[test]
    fn address_extraction_ignores_attribute_order() {
        let forward = Message::new(
            MessageType::BindResponse,
            id(),
            vec![
                Attribute::MappedAddress(addr(1, 2, 3, 4, 5)),
                Attribute::ChangedAddress(addr(6, 7, 8, 9, 10)),
            ],
        );
        let reversed = Message::new(
            MessageType::BindResponse,
            id(),
            vec![
                Attribute::ChangedAddress(addr(6, 7, 8, 9, 10)),
                Attribute::MappedAddress(addr(1, 2, 3, 4, 5)),
            ],
        );

        let a = Message::decode(&forward.encode().unwrap()).unwrap();
        let b = Message::decode(&reversed.encode().unwrap()).unwrap();
        assert_eq!(a.mapped_address(), b.mapped_address());
        assert_eq!(a.changed_address(), b.changed_address());
        assert_eq!(b, reversed);
    }

    #[test]
    fn skips_unknown_attributes() {
        let mut data = vec![0x01, 0x01, 0x00, 0x12];
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(&[0x7f, 0xff, 0x00, 0x02, 0xaa, 0xbb]);
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x08, 0x00, 0x01, 0x00, 0x50, 10, 0, 0, 1]);

        let msg = Message::decode(&data).unwrap();
        assert_eq!(msg.attributes, vec![Attribute::MappedAddress(addr(10, 0, 0, 1, 80))]);
    }

    #[test]
    fn keeps_uninterpreted_attributes_raw() {
        let msg = Message::new(
            MessageType::BindResponse,
            id(),
            vec![Attribute::Raw {
                kind: AttributeType::ServerName,
                value: b"test".to_vec(),
            }],
        );
        assert_eq!(Message::decode(&msg.encode().unwrap()).unwrap(), msg);
    }

    #[test]
    fn rejects_raw_attribute_with_interpreted_kind() {
        let msg = Message::new(
            MessageType::BindRequest,
            id(),
            vec![Attribute::Raw {
                kind: AttributeType::MappedAddress,
                value: vec![0, 1, 0, 80, 10, 0, 0, 1],
            }],
        );
        assert!(matches!(msg.encode(), Err(MessageError::Encoding(_))));

        let interpreted: Vec<_> = AttributeType::ALL
            .into_iter()
            .filter(|t| t.is_interpreted())
            .collect();
        assert_eq!(interpreted.len(), 6);
    }

    #[test]
    fn reads_non_ipv4_family_at_fixed_offsets() {
        // family 0x02 with 16 bytes of address, only the first four are used
        let mut data = vec![0x01, 0x01, 0x00, 0x18];
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x14, 0x00, 0x02, 0x1f, 0x90]);
        data.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8]);
        data.extend_from_slice(&[0; 12]);

        let msg = Message::decode(&data).unwrap();
        assert_eq!(msg.mapped_address(), Some(addr(0x20, 0x01, 0x0d, 0xb8, 8080)));
    }

    #[test]
    fn rejects_truncated_header() {
        let err = Message::decode(&[0x01, 0x01, 0x00, 0x00, 0x11]).unwrap_err();
        assert!(matches!(err, MessageError::Malformed(_)));
    }

    #[test]
    fn rejects_unknown_message_type() {
        let mut data = vec![0x09, 0x99, 0x00, 0x00];
        data.extend_from_slice(&[0; 16]);
        assert!(matches!(Message::decode(&data), Err(MessageError::Malformed(_))));
    }

    #[test]
    fn rejects_declared_length_beyond_buffer() {
        let mut data = vec![0x01, 0x01, 0x00, 0x0c];
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x08, 0x00, 0x01]);
        assert!(matches!(Message::decode(&data), Err(MessageError::Malformed(_))));
    }

    #[test]
    fn rejects_attribute_overrunning_body() {
        let mut data = vec![0x01, 0x01, 0x00, 0x08];
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x20, 0x00, 0x01, 0x00, 0x50]);
        assert!(matches!(Message::decode(&data), Err(MessageError::Malformed(_))));
    }

    #[test]
    fn rejects_short_address_value() {
        let mut data = vec![0x01, 0x01, 0x00, 0x08];
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x04, 0x00, 0x01, 0x00, 0x50]);
        assert!(matches!(Message::decode(&data), Err(MessageError::Malformed(_))));
    }

    #[test]
    fn rejects_oversized_attribute_on_encode() {
        let msg = Message::new(
            MessageType::BindRequest,
            id(),
            vec![Attribute::Raw {
                kind: AttributeType::Username,
                value: vec![0; u16::MAX as usize + 1],
            }],
        );
        assert!(matches!(msg.encode(), Err(MessageError::Encoding(_))));
    }

    #[test]
    fn rejects_oversized_body_on_encode() {
        let chunk = Attribute::Raw {
            kind: AttributeType::Password,
            value: vec![0; 40_000],
        };
        let msg = Message::new(MessageType::BindRequest, id(), vec![chunk.clone(), chunk]);
        assert!(matches!(msg.encode(), Err(MessageError::Encoding(_))));
    }

    #[test]
    fn symbol_tables_are_bidirectional() {
        for t in MessageType::ALL {
            assert_eq!(MessageType::from_code(t.code()), Some(t));
            assert_eq!(MessageType::from_name(t.name()), Some(t));
        }
        for t in AttributeType::ALL {
            assert_eq!(AttributeType::from_code(t.code()), Some(t));
            assert_eq!(AttributeType::from_name(t.name()), Some(t));
        }
        assert_eq!(AttributeType::from_code(0x8050), Some(AttributeType::SecondaryAddress));
        assert_eq!(MessageType::from_code(0x0113), None);
    }
}
