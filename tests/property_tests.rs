//! Property-based tests for the STUN message codec

use holepunch::nat_traversal::{
    Attribute, AttributeType, Message, MessageType, TransactionId, HEADER_SIZE,
};
use proptest::prelude::*;
use std::net::{Ipv4Addr, SocketAddrV4};

fn address() -> impl Strategy<Value = SocketAddrV4> {
    (any::<[u8; 4]>(), any::<u16>())
        .prop_map(|(ip, port)| SocketAddrV4::new(Ipv4Addr::from(ip), port))
}

fn attribute() -> impl Strategy<Value = Attribute> {
    prop_oneof![
        address().prop_map(Attribute::MappedAddress),
        address().prop_map(Attribute::SourceAddress),
        address().prop_map(Attribute::ChangedAddress),
        address().prop_map(Attribute::ResponseAddress),
        (any::<bool>(), any::<bool>()).prop_map(|(change_ip, change_port)| {
            Attribute::ChangeRequest {
                change_ip,
                change_port,
            }
        }),
        (
            prop::sample::select(vec![
                AttributeType::Username,
                AttributeType::ServerName,
                AttributeType::ErrorCode,
                AttributeType::XorMappedAddress,
            ]),
            prop::collection::vec(any::<u8>(), 0..64),
        )
            .prop_map(|(kind, value)| Attribute::Raw { kind, value }),
    ]
}

proptest! {
    /// Well-formed messages survive encode then decode, attribute order included
    #[test]
    fn message_roundtrip(
        message_type in prop::sample::select(MessageType::ALL.to_vec()),
        id in any::<[u8; 16]>(),
        attributes in prop::collection::vec(attribute(), 0..8),
    ) {
        let message = Message::new(message_type, TransactionId::from_bytes(id), attributes);
        let encoded = message.encode().unwrap();

        prop_assert_eq!(Message::decode(&encoded).unwrap(), message);
    }

    /// Arbitrary bytes never panic the decoder
    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Message::decode(&data);
    }

    /// Cutting a valid message short always fails to decode
    #[test]
    fn truncated_messages_are_rejected(
        attributes in prop::collection::vec(attribute(), 1..6),
        cut in any::<prop::sample::Index>(),
    ) {
        let message = Message::new(MessageType::BindResponse, TransactionId::random(), attributes);
        let encoded = message.encode().unwrap();
        let len = cut.index(encoded.len());

        prop_assert!(Message::decode(&encoded[..len]).is_err());
    }

    /// A declared length larger than the payload always fails to decode
    #[test]
    fn overlong_declared_length_is_rejected(
        attributes in prop::collection::vec(attribute(), 0..6),
        extra in 1u16..64,
    ) {
        let message = Message::new(MessageType::BindResponse, TransactionId::random(), attributes);
        let mut encoded = message.encode().unwrap();
        let declared = (encoded.len() - HEADER_SIZE) as u16 + extra;
        encoded[2..4].copy_from_slice(&declared.to_be_bytes());

        prop_assert!(Message::decode(&encoded).is_err());
    }
}
