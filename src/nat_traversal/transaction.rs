/**
 * nat_traversal/transaction.rs
 *
 * Transaction ID generation for request/response correlation
 */

use std::fmt;

/// Length of a classic STUN transaction ID in bytes
pub const TRANSACTION_ID_LEN: usize = 16;

/// 128-bit transaction identifier
///
/// Uniqueness is purely probabilistic. The id only pairs a response with its
/// request and carries no security meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId([u8; TRANSACTION_ID_LEN]);

impl TransactionId {
    /// Generate a fresh random transaction ID
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn from_bytes(bytes: [u8; TRANSACTION_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TRANSACTION_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}
