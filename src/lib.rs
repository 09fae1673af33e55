#![allow(unused_doc_comments)]
/**
 * This style of comments threw out warnings.
 * This allow statement fixes that
 */

/**
 * lib.rs
 */

pub mod nat_traversal;

pub use nat_traversal::{
    discover, discover_via_stream, DiscoveryConfig, DiscoveryResult, NatType, StunError,
};
