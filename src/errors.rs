//! Error types for receipt event emission and parsing
//!
//! This module defines the error handling system covering:
//! - Event emission errors (wrong message kind, sink rejection)
//! - Event decoding errors during receipt reconstruction
//! - Error conversion and propagation

use thiserror::Error;

/// Top-level error type for the receipt reconstruction system
///
/// Encompasses all errors that can occur between event emission and
/// receipt lookup, providing a unified error handling interface for users.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Errors occurring while emitting receipt-stub events
    #[error("Failed to emit receipt events: {0}")]
    Emit(#[from] EmitError),

    /// Errors occurring while parsing recorded events
    #[error("Failed to parse receipt events: {0}")]
    Parse(#[from] ParseError),
}

/// Emission-specific errors
///
/// These errors occur while the emitter walks a delivered transaction's
/// message list during pre-execution. They abort the remaining emission
/// for that transaction and are handled by the enclosing block pipeline.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A message in the delivered transaction is not an Ethereum-style
    /// transaction message
    #[error("invalid message type at index {msg_index}: expected an Ethereum transaction message")]
    TypeMismatch {
        /// Position of the offending message within the delivered transaction
        msg_index: usize,
    },

    /// The event sink rejected an append
    ///
    /// A dropped receipt event would make the transaction permanently
    /// unresolvable by hash, so this is surfaced rather than swallowed.
    #[error("event sink rejected receipt event for message {msg_index}: {reason}")]
    Sink {
        /// Position of the message whose event was rejected
        msg_index: usize,
        /// Sink-provided description of the failure
        reason: String,
    },
}

/// Parse-specific errors
///
/// These errors are fatal to a single parse call: no partially built
/// result is ever returned alongside one of them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An event attribute carried a value that does not decode
    #[error("invalid value {value:?} for event attribute {key:?}: {reason}")]
    InvalidAttribute {
        /// Attribute key as recorded in the event
        key: String,
        /// Raw attribute value that failed to decode
        value: String,
        /// Description of the decode failure
        reason: String,
    },

    /// A legacy update event arrived with no registration event before it
    #[error("update event at position {position} has no matching registration event")]
    OrphanUpdate {
        /// Position the update event tried to overwrite
        position: usize,
    },

    /// The failure-override path needed a message the delivered
    /// transaction does not contain
    #[error("message {msg_index} missing from delivered transaction")]
    MissingMessage {
        /// Message position expected by a parsed entry
        msg_index: usize,
    },

    /// The failure-override path found a non-Ethereum message where an
    /// Ethereum one was expected
    #[error("message {msg_index} is not an Ethereum transaction message")]
    NotEthereumMessage {
        /// Position of the offending message
        msg_index: usize,
    },

    /// The requested transaction is absent from the parsed result
    ///
    /// Only produced by the indexer bridge, where the caller names one
    /// specific transaction; plain index lookups report misses as `None`.
    #[error("ethereum tx not found in delivered tx: block {height}, index {tx_index}")]
    TxNotFound {
        /// Block height of the delivered transaction
        height: u64,
        /// Position of the delivered transaction within its block
        tx_index: u32,
    },
}
