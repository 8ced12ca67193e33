//! # Ethereum Receipt Reconstruction
//!
//! A library for reconstructing Ethereum-compatible transaction receipts
//! from the structured events a block execution pipeline records, bridging
//! a host chain's batched multi-message transaction delivery and the
//! Ethereum one-receipt-per-transaction view.
//!
//! ## Core Features
//!
//! - **Event Emission**
//!   - One receipt stub per Ethereum-style message
//!   - Explicit block-wide position threading
//!   - Fallible sink seam, no silently dropped receipts
//!
//! - **Receipt Parsing**
//!   - Name-based attribute decoding, robust to reordering and omission
//!   - Legacy split-event encoding support for old block data
//!   - Retroactive failure override when a delivered transaction exceeds
//!     the block gas ceiling
//!
//! - **Indexed Lookups**
//!   - By transaction hash
//!   - By message position within the delivered transaction
//!   - By position in the block's Ethereum transaction ordering
//!   - Cumulative gas accumulation for receipt construction
//!
//! ## Example Usage
//!
//! ```rust
//! use evm_receipts::{
//!     emit_receipt_events, parse_delivered_tx,
//!     BlockEventLog, EthMsg, TxMsg,
//! };
//! use alloy::primitives::{address, B256};
//!
//! # fn example() -> Result<(), evm_receipts::ReceiptError> {
//! let msgs = vec![TxMsg::Ethereum(EthMsg {
//!     hash: B256::with_last_byte(1),
//!     gas_limit: 21_000,
//!     from: address!("C255fC198eEdAC7AF8aF0f6e0ca781794B094A61"),
//!     to: Some(address!("d878229c9c3575F224784DE610911B5607a3ad15")),
//! })];
//!
//! // During pre-execution: record one receipt stub per message,
//! // starting at the block-wide position handed down by the processor.
//! let mut log = BlockEventLog::new();
//! emit_receipt_events(&mut log, &msgs, 10)?;
//!
//! // After delivery: reconstruct the receipts from the recorded events.
//! let parsed = parse_delivered_tx(log.events(), 0, Some(&msgs))?;
//! let tx = parsed.by_tx_index(10).expect("emitted above");
//! assert_eq!(tx.gas_used, 21_000);
//! assert_eq!(parsed.cumulative_gas(0), 21_000);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Module Structure
//!
//! - `events`: Event model, attribute keys, and the per-block event log
//! - `emit`: Receipt-stub event emission during pre-execution
//! - `parse`: Receipt reconstruction from recorded events
//! - `types`: Core data structures and lookup operations
//! - `errors`: Error types and handling

pub mod emit;
pub mod errors;
pub mod events;
pub mod parse;
pub mod types;

// Re-export only the essential types and functions
pub use emit::emit_receipt_events;
pub use errors::{EmitError, ParseError, ReceiptError};
pub use events::{BlockEventLog, Event, EventAttribute, EventEncoding, EventSink};
pub use parse::{parse_delivered_tx, parse_indexed_result};
pub use types::{EthMsg, ParsedTx, ParsedTxs, TxMsg, TxResult};
