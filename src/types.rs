//! Core types for receipt reconstruction
//!
//! This module defines the data structures used throughout the system:
//! - Delivered-transaction message payloads
//! - Per-message receipt records parsed from events
//! - The indexed result set with its lookup operations
//! - Query-layer result records

use std::collections::HashMap;

pub use alloy::primitives::{Address, B256};
use serde::Serialize;

/// A single Ethereum-style message within a delivered transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthMsg {
    /// Ethereum transaction hash of the message
    pub hash: B256,
    /// Declared gas limit; this is the amount charged when the whole
    /// delivered transaction is aborted for exceeding the block gas ceiling
    pub gas_limit: u64,
    /// Sender address
    pub from: Address,
    /// Recipient address, `None` for contract creation
    pub to: Option<Address>,
}

/// One message payload of a delivered transaction
///
/// A delivered transaction batches one or more messages; only
/// Ethereum-style messages produce receipt-stub events. Other payload
/// kinds are opaque to this crate and handled elsewhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TxMsg {
    /// An Ethereum-compatible transaction message
    Ethereum(EthMsg),
    /// Any other message kind, identified by its type URL
    Other {
        /// Registered type URL of the payload
        type_url: String,
    },
}

impl TxMsg {
    /// Returns the inner Ethereum message, or `None` for other payload kinds
    pub fn as_ethereum(&self) -> Option<&EthMsg> {
        match self {
            TxMsg::Ethereum(msg) => Some(msg),
            TxMsg::Other { .. } => None,
        }
    }
}

/// Receipt record for one Ethereum-style message, parsed from events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTx {
    /// Position of the message within its delivered transaction
    pub msg_index: u64,
    /// Ethereum transaction hash
    pub hash: B256,
    /// Position within the block's Ethereum transaction ordering,
    /// `None` until assigned from an event
    pub eth_tx_index: Option<u32>,
    /// Gas consumed by the message
    pub gas_used: u64,
    /// Whether execution of the message failed
    pub failed: bool,
}

impl ParsedTx {
    /// Create an empty record at the given message position
    pub fn new(msg_index: u64) -> Self {
        Self {
            msg_index,
            hash: B256::ZERO,
            eth_tx_index: None,
            gas_used: 0,
            failed: false,
        }
    }
}

/// All receipt records parsed from one delivered transaction
///
/// Built fresh per parse call and immutable once returned; safe to share
/// across query-serving workers. Entries are ordered by message position
/// and their `eth_tx_index` values are contiguous — `by_tx_index` relies
/// on that contiguity as a precondition rather than checking it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTxs {
    /// One record per Ethereum-style message, in message order
    txs: Vec<ParsedTx>,
    /// Transaction hash to position in `txs`
    tx_hashes: HashMap<B256, usize>,
}

impl ParsedTxs {
    /// Number of parsed records
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// Whether the delivered transaction produced no receipt events
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// All records in message order
    pub fn txs(&self) -> &[ParsedTx] {
        &self.txs
    }

    /// Find a record by its Ethereum transaction hash
    pub fn by_hash(&self, hash: B256) -> Option<&ParsedTx> {
        self.tx_hashes.get(&hash).map(|&idx| &self.txs[idx])
    }

    /// Find a record by its message position within the delivered transaction
    pub fn by_msg_index(&self, msg_index: usize) -> Option<&ParsedTx> {
        self.txs.get(msg_index)
    }

    /// Find a record by its position in the block's Ethereum tx ordering
    ///
    /// Converts the global position to a message position by subtracting
    /// the first record's index, then delegates to [`Self::by_msg_index`].
    /// Returns `None` for an empty result set, an unassigned first index,
    /// or an out-of-range position.
    pub fn by_tx_index(&self, tx_index: u32) -> Option<&ParsedTx> {
        let first = self.txs.first()?.eth_tx_index?;
        let msg_index = (tx_index as i64) - (first as i64);
        if msg_index < 0 {
            return None;
        }
        self.by_msg_index(msg_index as usize)
    }

    /// Cumulative gas used by records `0..=msg_index`
    ///
    /// Recomputed per call; the per-transaction message count is small and
    /// this runs on the query path. Positions past the end are ignored, so
    /// an out-of-range index yields the full sum.
    pub fn cumulative_gas(&self, msg_index: usize) -> u64 {
        self.txs
            .iter()
            .take(msg_index.saturating_add(1))
            .map(|tx| tx.gas_used)
            .sum()
    }

    /// Append a record and register its hash
    pub(crate) fn push(&mut self, tx: ParsedTx) {
        let position = self.txs.len();
        self.tx_hashes.insert(tx.hash, position);
        self.txs.push(tx);
    }

    /// Overwrite the record at `position` with a fuller one
    ///
    /// Used by the legacy two-event decode path. The hash map is updated
    /// so the new hash resolves; a differing placeholder hash may be left
    /// behind as a stale mapping.
    pub(crate) fn replace(&mut self, position: usize, tx: ParsedTx) {
        self.tx_hashes.insert(tx.hash, position);
        self.txs[position] = tx;
    }

    /// Mutable access for the failure-override pass
    pub(crate) fn txs_mut(&mut self) -> &mut [ParsedTx] {
        &mut self.txs
    }
}

/// Receipt lookup result bound to its block location
///
/// The shape consumed by a transaction indexer or query layer answering
/// "transaction by hash" / "transaction by position" / "receipt" requests
/// against block height + position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TxResult {
    /// Block height of the delivered transaction
    pub height: u64,
    /// Position of the delivered transaction within its block
    pub tx_index: u32,
    /// Position of the message within the delivered transaction
    pub msg_index: u32,
    /// Position within the block's Ethereum transaction ordering
    pub eth_tx_index: Option<u32>,
    /// Whether execution of the message failed
    pub failed: bool,
    /// Gas consumed by the message
    pub gas_used: u64,
    /// Gas consumed by this and all preceding messages of the
    /// delivered transaction
    pub cumulative_gas_used: u64,
}
