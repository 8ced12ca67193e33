//! Block execution event model
//!
//! Receipt stubs travel through the block execution pipeline as structured
//! events: a type identifier plus string-typed key/value attributes. String
//! typing keeps the transport encoding-agnostic and human-inspectable, at
//! the cost of decimal/hex parsing on the way back out.
//!
//! The module also defines the append-only per-block event log the emitter
//! writes to, and the closed set of historical event encodings the parser
//! knows how to decode.

use serde::{Deserialize, Serialize};

use crate::errors::EmitError;

/// Type identifier of receipt-stub events
pub const ETHEREUM_TX_EVENT: &str = "evm.EventEthereumTx";

/// Attribute key carrying the Ethereum transaction hash (hex)
pub const ATTR_ETH_HASH: &str = "eth_hash";
/// Attribute key carrying the block-wide Ethereum tx index (decimal)
pub const ATTR_TX_INDEX: &str = "index";
/// Attribute key carrying the gas figure (decimal)
pub const ATTR_TX_GAS_USED: &str = "txGasUsed";
/// Attribute key marking execution failure; any non-empty value means failed
pub const ATTR_TX_FAILED: &str = "eth_tx_failed";
/// Attribute key carrying the sender address
pub const ATTR_SENDER: &str = "sender";
/// Attribute key carrying the recipient address
pub const ATTR_RECIPIENT: &str = "recipient";

/// A single string-typed event attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    /// Attribute key
    pub key: String,
    /// Attribute value
    pub value: String,
}

/// A structured event recorded during block execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type identifier
    pub kind: String,
    /// Ordered attribute list
    pub attributes: Vec<EventAttribute>,
}

impl Event {
    /// Create an event of the given kind with no attributes
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, builder-style
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(EventAttribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Look up an attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    /// Whether this event is a receipt stub
    pub fn is_receipt_stub(&self) -> bool {
        self.kind == ETHEREUM_TX_EVENT
    }
}

/// Attribute count of a legacy registration event (hash + index)
const REGISTRATION_ATTRS: usize = 2;

/// Historical encodings of the receipt-stub event
///
/// Old block data may carry one of two shapes; the parser dispatches on
/// this tag once per event rather than inspecting attributes ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEncoding {
    /// One event per message carrying the full attribute set. This is the
    /// only shape the current emitter produces.
    Single,
    /// Legacy split shape: a short registration event (hash and index
    /// only) followed by a fuller update event for the same position.
    Split,
}

impl EventEncoding {
    /// Classify an event by shape
    ///
    /// The legacy registration event is the only receipt stub that carries
    /// exactly two attributes, so attribute count is a sufficient
    /// discriminator across the historical shapes.
    pub fn detect(event: &Event) -> Self {
        if event.attributes.len() == REGISTRATION_ATTRS {
            EventEncoding::Split
        } else {
            EventEncoding::Single
        }
    }
}

/// Destination for emitted receipt events
///
/// Appends are fallible so that a rejected event surfaces to the emitter
/// instead of silently dropping a receipt, which would leave the
/// transaction permanently unresolvable by hash.
pub trait EventSink {
    /// Append one event to the sink
    fn append(&mut self, event: Event) -> Result<(), EmitError>;
}

/// Append-only in-memory event log for one block
///
/// Owned exclusively by the single-threaded block-processing sequence;
/// events are write-once and must not be read until delivery for the
/// block has completed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockEventLog {
    events: Vec<Event>,
}

impl BlockEventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in emission order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the log, yielding its events
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for BlockEventLog {
    fn append(&mut self, event: Event) -> Result<(), EmitError> {
        self.events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_is_by_key() {
        let event = Event::new(ETHEREUM_TX_EVENT)
            .with_attribute(ATTR_TX_INDEX, "3")
            .with_attribute(ATTR_TX_GAS_USED, "21000");

        assert_eq!(event.attribute(ATTR_TX_INDEX), Some("3"));
        assert_eq!(event.attribute(ATTR_TX_GAS_USED), Some("21000"));
        assert_eq!(event.attribute(ATTR_ETH_HASH), None);
    }

    #[test]
    fn encoding_detection_uses_attribute_count() {
        let registration = Event::new(ETHEREUM_TX_EVENT)
            .with_attribute(ATTR_ETH_HASH, "0x01")
            .with_attribute(ATTR_TX_INDEX, "0");
        assert_eq!(EventEncoding::detect(&registration), EventEncoding::Split);

        let full = registration.clone().with_attribute(ATTR_TX_GAS_USED, "21000");
        assert_eq!(EventEncoding::detect(&full), EventEncoding::Single);
    }

    #[test]
    fn log_preserves_emission_order() {
        let mut log = BlockEventLog::new();
        log.append(Event::new("a")).unwrap();
        log.append(Event::new("b")).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].kind, "a");
        assert_eq!(log.events()[1].kind, "b");
    }
}
