//! Receipt-stub event emission
//!
//! The emitter runs once per delivered transaction during pre-execution,
//! after fees are deducted and nonces bumped, and records one receipt-stub
//! event per contained Ethereum-style message. Recording at this stage
//! means the events exist even when execution later fails — without them a
//! transaction aborted for exceeding the block gas ceiling could never be
//! resolved by hash.
//!
//! Callers must invoke this on simulated execution paths as well as
//! committed ones: downstream query consumers rely on the event being
//! present in both cases.

use crate::errors::EmitError;
use crate::events::{
    Event, EventSink, ATTR_ETH_HASH, ATTR_RECIPIENT, ATTR_SENDER, ATTR_TX_GAS_USED, ATTR_TX_INDEX,
    ETHEREUM_TX_EVENT,
};
use crate::types::TxMsg;

/// Emit one receipt-stub event per Ethereum-style message
///
/// `block_tx_index` is the block-wide position assigned to the first
/// message by the enclosing block processor; each message at local index
/// `i` is recorded at global position `block_tx_index + i`. The gas figure
/// recorded here is the declared gas limit — actual consumption is not
/// known until execution completes.
///
/// # Errors
///
/// * [`EmitError::TypeMismatch`] - a message is not an Ethereum-style
///   transaction message; remaining messages are not processed and no
///   event is recorded for them
/// * [`EmitError::Sink`] - the sink rejected an append
pub fn emit_receipt_events<S: EventSink>(
    sink: &mut S,
    msgs: &[TxMsg],
    block_tx_index: u64,
) -> Result<(), EmitError> {
    for (msg_index, msg) in msgs.iter().enumerate() {
        let eth_msg = msg
            .as_ethereum()
            .ok_or(EmitError::TypeMismatch { msg_index })?;

        let eth_tx_index = block_tx_index + msg_index as u64;
        let mut event = Event::new(ETHEREUM_TX_EVENT)
            .with_attribute(ATTR_ETH_HASH, format!("{:#x}", eth_msg.hash))
            .with_attribute(ATTR_TX_INDEX, eth_tx_index.to_string())
            .with_attribute(ATTR_TX_GAS_USED, eth_msg.gas_limit.to_string())
            .with_attribute(ATTR_SENDER, eth_msg.from.to_string());
        if let Some(to) = eth_msg.to {
            event = event.with_attribute(ATTR_RECIPIENT, to.to_string());
        }

        tracing::debug!(
            hash = %eth_msg.hash,
            eth_tx_index,
            gas_limit = eth_msg.gas_limit,
            "emitting receipt event"
        );
        sink.append(event)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BlockEventLog;
    use crate::types::{Address, EthMsg, B256};

    fn eth_msg(tag: u8, gas_limit: u64) -> TxMsg {
        TxMsg::Ethereum(EthMsg {
            hash: B256::with_last_byte(tag),
            gas_limit,
            from: Address::with_last_byte(0x11),
            to: Some(Address::with_last_byte(0x22)),
        })
    }

    #[test]
    fn emits_one_event_per_message_with_offset_indices() {
        let mut log = BlockEventLog::new();
        let msgs = vec![eth_msg(1, 21000), eth_msg(2, 50000)];

        emit_receipt_events(&mut log, &msgs, 10).unwrap();

        assert_eq!(log.len(), 2);
        let first = &log.events()[0];
        assert_eq!(first.kind, ETHEREUM_TX_EVENT);
        assert_eq!(first.attribute(ATTR_TX_INDEX), Some("10"));
        assert_eq!(first.attribute(ATTR_TX_GAS_USED), Some("21000"));
        assert_eq!(log.events()[1].attribute(ATTR_TX_INDEX), Some("11"));
        assert_eq!(log.events()[1].attribute(ATTR_TX_GAS_USED), Some("50000"));
    }

    #[test]
    fn creation_messages_omit_the_recipient() {
        let mut log = BlockEventLog::new();
        let msgs = vec![TxMsg::Ethereum(EthMsg {
            hash: B256::with_last_byte(1),
            gas_limit: 100_000,
            from: Address::with_last_byte(0x11),
            to: None,
        })];

        emit_receipt_events(&mut log, &msgs, 0).unwrap();

        let event = &log.events()[0];
        assert_eq!(event.attribute(ATTR_RECIPIENT), None);
        assert!(event.attribute(ATTR_SENDER).is_some());
    }

    #[test]
    fn non_ethereum_message_aborts_remaining_emission() {
        let mut log = BlockEventLog::new();
        let msgs = vec![
            eth_msg(1, 21000),
            TxMsg::Other {
                type_url: "/bank.MsgSend".into(),
            },
            eth_msg(2, 21000),
        ];

        let err = emit_receipt_events(&mut log, &msgs, 0).unwrap_err();
        assert!(matches!(err, EmitError::TypeMismatch { msg_index: 1 }));
        // the event for the first message was already recorded
        assert_eq!(log.len(), 1);
    }
}
