//! Submission through the CoreWriter system contract.

use alloy_primitives::Address;
use corewire_domain::repositories::action_submitter::ActionSubmitter;
use corewire_domain::repositories::contract_caller::TransactionSender;
use corewire_domain::services::abi::{self, Token};
use corewire_domain::value_objects::encoded_action::{EncodedAction, TransactionHandle};

pub const SEND_RAW_ACTION_SIGNATURE: &str = "sendRawAction(bytes)";

pub struct CoreWriterSubmitter<S: TransactionSender> {
    sender: S,
    address: Address,
}

impl<S: TransactionSender> CoreWriterSubmitter<S> {
    pub fn new(sender: S, address: Address) -> Self {
        Self { sender, address }
    }
}

impl<S: TransactionSender> ActionSubmitter for CoreWriterSubmitter<S> {
    fn submit(&self, action: &EncodedAction) -> Result<TransactionHandle, String> {
        let call_data = send_raw_action_call_data(action);
        tracing::debug!(
            core_writer = %self.address,
            bytes = call_data.len(),
            "sending raw action"
        );
        self.sender
            .send_transaction(self.address, &call_data)
            .map_err(|err| {
                metrics::counter!("corewire.infra.core_writer.errors_total").increment(1);
                err
            })
    }
}

pub fn send_raw_action_call_data(action: &EncodedAction) -> Vec<u8> {
    abi::encode_call(
        abi::selector(SEND_RAW_ACTION_SIGNATURE),
        &[Token::Bytes(action.as_bytes().to_vec())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use corewire_domain::services::action_codec::encode_action;
    use corewire_domain::value_objects::action::{Action, UsdClassTransfer};
    use std::cell::RefCell;

    struct RecordingSender {
        sent: RefCell<Vec<(Address, Vec<u8>)>>,
        fail: bool,
    }

    impl TransactionSender for RecordingSender {
        fn send_transaction(
            &self,
            to: Address,
            call_data: &[u8],
        ) -> Result<TransactionHandle, String> {
            self.sent.borrow_mut().push((to, call_data.to_vec()));
            if self.fail {
                return Err("nonce too low".to_string());
            }
            Ok(TransactionHandle(format!("0x{:064x}", self.sent.borrow().len())))
        }
    }

    fn usd_transfer() -> EncodedAction {
        encode_action(&Action::UsdClassTransfer(UsdClassTransfer {
            ntl: 1_000_000,
            to_perp: true,
        }))
    }

    #[test]
    fn wraps_action_bytes_in_send_raw_action() {
        let action = usd_transfer();
        let data = send_raw_action_call_data(&action);
        assert_eq!(&data[..4], &abi::selector("sendRawAction(bytes)"));
        assert_eq!(
            hex::encode(&data[4..36]),
            format!("{:064x}", 0x20)
        );
        // 4 header bytes + two parameter words
        assert_eq!(hex::encode(&data[36..68]), format!("{:064x}", 68));
        assert_eq!(&data[68..68 + 68], action.as_bytes());
        assert!(data[68 + 68..].iter().all(|b| *b == 0));
        assert_eq!((data.len() - 4) % 32, 0);
    }

    #[test]
    fn handle_is_returned_unchanged() {
        let submitter = CoreWriterSubmitter::new(
            RecordingSender {
                sent: RefCell::new(Vec::new()),
                fail: false,
            },
            Address::repeat_byte(0x33),
        );
        let handle = submitter.submit(&usd_transfer()).unwrap();
        assert_eq!(handle, TransactionHandle(format!("0x{:064x}", 1)));

        let sent = submitter.sender.sent.borrow();
        assert_eq!(sent[0].0, Address::repeat_byte(0x33));
        assert_eq!(sent[0].1, send_raw_action_call_data(&usd_transfer()));
    }

    #[test]
    fn sender_errors_propagate() {
        let submitter = CoreWriterSubmitter::new(
            RecordingSender {
                sent: RefCell::new(Vec::new()),
                fail: true,
            },
            Address::ZERO,
        );
        assert_eq!(
            submitter.submit(&usd_transfer()).unwrap_err(),
            "nonce too low"
        );
    }
}
