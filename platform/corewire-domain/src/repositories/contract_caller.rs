use crate::value_objects::encoded_action::TransactionHandle;
use alloy_primitives::Address;

/// Read-only call: opaque calldata in, opaque return data out.
pub trait ContractCaller {
    fn call(&self, to: Address, call_data: &[u8]) -> Result<Vec<u8>, String>;
}

/// State-changing call signed and broadcast by the collaborator.
pub trait TransactionSender {
    fn send_transaction(&self, to: Address, call_data: &[u8])
        -> Result<TransactionHandle, String>;
}
