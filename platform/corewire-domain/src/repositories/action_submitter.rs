use crate::value_objects::encoded_action::{EncodedAction, TransactionHandle};

/// Hands an encoded action to the execution engine. Signing, nonce and gas
/// management live behind this port.
pub trait ActionSubmitter {
    fn submit(&self, action: &EncodedAction) -> Result<TransactionHandle, String>;
}
