use alloy_primitives::Address;

/// One slot of an aggregated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCall {
    pub target: Address,
    pub allow_failure: bool,
    pub call_data: Vec<u8>,
}

impl BatchCall {
    pub fn tolerant(target: Address, call_data: Vec<u8>) -> Self {
        Self {
            target,
            allow_failure: true,
            call_data,
        }
    }
}

/// Outcome of the slot at the same position in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub success: bool,
    pub return_data: Vec<u8>,
}

impl BatchResult {
    pub fn ok(return_data: Vec<u8>) -> Self {
        Self {
            success: true,
            return_data,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            return_data: Vec::new(),
        }
    }
}
