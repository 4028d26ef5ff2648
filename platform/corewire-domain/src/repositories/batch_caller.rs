use crate::value_objects::batch::{BatchCall, BatchResult};

/// Issues many read-only calls in one round trip.
///
/// The response must have the same length as `calls` and position `i` must
/// describe `calls[i]`. `Err` means the aggregated call itself failed; a
/// single slot failing is reported as `success == false`.
pub trait BatchCaller {
    fn aggregate(&self, calls: &[BatchCall]) -> Result<Vec<BatchResult>, String>;
}
