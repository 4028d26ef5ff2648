//! `aggregate3` on the Multicall3 contract as a [`BatchCaller`].

use alloy_primitives::Address;
use corewire_domain::errors::DecodeError;
use corewire_domain::repositories::batch_caller::BatchCaller;
use corewire_domain::repositories::contract_caller::ContractCaller;
use corewire_domain::services::abi::{self, AbiReader, Token, WORD};
use corewire_domain::value_objects::batch::{BatchCall, BatchResult};
use std::time::Instant;

pub const AGGREGATE3_SIGNATURE: &str = "aggregate3((address,bool,bytes)[])";

pub struct Multicall3<C: ContractCaller> {
    caller: C,
    address: Address,
}

impl<C: ContractCaller> Multicall3<C> {
    pub fn new(caller: C, address: Address) -> Self {
        Self { caller, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl<C: ContractCaller> BatchCaller for Multicall3<C> {
    fn aggregate(&self, calls: &[BatchCall]) -> Result<Vec<BatchResult>, String> {
        let span = tracing::debug_span!(
            "infra.multicall.aggregate3",
            multicall = %self.address,
            calls = calls.len()
        );
        let _enter = span.enter();
        let started = Instant::now();

        let call_data = encode_aggregate3(calls);
        let raw = match self.caller.call(self.address, &call_data) {
            Ok(raw) => raw,
            Err(err) => {
                metrics::counter!("corewire.infra.multicall.calls_total", "result" => "err")
                    .increment(1);
                tracing::warn!(error = %err, "aggregate3 call failed");
                return Err(err);
            }
        };
        let results = match decode_aggregate3(&raw) {
            Ok(results) => results,
            Err(err) => {
                metrics::counter!("corewire.infra.multicall.calls_total", "result" => "err")
                    .increment(1);
                tracing::warn!(error = %err, bytes = raw.len(), "malformed aggregate3 response");
                return Err(format!("malformed aggregate3 response: {err}"));
            }
        };

        metrics::counter!("corewire.infra.multicall.calls_total", "result" => "ok").increment(1);
        metrics::histogram!("corewire.infra.multicall.call_ms")
            .record(started.elapsed().as_secs_f64() * 1000.0);
        Ok(results)
    }
}

/// Selector followed by the `(address target, bool allowFailure, bytes callData)[]`
/// argument.
pub fn encode_aggregate3(calls: &[BatchCall]) -> Vec<u8> {
    let entries = calls
        .iter()
        .map(|call| {
            Token::Tuple(vec![
                Token::Address(call.target),
                Token::Bool(call.allow_failure),
                Token::Bytes(call.call_data.clone()),
            ])
        })
        .collect();
    abi::encode_call(abi::selector(AGGREGATE3_SIGNATURE), &[Token::Array(entries)])
}

/// Decodes the `(bool success, bytes returnData)[]` return value.
pub fn decode_aggregate3(data: &[u8]) -> Result<Vec<BatchResult>, DecodeError> {
    let reader = AbiReader::new(data);
    let array = reader.offset_at(0, "results")?;
    let count = reader.offset_at(array, "results_len")?;
    let elements = reader.at(array.checked_add(WORD).ok_or_else(|| {
        DecodeError::OffsetOutOfRange {
            offset: format!("results@{array}"),
        }
    })?)?;
    // Every element needs at least its offset word.
    if count > elements.len() / WORD {
        return Err(DecodeError::Truncated {
            needed: count.saturating_mul(WORD),
            available: elements.len(),
        });
    }

    (0..count)
        .map(|i| {
            let element = elements.at(elements.offset_at(i * WORD, "result_offset")?)?;
            Ok(BatchResult {
                success: element.bool_at(0, "success")?,
                return_data: element.dynamic_bytes(WORD, "return_data")?.to_vec(),
            })
        })
        .collect()
}
