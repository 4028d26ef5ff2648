//! Chunked fan-out of indexed precompile reads through a [`BatchCaller`].
//!
//! Indices are split into consecutive chunks of at most `chunk_size`; each
//! chunk becomes one aggregated call with every slot marked as allowed to
//! fail. Slots that fail or do not decode are left out of the result, so the
//! returned map may be a strict subset of the requested indices.

use alloy_primitives::Address;
use corewire_domain::errors::{CodecError, DecodeError};
use corewire_domain::repositories::batch_caller::BatchCaller;
use corewire_domain::value_objects::batch::{BatchCall, BatchResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, debug_span, trace, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkDispatch {
    #[default]
    Sequential,
    Parallel,
}

/// What to do with a slot whose call succeeded but whose bytes do not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeFailurePolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    pub chunk_size: usize,
    pub dispatch: ChunkDispatch,
    /// Upper bound on chunks in flight under [`ChunkDispatch::Parallel`].
    pub parallelism: usize,
    pub on_decode_failure: DecodeFailurePolicy,
}

impl AggregationOptions {
    pub fn sequential(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            dispatch: ChunkDispatch::Sequential,
            parallelism: 1,
            on_decode_failure: DecodeFailurePolicy::Skip,
        }
    }

    pub fn parallel(chunk_size: usize, parallelism: usize) -> Self {
        Self {
            dispatch: ChunkDispatch::Parallel,
            parallelism,
            ..Self::sequential(chunk_size)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    InvalidChunkSize,
    InvalidParallelism,
    /// Calldata for `index` could not be built.
    Encode { index: u64, error: CodecError },
    /// The aggregated call itself failed.
    Transport(String),
    /// The collaborator answered with a different number of slots.
    LengthMismatch { expected: usize, got: usize },
    /// Only raised under [`DecodeFailurePolicy::Fail`].
    Decode { index: u64, error: DecodeError },
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationError::InvalidChunkSize => write!(f, "chunk size must be > 0"),
            AggregationError::InvalidParallelism => write!(f, "parallelism must be > 0"),
            AggregationError::Encode { index, error } => {
                write!(f, "failed to encode call for index {index}: {error}")
            }
            AggregationError::Transport(msg) => write!(f, "aggregated call failed: {msg}"),
            AggregationError::LengthMismatch { expected, got } => write!(
                f,
                "aggregated call returned {got} results for {expected} calls"
            ),
            AggregationError::Decode { index, error } => {
                write!(f, "failed to decode result for index {index}: {error}")
            }
        }
    }
}

impl std::error::Error for AggregationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregationError::Encode { error, .. } => Some(error),
            AggregationError::Decode { error, .. } => Some(error),
            _ => None,
        }
    }
}

pub struct BatchAggregator<'a, B: BatchCaller + Sync + ?Sized> {
    caller: &'a B,
}

type ChunkOutcome<T> = Result<Vec<(u64, T)>, AggregationError>;

impl<'a, B: BatchCaller + Sync + ?Sized> BatchAggregator<'a, B> {
    pub fn new(caller: &'a B) -> Self {
        Self { caller }
    }

    /// Reads every index against `target` and returns the decoded records by
    /// index. When an index appears more than once the later occurrence wins.
    pub fn run<T, E, D>(
        &self,
        indices: &[u64],
        target: Address,
        options: &AggregationOptions,
        encode: E,
        decode: D,
    ) -> Result<BTreeMap<u64, T>, AggregationError>
    where
        T: Send,
        E: Fn(u64) -> Result<Vec<u8>, CodecError> + Sync,
        D: Fn(u64, &[u8]) -> Result<T, DecodeError> + Sync,
    {
        if options.chunk_size == 0 {
            return Err(AggregationError::InvalidChunkSize);
        }
        if options.dispatch == ChunkDispatch::Parallel && options.parallelism == 0 {
            return Err(AggregationError::InvalidParallelism);
        }
        let mut merged = BTreeMap::new();
        if indices.is_empty() {
            return Ok(merged);
        }

        let chunks: Vec<&[u64]> = indices.chunks(options.chunk_size).collect();
        let outcomes: Vec<ChunkOutcome<T>> = match options.dispatch {
            ChunkDispatch::Sequential => chunks
                .iter()
                .enumerate()
                .map(|(n, chunk)| self.run_chunk(n, chunk, target, options, &encode, &decode))
                .collect(),
            ChunkDispatch::Parallel => {
                let worker_count = options.parallelism.min(chunks.len());
                let next_chunk = AtomicUsize::new(0);
                let slots: Mutex<Vec<Option<ChunkOutcome<T>>>> =
                    Mutex::new((0..chunks.len()).map(|_| None).collect());
                std::thread::scope(|scope| {
                    for _ in 0..worker_count {
                        let chunks = &chunks;
                        let next_chunk = &next_chunk;
                        let slots = &slots;
                        let encode = &encode;
                        let decode = &decode;
                        scope.spawn(move || loop {
                            let n = next_chunk.fetch_add(1, Ordering::Relaxed);
                            let Some(chunk) = chunks.get(n) else {
                                break;
                            };
                            let outcome =
                                self.run_chunk(n, chunk, target, options, encode, decode);
                            slots.lock()[n] = Some(outcome);
                        });
                    }
                });
                slots
                    .into_inner()
                    .into_iter()
                    .map(|slot| slot.unwrap_or_else(|| Ok(Vec::new())))
                    .collect()
            }
        };

        // Chunk order is preserved so duplicates resolve the same way in
        // both dispatch modes.
        for outcome in outcomes {
            merged.extend(outcome?);
        }
        Ok(merged)
    }

    fn run_chunk<T, E, D>(
        &self,
        chunk_no: usize,
        chunk: &[u64],
        target: Address,
        options: &AggregationOptions,
        encode: &E,
        decode: &D,
    ) -> ChunkOutcome<T>
    where
        E: Fn(u64) -> Result<Vec<u8>, CodecError>,
        D: Fn(u64, &[u8]) -> Result<T, DecodeError>,
    {
        let _span = debug_span!(
            "aggregate_chunk",
            chunk = chunk_no,
            size = chunk.len(),
            target = %target
        )
        .entered();
        let started = Instant::now();

        let calls = chunk
            .iter()
            .map(|&index| {
                encode(index)
                    .map(|call_data| BatchCall::tolerant(target, call_data))
                    .map_err(|error| AggregationError::Encode { index, error })
            })
            .collect::<Result<Vec<_>, _>>()?;

        metrics::counter!("corewire.batch.chunks_total").increment(1);
        metrics::counter!("corewire.batch.elements_total").increment(chunk.len() as u64);

        let results = self.caller.aggregate(&calls).map_err(|err| {
            warn!(error = %err, "aggregated call failed");
            AggregationError::Transport(err)
        })?;
        if results.len() != calls.len() {
            return Err(AggregationError::LengthMismatch {
                expected: calls.len(),
                got: results.len(),
            });
        }

        let mut decoded = Vec::with_capacity(chunk.len());
        let mut failed = 0u64;
        let mut undecodable = 0u64;
        for (&index, BatchResult { success, return_data }) in chunk.iter().zip(&results) {
            if !success {
                trace!(index, "slot reported failure");
                failed += 1;
                continue;
            }
            match decode(index, return_data) {
                Ok(record) => decoded.push((index, record)),
                Err(error) => {
                    if options.on_decode_failure == DecodeFailurePolicy::Fail {
                        return Err(AggregationError::Decode { index, error });
                    }
                    debug!(index, error = %error, "skipping undecodable slot");
                    undecodable += 1;
                }
            }
        }

        if failed > 0 {
            metrics::counter!("corewire.batch.elements_failed_total").increment(failed);
        }
        if undecodable > 0 {
            metrics::counter!("corewire.batch.decode_failures_total").increment(undecodable);
            warn!(
                skipped = undecodable,
                "chunk contained results that could not be decoded"
            );
        }
        metrics::histogram!("corewire.batch.chunk_ms")
            .record(started.elapsed().as_millis() as f64);
        debug!(decoded = decoded.len(), failed, "chunk complete");
        Ok(decoded)
    }
}
