//! Calldata builders and result decoders for the read-only precompiles.
//!
//! Precompile calldata carries no selector: the argument tuple is the whole
//! payload. Decoders never panic on hostile input; `decode_*` absorb every
//! structural problem as `None`, `try_decode_*` report why.

use crate::errors::{CodecError, DecodeError};
use crate::services::abi::{self, AbiReader, Token, WORD};
use crate::value_objects::records::{
    PerpAssetInfo, Position, PrecompileRecord, PriceQuote, RecordKind, SpotBalance,
};
use alloy_primitives::Address;

pub const POSITION_MIN_LEN: usize = 32;
pub const SPOT_BALANCE_MIN_LEN: usize = 24;
pub const PRICE_MIN_LEN: usize = 1;
pub const PERP_ASSET_INFO_MIN_LEN: usize = 1;

/// `(address user, uint16 perp)`
pub fn position_call_data(user: Address, perp: u64) -> Result<Vec<u8>, CodecError> {
    let perp = u16::try_from(perp).map_err(|_| CodecError::OutOfRange {
        field: "perp",
        value: perp.to_string(),
    })?;
    Ok(abi::encode(&[Token::Address(user), Token::Uint(perp.into())]))
}

/// `(address user, uint64 token)`
pub fn spot_balance_call_data(user: Address, token: u64) -> Vec<u8> {
    abi::encode(&[Token::Address(user), Token::Uint(token.into())])
}

/// `(uint32 index)`; used by the mark, oracle and spot price precompiles and
/// by perp asset info.
pub fn index_call_data(index: u64) -> Result<Vec<u8>, CodecError> {
    let index = u32::try_from(index).map_err(|_| CodecError::OutOfRange {
        field: "index",
        value: index.to_string(),
    })?;
    Ok(abi::encode(&[Token::Uint(index.into())]))
}

pub fn try_decode_position(perp_index: u64, bytes: &[u8]) -> Result<Position, DecodeError> {
    ensure_min_len("position", POSITION_MIN_LEN, bytes)?;
    let r = AbiReader::new(bytes);
    Ok(Position {
        perp_index,
        szi: r.i64_at(0, "szi")?,
        entry_ntl: r.u64_at(WORD, "entry_ntl")?,
        isolated_raw_usd: r.i64_at(2 * WORD, "isolated_raw_usd")?,
        leverage: r.u32_at(3 * WORD, "leverage")?,
        is_isolated: r.bool_at(4 * WORD, "is_isolated")?,
    })
}

pub fn decode_position(perp_index: u64, bytes: &[u8]) -> Option<Position> {
    try_decode_position(perp_index, bytes).ok()
}

pub fn try_decode_spot_balance(token_index: u64, bytes: &[u8]) -> Result<SpotBalance, DecodeError> {
    ensure_min_len("spot_balance", SPOT_BALANCE_MIN_LEN, bytes)?;
    let r = AbiReader::new(bytes);
    Ok(SpotBalance {
        token_index,
        total: r.u64_at(0, "total")?,
        hold: r.u64_at(WORD, "hold")?,
        entry_ntl: r.u64_at(2 * WORD, "entry_ntl")?,
    })
}

pub fn decode_spot_balance(token_index: u64, bytes: &[u8]) -> Option<SpotBalance> {
    try_decode_spot_balance(token_index, bytes).ok()
}

pub fn try_decode_price(index: u64, bytes: &[u8]) -> Result<PriceQuote, DecodeError> {
    ensure_min_len("price", PRICE_MIN_LEN, bytes)?;
    Ok(PriceQuote {
        index,
        raw: AbiReader::new(bytes).u64_at(0, "price")?,
    })
}

pub fn decode_price(index: u64, bytes: &[u8]) -> Option<PriceQuote> {
    try_decode_price(index, bytes).ok()
}

/// Word 0 locates the tuple head (floored to a word boundary). The head holds
/// the offset of `coin` relative to the head, then `marginTableId`,
/// `szDecimals`, `maxLeverage` and `onlyIsolated`. The coin bytes are mapped
/// one byte per character with zero bytes dropped.
pub fn try_decode_perp_asset_info(index: u64, bytes: &[u8]) -> Result<PerpAssetInfo, DecodeError> {
    ensure_min_len("perp_asset_info", PERP_ASSET_INFO_MIN_LEN, bytes)?;
    let r = AbiReader::new(bytes);

    let tuple_word = r.offset_at(0, "tuple_offset")? / WORD;
    let head = tuple_word * WORD;
    let coin_offset = r.offset_at(head, "coin_offset")?;
    let margin_table_id = r.u64_at(head + WORD, "margin_table_id")?;
    let sz_decimals = r.u32_at(head + 2 * WORD, "sz_decimals")?;
    let max_leverage = r.u32_at(head + 3 * WORD, "max_leverage")?;
    let only_isolated = r.bool_at(head + 4 * WORD, "only_isolated")?;

    let coin_start = tuple_word
        .checked_add(coin_offset / WORD)
        .and_then(|word| word.checked_mul(WORD))
        .ok_or_else(|| DecodeError::OffsetOutOfRange {
            offset: format!("coin_offset={coin_offset}"),
        })?;
    let coin = r
        .bytes_at(coin_start, "coin")?
        .iter()
        .filter(|byte| **byte != 0)
        .map(|byte| char::from(*byte))
        .collect();

    Ok(PerpAssetInfo {
        index,
        coin,
        margin_table_id,
        sz_decimals,
        max_leverage,
        only_isolated,
    })
}

pub fn decode_perp_asset_info(index: u64, bytes: &[u8]) -> Option<PerpAssetInfo> {
    try_decode_perp_asset_info(index, bytes).ok()
}

pub fn try_decode_record(
    kind: RecordKind,
    index: u64,
    bytes: &[u8],
) -> Result<PrecompileRecord, DecodeError> {
    match kind {
        RecordKind::Position => try_decode_position(index, bytes).map(PrecompileRecord::Position),
        RecordKind::SpotBalance => {
            try_decode_spot_balance(index, bytes).map(PrecompileRecord::SpotBalance)
        }
        RecordKind::PerpAssetInfo => {
            try_decode_perp_asset_info(index, bytes).map(PrecompileRecord::PerpAssetInfo)
        }
    }
}

pub fn decode_record(kind: RecordKind, index: u64, bytes: &[u8]) -> Option<PrecompileRecord> {
    try_decode_record(kind, index, bytes).ok()
}

fn ensure_min_len(kind: &'static str, min: usize, bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.len() < min {
        return Err(DecodeError::TooShort {
            kind,
            min,
            len: bytes.len(),
        });
    }
    Ok(())
}
