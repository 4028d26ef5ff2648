//! Fixed-point conversions for amounts exchanged with the execution engine.
//! The scale factors are part of the wire contract.

use crate::errors::CodecError;

pub const USD_DECIMALS: u32 = 6;
pub const PRICE_DECIMALS: u32 = 8;

pub fn usd_to_raw(usd: f64) -> Result<u64, CodecError> {
    to_raw(usd, USD_DECIMALS, "usd")
}

pub fn raw_to_usd(raw: u64) -> f64 {
    from_raw(raw, USD_DECIMALS)
}

pub fn price_to_raw(price: f64) -> Result<u64, CodecError> {
    to_raw(price, PRICE_DECIMALS, "price")
}

pub fn raw_to_price(raw: u64) -> f64 {
    from_raw(raw, PRICE_DECIMALS)
}

pub fn size_to_raw(size: f64, sz_decimals: u32) -> Result<u64, CodecError> {
    to_raw(size, sz_decimals, "size")
}

pub fn raw_to_size(raw: u64, sz_decimals: u32) -> f64 {
    from_raw(raw, sz_decimals)
}

/// Scales and truncates toward zero.
fn to_raw(value: f64, decimals: u32, field: &'static str) -> Result<u64, CodecError> {
    let scaled = value * 10f64.powi(decimals as i32);
    if !scaled.is_finite() || scaled < 0.0 || scaled >= u64::MAX as f64 {
        return Err(CodecError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(scaled.trunc() as u64)
}

fn from_raw(raw: u64, decimals: u32) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}
