use super::WORD;
use crate::errors::DecodeError;
use alloy_primitives::Address;

/// Bounds-checked word access over a flat tuple-encoded buffer.
///
/// Offsets are byte offsets relative to the start of the buffer the reader was
/// built over. Every read either returns a value or a `DecodeError`; nothing
/// indexes past the end of the slice.
#[derive(Debug, Clone, Copy)]
pub struct AbiReader<'a> {
    data: &'a [u8],
}

impl<'a> AbiReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reader rooted at `offset`, for nested tuples whose offsets are relative
    /// to their own start.
    pub fn at(&self, offset: usize) -> Result<AbiReader<'a>, DecodeError> {
        if offset > self.data.len() {
            return Err(DecodeError::Truncated {
                needed: offset,
                available: self.data.len(),
            });
        }
        Ok(AbiReader::new(&self.data[offset..]))
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| DecodeError::OffsetOutOfRange {
                offset: format!("{offset}+{len}"),
            })?;
        self.data.get(offset..end).ok_or(DecodeError::Truncated {
            needed: end,
            available: self.data.len(),
        })
    }

    pub fn word_at(&self, offset: usize) -> Result<&'a [u8], DecodeError> {
        self.slice(offset, WORD)
    }

    /// Word number `index`, i.e. the word at byte offset `index * 32`.
    pub fn word(&self, index: usize) -> Result<&'a [u8], DecodeError> {
        let offset = index
            .checked_mul(WORD)
            .ok_or_else(|| DecodeError::OffsetOutOfRange {
                offset: format!("word {index}"),
            })?;
        self.word_at(offset)
    }

    pub fn u128_at(&self, offset: usize, field: &'static str) -> Result<u128, DecodeError> {
        let word = self.word_at(offset)?;
        if word[..16].iter().any(|byte| *byte != 0) {
            return Err(DecodeError::InvalidValue { field });
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(buf))
    }

    pub fn u64_at(&self, offset: usize, field: &'static str) -> Result<u64, DecodeError> {
        narrow(self.u128_at(offset, field)?, field)
    }

    pub fn u32_at(&self, offset: usize, field: &'static str) -> Result<u32, DecodeError> {
        narrow(self.u128_at(offset, field)?, field)
    }

    pub fn u16_at(&self, offset: usize, field: &'static str) -> Result<u16, DecodeError> {
        narrow(self.u128_at(offset, field)?, field)
    }

    pub fn u8_at(&self, offset: usize, field: &'static str) -> Result<u8, DecodeError> {
        narrow(self.u128_at(offset, field)?, field)
    }

    /// Signed value; the upper half of the word must be a pure sign extension.
    pub fn i64_at(&self, offset: usize, field: &'static str) -> Result<i64, DecodeError> {
        let word = self.word_at(offset)?;
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&word[16..]);
        let value = i128::from_be_bytes(buf);
        let fill = if value < 0 { 0xff } else { 0x00 };
        if word[..16].iter().any(|byte| *byte != fill) {
            return Err(DecodeError::InvalidValue { field });
        }
        i64::try_from(value).map_err(|_| DecodeError::InvalidValue { field })
    }

    pub fn bool_at(&self, offset: usize, field: &'static str) -> Result<bool, DecodeError> {
        match self.u128_at(offset, field)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidValue { field }),
        }
    }

    pub fn address_at(&self, offset: usize, field: &'static str) -> Result<Address, DecodeError> {
        let word = self.word_at(offset)?;
        if word[..12].iter().any(|byte| *byte != 0) {
            return Err(DecodeError::InvalidValue { field });
        }
        Ok(Address::from_slice(&word[12..]))
    }

    /// Offset or length word converted to a buffer position.
    pub fn offset_at(&self, offset: usize, field: &'static str) -> Result<usize, DecodeError> {
        let word = self.word_at(offset)?;
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&word[16..]);
        let value = u128::from_be_bytes(buf);
        if word[..16].iter().any(|byte| *byte != 0) || value > usize::MAX as u128 {
            return Err(DecodeError::OffsetOutOfRange {
                offset: format!("{field}=0x{}", hex::encode(word)),
            });
        }
        Ok(value as usize)
    }

    /// Length-prefixed payload whose length word sits at `offset`.
    pub fn bytes_at(&self, offset: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.offset_at(offset, field)?;
        let start = offset
            .checked_add(WORD)
            .ok_or_else(|| DecodeError::OffsetOutOfRange {
                offset: format!("{field}@{offset}"),
            })?;
        self.slice(start, len)
    }

    /// Follows the head word at `head_offset` to a dynamic `bytes`/`string`
    /// payload.
    pub fn dynamic_bytes(
        &self,
        head_offset: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        let data_offset = self.offset_at(head_offset, field)?;
        self.bytes_at(data_offset, field)
    }
}

fn narrow<T: TryFrom<u128>>(value: u128, field: &'static str) -> Result<T, DecodeError> {
    T::try_from(value).map_err(|_| DecodeError::InvalidValue { field })
}
