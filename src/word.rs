//! 32-byte word access over the raw input.
//!
//! The encoding permits 256-bit offsets and lengths, but no real payload
//! exceeds 4 GiB, so offsets and lengths are read through a 32-bit window
//! over the low bytes of their word. A word with anything set above that
//! window is malformed input, not a large value: truncating it could alias
//! back into range.

use core::convert::TryInto;

use crate::error::AbiError;

/// Width of one encoded word in bytes.
pub(crate) const WORD: usize = 32;

/// `base + rel`, failing on wrap.
#[inline(always)]
pub(crate) fn advance(base: usize, rel: usize) -> Result<usize, AbiError> {
    base.checked_add(rel).ok_or(AbiError::OffsetOverflow)
}

/// `count` words expressed in bytes, failing on wrap.
#[inline(always)]
pub(crate) fn words(count: usize) -> Result<usize, AbiError> {
    count.checked_mul(WORD).ok_or(AbiError::OffsetOverflow)
}

/// Borrow the 32-byte word at `offset`.
#[inline(always)]
pub(crate) fn peek_word(data: &[u8], offset: usize) -> Result<&[u8; WORD], AbiError> {
    let end = advance(offset, WORD)?;
    if end > data.len() {
        return Err(AbiError::OutOfBounds(end, data.len()));
    }
    data[offset..end]
        .try_into()
        .map_err(|_| AbiError::OutOfBounds(end, data.len()))
}

/// Read the low four bytes of the word at `offset` as a big-endian unsigned
/// integer. The 28 bytes above the window must be zero.
#[inline(always)]
pub(crate) fn read_word_u32(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let word = peek_word(data, offset)?;
    if word[..WORD - 4].iter().any(|&b| b != 0) {
        return Err(AbiError::DirtyWord);
    }
    let tail: [u8; 4] = word[WORD - 4..]
        .try_into()
        .map_err(|_| AbiError::OutOfBounds(offset, data.len()))?;
    Ok(u32::from_be_bytes(tail) as usize)
}
