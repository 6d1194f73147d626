//! Decoding proper: copying resolved values into caller buffers, plus the
//! public operations.
//!
//! Elementary values are written without their word padding; dynamic values
//! are written without the size prefix and without trailing zero padding.
//! Nothing is written on failure.

use core::convert::TryInto;

use crate::error::AbiError;
use crate::offset::{locate, tuple_base, var_array_len, Location};
use crate::schema::{check_schema, top_level_len};
use crate::types::{Param, Selector};
use crate::word::{advance, peek_word, read_word_u32, WORD};

/// Read the 4-byte method selector from the front of a call payload.
///
/// # Example
/// ```
/// use rabi_rs::decoder::read_selector;
///
/// let calldata = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x00];
/// let selector = read_selector(&calldata).unwrap();
/// assert_eq!(selector, &[0xde, 0xad, 0xbe, 0xef]);
/// ```
#[inline]
pub fn read_selector(data: &[u8]) -> Result<&[u8; 4], AbiError> {
    if data.len() < 4 {
        return Err(AbiError::OutOfBounds(4, data.len()));
    }
    data[0..4]
        .try_into()
        .map_err(|_| AbiError::OutOfBounds(4, data.len()))
}

/// The call payload without its 4-byte method selector: the argument region
/// every decode operation expects.
///
/// # Example
/// ```
/// use rabi_rs::decoder::skip_selector;
///
/// let calldata = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03];
/// let args = skip_selector(&calldata).unwrap();
/// assert_eq!(args, &[0x01, 0x02, 0x03]);
/// ```
#[inline]
pub fn skip_selector(data: &[u8]) -> Result<&[u8], AbiError> {
    if data.len() < 4 {
        return Err(AbiError::OutOfBounds(4, data.len()));
    }
    Ok(&data[4..])
}

/// Copy one elementary value out of the word at `offset`. Left-aligned
/// types come from the high bytes, everything else from the low bytes.
fn decode_elementary(
    out: &mut [u8],
    param: &Param,
    data: &[u8],
    offset: usize,
) -> Result<usize, AbiError> {
    let width = param.atom.width().ok_or(AbiError::InvalidSchema)?;
    let word = peek_word(data, offset)?;
    if out.len() < width {
        return Err(AbiError::OutputTooSmall(width, out.len()));
    }
    let src = if param.atom.left_aligned() {
        &word[..width]
    } else {
        &word[WORD - width..]
    };
    out[..width].copy_from_slice(src);
    Ok(width)
}

/// Bounds-check the size-prefixed payload at `offset`; returns the payload
/// start and size.
fn dynamic_extent(data: &[u8], offset: usize) -> Result<(usize, usize), AbiError> {
    let size = read_word_u32(data, offset)?;
    let start = advance(offset, WORD)?;
    let end = advance(start, size)?;
    if end > data.len() {
        return Err(AbiError::OutOfBounds(end, data.len()));
    }
    Ok((start, size))
}

/// Copy a size-prefixed payload, without the prefix and without padding.
fn decode_dynamic(out: &mut [u8], data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let (start, size) = dynamic_extent(data, offset)?;
    if out.len() < size {
        return Err(AbiError::OutputTooSmall(size, out.len()));
    }
    out[..size].copy_from_slice(&data[start..start + size]);
    Ok(size)
}

fn decode_at(
    out: &mut [u8],
    param: &Param,
    data: &[u8],
    loc: Location,
) -> Result<usize, AbiError> {
    match loc {
        Location::Word(offset) => decode_elementary(out, param, data, offset),
        Location::SizePrefixed(offset) => decode_dynamic(out, data, offset),
    }
}

/// Decode the parameter (or array element) addressed by `sel` into `out`,
/// returning the number of bytes written.
pub fn decode_param(
    out: &mut [u8],
    schema: &[Param],
    sel: Selector,
    data: &[u8],
) -> Result<usize, AbiError> {
    check_schema(schema)?;
    let top = top_level_len(schema)?;
    let loc = locate(data, 0, schema, top, sel)?;
    decode_at(out, &schema[sel.param], data, loc)
}

/// Byte length of the dynamic parameter (or dynamic array element)
/// addressed by `sel`. No copy takes place, so no output buffer is needed.
pub fn param_size(schema: &[Param], sel: Selector, data: &[u8]) -> Result<usize, AbiError> {
    check_schema(schema)?;
    let top = top_level_len(schema)?;
    match locate(data, 0, schema, top, sel)? {
        Location::SizePrefixed(offset) => dynamic_extent(data, offset).map(|(_, size)| size),
        Location::Word(_) => Err(AbiError::NotDynamic),
    }
}

/// Element count of the variable-size array addressed by `sel.param`.
pub fn array_length(schema: &[Param], sel: Selector, data: &[u8]) -> Result<usize, AbiError> {
    check_schema(schema)?;
    let top = top_level_len(schema)?;
    var_array_len(data, 0, schema, top, sel.param)
}

/// Decode a member of the tuple addressed by `outer`: `inner` selects within
/// the tuple's sub-schema, with `inner.index` indexing member arrays. For
/// tuple arrays, `outer.index` picks the tuple element first.
pub fn decode_tuple_param(
    out: &mut [u8],
    schema: &[Param],
    outer: Selector,
    inner: Selector,
    data: &[u8],
) -> Result<usize, AbiError> {
    check_schema(schema)?;
    let (base, children) = tuple_base(data, schema, outer)?;
    let loc = locate(data, base, children, children.len(), inner)?;
    decode_at(out, &children[inner.param], data, loc)
}

/// Element count of the variable-size array member `inner.param` of the
/// tuple addressed by `outer`.
pub fn tuple_array_length(
    schema: &[Param],
    outer: Selector,
    inner: Selector,
    data: &[u8],
) -> Result<usize, AbiError> {
    check_schema(schema)?;
    let (base, children) = tuple_base(data, schema, outer)?;
    var_array_len(data, base, children, children.len(), inner.param)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Atom;

    extern crate alloc;
    use alloc::vec::Vec;

    fn word_u64(v: u64) -> [u8; 32] {
        let mut w = [0u8; 32];
        w[24..].copy_from_slice(&v.to_be_bytes());
        w
    }

    fn word_left(bytes: &[u8]) -> [u8; 32] {
        let mut w = [0u8; 32];
        w[..bytes.len()].copy_from_slice(bytes);
        w
    }

    fn cat(ws: &[[u8; 32]]) -> Vec<u8> {
        ws.iter().flat_map(|w| w.iter().copied()).collect()
    }

    #[test]
    fn address_is_right_aligned() {
        let mut word = [0u8; 32];
        for (i, b) in word[12..].iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        let schema = [Param::scalar(Atom::Address)];
        let mut out = [0u8; 20];
        let n = decode_param(&mut out, &schema, Selector::scalar(0), &word).unwrap();
        assert_eq!(n, 20);
        assert_eq!(out[0], 1);
        assert_eq!(out[19], 20);
    }

    #[test]
    fn fixed_bytes_are_left_aligned() {
        let data = word_left(b"abc");
        let schema = [Param::scalar(Atom::FixedBytes(3))];
        let mut out = [0u8; 3];
        assert_eq!(decode_param(&mut out, &schema, Selector::scalar(0), &data), Ok(3));
        assert_eq!(&out, b"abc");
    }

    #[test]
    fn function_is_24_bytes_left_aligned() {
        let mut raw = [0u8; 24];
        raw[..20].copy_from_slice(&[0x11; 20]);
        raw[20..].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let data = word_left(&raw);
        let schema = [Param::scalar(Atom::Function)];
        let mut out = [0u8; 24];
        assert_eq!(decode_param(&mut out, &schema, Selector::scalar(0), &data), Ok(24));
        assert_eq!(out, raw);
    }

    #[test]
    fn narrow_integer_strips_padding() {
        let data = word_u64(0xDEAD_BEEF);
        let schema = [Param::scalar(Atom::Uint(32))];
        let mut out = [0u8; 4];
        assert_eq!(decode_param(&mut out, &schema, Selector::scalar(0), &data), Ok(4));
        assert_eq!(out, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn short_output_fails_without_writing() {
        let data = word_u64(7);
        let schema = [Param::scalar(Atom::Uint(256))];
        let mut out = [0xccu8; 16];
        assert_eq!(
            decode_param(&mut out, &schema, Selector::scalar(0), &data),
            Err(AbiError::OutputTooSmall(32, 16))
        );
        assert_eq!(out, [0xcc; 16]);
    }

    #[test]
    fn dynamic_payload_copied_without_prefix_or_padding() {
        // (bytes) = "dave"
        let data = cat(&[word_u64(32), word_u64(4), word_left(b"dave")]);
        let schema = [Param::scalar(Atom::Bytes)];
        let mut out = [0u8; 8];
        let n = decode_param(&mut out, &schema, Selector::scalar(0), &data).unwrap();
        assert_eq!(n, 4);
        assert_eq!(&out[..4], b"dave");
    }

    #[test]
    fn size_only_path_ignores_output_capacity() {
        let data = cat(&[word_u64(32), word_u64(4), word_left(b"dave")]);
        let schema = [Param::scalar(Atom::Bytes)];
        assert_eq!(param_size(&schema, Selector::scalar(0), &data), Ok(4));
    }

    #[test]
    fn dynamic_payload_overrunning_input_fails() {
        // Size word claims 64 bytes but only one payload word follows.
        let data = cat(&[word_u64(32), word_u64(64), word_u64(0)]);
        let schema = [Param::scalar(Atom::Bytes)];
        let mut out = [0u8; 64];
        assert_eq!(
            decode_param(&mut out, &schema, Selector::scalar(0), &data),
            Err(AbiError::OutOfBounds(128, 96))
        );
    }

    #[test]
    fn param_size_of_elementary_fails() {
        let data = word_u64(1);
        let schema = [Param::scalar(Atom::Bool)];
        assert_eq!(
            param_size(&schema, Selector::scalar(0), &data),
            Err(AbiError::NotDynamic)
        );
    }

    #[test]
    fn tuple_marker_has_no_direct_value() {
        let schema = [
            Param::scalar(Atom::Tuple(1)),
            Param::scalar(Atom::Bool),
        ];
        let data = word_u64(1);
        let mut out = [0u8; 32];
        assert_eq!(
            decode_param(&mut out, &schema, Selector::scalar(0), &data),
            Err(AbiError::TupleParam)
        );
    }

    #[test]
    fn selector_prefix_helpers() {
        let calldata = [0xca, 0xfe, 0xba, 0xbe, 0x01];
        assert_eq!(read_selector(&calldata).unwrap(), &[0xca, 0xfe, 0xba, 0xbe]);
        assert_eq!(skip_selector(&calldata).unwrap(), &[0x01]);
        assert!(read_selector(&calldata[..3]).is_err());
    }
}
