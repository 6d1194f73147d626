//! Offset resolution: locating one selected parameter inside the encoded
//! head/tail layout without touching anything else.
//!
//! The encoding opens with a "head" of 32-byte slots, one per top-level
//! parameter, except that two shapes expand inline: a fixed-size array of an
//! elementary type takes `n` consecutive slots, and a fully static tuple
//! (elementary members only, no variable-size arrays) takes its whole word
//! count. Every other shape takes a single slot holding either the value
//! itself or a tail offset relative to the start of the region.
//!
//! Tuples recurse: once a tuple's data start is known, its members form a
//! sub-schema whose head begins there and whose tail offsets are relative
//! to it.

use crate::error::AbiError;
use crate::schema::child_range;
use crate::types::{Layout, Param, Selector, Shape};
use crate::word::{advance, read_word_u32, words, WORD};

/// Where a resolved parameter lives in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    /// The 32-byte word at this offset is the value itself.
    Word(usize),
    /// The word at this offset is a size (or length) prefix; the payload
    /// follows it.
    SizePrefixed(usize),
}

/// Whether every member is elementary and none is a variable-size array.
/// Static tuples inline into the head; anything else is reached through an
/// offset slot.
fn tuple_is_static(children: &[Param]) -> bool {
    children
        .iter()
        .all(|p| p.atom.is_elementary() && p.layout != Layout::VarArray)
}

/// Width of one static tuple element in words, counting each fixed-size
/// member array at its full expansion.
fn tuple_words(children: &[Param]) -> Result<usize, AbiError> {
    let mut total = 0usize;
    for param in children {
        let w = match param.layout {
            Layout::FixedArray(n) => n,
            _ => 1,
        };
        total = total.checked_add(w).ok_or(AbiError::OffsetOverflow)?;
    }
    Ok(total)
}

/// Number of head slots the parameter at `idx` occupies.
fn head_words(schema: &[Param], idx: usize) -> Result<usize, AbiError> {
    let param = &schema[idx];
    match param.shape()? {
        Shape::Tuple => {
            let children = &schema[child_range(schema, idx)?];
            if tuple_is_static(children) {
                match param.layout {
                    Layout::Scalar => tuple_words(children),
                    Layout::FixedArray(n) => n
                        .checked_mul(tuple_words(children)?)
                        .ok_or(AbiError::OffsetOverflow),
                    Layout::VarArray => Ok(1),
                }
            } else {
                Ok(1)
            }
        }
        Shape::ElemFixedArr(n) => Ok(n),
        _ => Ok(1),
    }
}

/// Byte offset of the head slot for `limit`, relative to the region base:
/// the head walk over parameters `0..limit`.
fn head_offset(schema: &[Param], limit: usize) -> Result<usize, AbiError> {
    let mut total = 0usize;
    for idx in 0..limit {
        total = total
            .checked_add(head_words(schema, idx)?)
            .ok_or(AbiError::OffsetOverflow)?;
    }
    words(total)
}

/// Resolve `sel` against `schema`, whose encoding begins at byte `base` of
/// `data`. `top` bounds the selectable parameters; tail offsets read from
/// slots are relative to `base`.
pub(crate) fn locate(
    data: &[u8],
    base: usize,
    schema: &[Param],
    top: usize,
    sel: Selector,
) -> Result<Location, AbiError> {
    if sel.param >= top {
        return Err(AbiError::ParamOutOfRange(sel.param, top));
    }
    let slot = advance(base, head_offset(schema, sel.param)?)?;
    match schema[sel.param].shape()? {
        Shape::SingleElem => Ok(Location::Word(slot)),
        Shape::ElemFixedArr(n) => {
            if sel.index >= n {
                return Err(AbiError::IndexOutOfRange(sel.index, n));
            }
            Ok(Location::Word(advance(slot, words(sel.index)?)?))
        }
        Shape::SingleDyn => {
            let tail = advance(base, read_word_u32(data, slot)?)?;
            Ok(Location::SizePrefixed(tail))
        }
        Shape::ElemVarArr => {
            let tail = advance(base, read_word_u32(data, slot)?)?;
            let len = read_word_u32(data, tail)?;
            if sel.index >= len {
                return Err(AbiError::IndexOutOfRange(sel.index, len));
            }
            let first = advance(tail, WORD)?;
            Ok(Location::Word(advance(first, words(sel.index)?)?))
        }
        Shape::DynFixedArr(n) => {
            if sel.index >= n {
                return Err(AbiError::IndexOutOfRange(sel.index, n));
            }
            let tail = advance(base, read_word_u32(data, slot)?)?;
            let rel = read_word_u32(data, advance(tail, words(sel.index)?)?)?;
            Ok(Location::SizePrefixed(advance(tail, rel)?))
        }
        Shape::DynVarArr => {
            let tail = advance(base, read_word_u32(data, slot)?)?;
            let len = read_word_u32(data, tail)?;
            if sel.index >= len {
                return Err(AbiError::IndexOutOfRange(sel.index, len));
            }
            let table = advance(tail, WORD)?;
            let rel = read_word_u32(data, advance(table, words(sel.index)?)?)?;
            Ok(Location::SizePrefixed(advance(table, rel)?))
        }
        Shape::Tuple => Err(AbiError::TupleParam),
    }
}

/// Length word of the variable-size array at `idx` within a region. Works
/// for elementary, dynamic and tuple element types alike: all three carry
/// the array behind a single offset slot.
pub(crate) fn var_array_len(
    data: &[u8],
    base: usize,
    schema: &[Param],
    top: usize,
    idx: usize,
) -> Result<usize, AbiError> {
    if idx >= top {
        return Err(AbiError::ParamOutOfRange(idx, top));
    }
    let param = &schema[idx];
    param.shape()?;
    if param.layout != Layout::VarArray {
        return Err(AbiError::NotAnArray);
    }
    let slot = advance(base, head_offset(schema, idx)?)?;
    let tail = advance(base, read_word_u32(data, slot)?)?;
    read_word_u32(data, tail)
}

/// Byte offset at which the data of the tuple at `sel.param` begins (for
/// tuple arrays, of element `sel.index`), together with its sub-schema.
///
/// Tuples are only addressable at the top level, so the region base is the
/// start of the input. Static tuples live inline in the head; dynamic ones
/// (and all variable-size tuple arrays) are reached through offsets, with
/// per-element offset tables when the element itself is dynamic.
pub(crate) fn tuple_base<'s>(
    data: &[u8],
    schema: &'s [Param],
    sel: Selector,
) -> Result<(usize, &'s [Param]), AbiError> {
    let children = &schema[child_range(schema, sel.param)?];
    let param = &schema[sel.param];
    let slot = head_offset(schema, sel.param)?;
    let stride = words(tuple_words(children)?)?;

    let base = if tuple_is_static(children) {
        match param.layout {
            Layout::Scalar => slot,
            Layout::FixedArray(n) => {
                if sel.index >= n {
                    return Err(AbiError::IndexOutOfRange(sel.index, n));
                }
                let skip = sel.index.checked_mul(stride).ok_or(AbiError::OffsetOverflow)?;
                advance(slot, skip)?
            }
            Layout::VarArray => {
                let tail = read_word_u32(data, slot)?;
                let len = read_word_u32(data, tail)?;
                if sel.index >= len {
                    return Err(AbiError::IndexOutOfRange(sel.index, len));
                }
                let skip = sel.index.checked_mul(stride).ok_or(AbiError::OffsetOverflow)?;
                advance(advance(tail, WORD)?, skip)?
            }
        }
    } else {
        match param.layout {
            Layout::Scalar => read_word_u32(data, slot)?,
            Layout::FixedArray(n) => {
                if sel.index >= n {
                    return Err(AbiError::IndexOutOfRange(sel.index, n));
                }
                let tail = read_word_u32(data, slot)?;
                let rel = read_word_u32(data, advance(tail, words(sel.index)?)?)?;
                advance(tail, rel)?
            }
            Layout::VarArray => {
                let tail = read_word_u32(data, slot)?;
                let len = read_word_u32(data, tail)?;
                if sel.index >= len {
                    return Err(AbiError::IndexOutOfRange(sel.index, len));
                }
                let table = advance(tail, WORD)?;
                let rel = read_word_u32(data, advance(table, words(sel.index)?)?)?;
                advance(table, rel)?
            }
        }
    };
    Ok((base, children))
}
