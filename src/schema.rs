//! Schema-wide validation and the bookkeeping for appended tuple children.
//!
//! A schema is a flat slice: top-level parameters first, then the children
//! of every tuple marker, appended in the order of their enclosing tuples.
//! A `Tuple(n)` marker at top level claims `n` entries of that appended
//! region. Children may not themselves be tuples.

use core::ops::Range;

use crate::error::AbiError;
use crate::types::{Atom, Param};

/// Number of leading schema entries that are top-level parameters. The
/// remainder is the children region.
pub(crate) fn top_level_len(schema: &[Param]) -> Result<usize, AbiError> {
    let mut children = 0usize;
    for param in schema {
        if let Atom::Tuple(arity) = param.atom {
            children = children.checked_add(arity).ok_or(AbiError::InvalidSchema)?;
        }
    }
    match schema.len().checked_sub(children) {
        Some(top) if top > 0 => Ok(top),
        _ => Err(AbiError::InvalidSchema),
    }
}

/// Schema indices of the children of the tuple at top-level position `idx`.
///
/// Sibling tuples append their children in marker order, so this block ends
/// where the blocks of all later tuples begin.
pub(crate) fn child_range(schema: &[Param], idx: usize) -> Result<Range<usize>, AbiError> {
    let top = top_level_len(schema)?;
    if idx >= top {
        return Err(AbiError::ParamOutOfRange(idx, top));
    }
    let arity = match schema[idx].atom {
        Atom::Tuple(arity) => arity,
        _ => return Err(AbiError::NotATuple),
    };
    let later: usize = schema[idx + 1..top]
        .iter()
        .map(|p| match p.atom {
            Atom::Tuple(a) => a,
            _ => 0,
        })
        .sum();
    let end = schema.len().checked_sub(later).ok_or(AbiError::InvalidSchema)?;
    let start = end.checked_sub(arity).ok_or(AbiError::InvalidSchema)?;
    if start < top {
        return Err(AbiError::InvalidSchema);
    }
    Ok(start..end)
}

/// Borrow the sub-schema of the tuple at top-level position `idx`.
pub fn tuple_children(schema: &[Param], idx: usize) -> Result<&[Param], AbiError> {
    Ok(&schema[child_range(schema, idx)?])
}

/// Structural schema validation; a prerequisite of every decode operation.
pub fn validate_schema(schema: &[Param]) -> bool {
    check_schema(schema).is_ok()
}

/// `validate_schema` with the rejection reason kept.
pub(crate) fn check_schema(schema: &[Param]) -> Result<(), AbiError> {
    if schema.is_empty() {
        return Err(AbiError::InvalidSchema);
    }
    let top = top_level_len(schema)?;
    for (idx, param) in schema.iter().enumerate() {
        param.shape()?;
        // One level of nesting only: the children region holds no markers.
        if idx >= top && param.atom.is_tuple() {
            return Err(AbiError::InvalidSchema);
        }
    }
    Ok(())
}
