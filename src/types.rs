//! The parameter type model: atomic tags, array layouts, and the shape
//! classes that drive offset resolution.

use crate::error::AbiError;

/// Highest tuple arity a schema may declare.
pub const MAX_TUPLE_ARITY: usize = 20;

/// One tag from the closed set of supported ABI atomic types.
///
/// Everything except `Bytes`, `String` and `Tuple` is elementary and packs
/// into a single 32-byte word. `Tuple(n)` is a marker claiming `n` entries
/// from the children region appended at the end of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    /// 20-byte account address, right-aligned in its word.
    Address,
    /// Single byte, 0 or 1, right-aligned.
    Bool,
    /// 24 bytes (20-byte address plus 4-byte method selector), left-aligned.
    Function,
    /// Unsigned integer of the given bit width (8/16/24/32/64/128/256).
    Uint(usize),
    /// Signed integer of the given bit width (8/16/24/32/64/128/256).
    Int(usize),
    /// `bytesN` with `N` in 1..=32, left-aligned.
    FixedBytes(usize),
    /// Dynamic `bytes`, size-prefixed in the tail.
    Bytes,
    /// Dynamic `string`, size-prefixed in the tail.
    String,
    /// Tuple marker of the given arity.
    Tuple(usize),
}

/// Bit widths the integer tags accept.
const INT_WIDTHS: [usize; 7] = [8, 16, 24, 32, 64, 128, 256];

impl Atom {
    /// Whether the tag (including its payload) is a member of the
    /// enumerated set.
    pub fn is_valid(&self) -> bool {
        match *self {
            Atom::Uint(bits) | Atom::Int(bits) => INT_WIDTHS.contains(&bits),
            Atom::FixedBytes(n) => (1..=32).contains(&n),
            Atom::Tuple(arity) => (1..=MAX_TUPLE_ARITY).contains(&arity),
            _ => true,
        }
    }

    /// Dynamic types live in the tail behind a 32-byte size prefix.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Atom::Bytes | Atom::String)
    }

    #[inline]
    pub fn is_tuple(&self) -> bool {
        matches!(self, Atom::Tuple(_))
    }

    /// Elementary types occupy exactly one word each.
    #[inline]
    pub fn is_elementary(&self) -> bool {
        !self.is_dynamic() && !self.is_tuple()
    }

    /// Decoded byte width of an elementary value; `None` for dynamic and
    /// tuple tags.
    pub fn width(&self) -> Option<usize> {
        match *self {
            Atom::Address => Some(20),
            Atom::Bool => Some(1),
            Atom::Function => Some(24),
            Atom::Uint(bits) | Atom::Int(bits) => Some(bits / 8),
            Atom::FixedBytes(n) => Some(n),
            Atom::Bytes | Atom::String | Atom::Tuple(_) => None,
        }
    }

    /// Whether the value sits in the high bytes of its word. Integers,
    /// `bool` and `address` are right-aligned; `bytesN` and `function` are
    /// left-aligned.
    #[inline]
    pub fn left_aligned(&self) -> bool {
        matches!(self, Atom::FixedBytes(_) | Atom::Function)
    }
}

/// Array layout of a parameter. One dimension only: deeper nesting has no
/// representation here and therefore cannot pass validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A single value.
    Scalar,
    /// `T[n]` with `n > 0`.
    FixedArray(usize),
    /// `T[]`; the element count is carried in the encoding.
    VarArray,
}

/// One schema entry: an atomic tag plus its array layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub atom: Atom,
    pub layout: Layout,
}

impl Param {
    pub const fn scalar(atom: Atom) -> Self {
        Self { atom, layout: Layout::Scalar }
    }

    pub const fn fixed_array(atom: Atom, len: usize) -> Self {
        Self { atom, layout: Layout::FixedArray(len) }
    }

    pub const fn var_array(atom: Atom) -> Self {
        Self { atom, layout: Layout::VarArray }
    }

    /// Classify the parameter into exactly one of the seven shape classes.
    ///
    /// Configurations outside the set (unknown atom payloads, zero-size
    /// fixed arrays) are rejected here, which makes this the per-parameter
    /// half of schema validation.
    pub fn shape(&self) -> Result<Shape, AbiError> {
        if !self.atom.is_valid() {
            return Err(AbiError::InvalidSchema);
        }
        if self.layout == Layout::FixedArray(0) {
            return Err(AbiError::InvalidSchema);
        }
        let shape = match (self.atom, self.layout) {
            (Atom::Tuple(_), _) => Shape::Tuple,
            (a, Layout::Scalar) if a.is_dynamic() => Shape::SingleDyn,
            (_, Layout::Scalar) => Shape::SingleElem,
            (a, Layout::FixedArray(n)) if a.is_dynamic() => Shape::DynFixedArr(n),
            (_, Layout::FixedArray(n)) => Shape::ElemFixedArr(n),
            (a, Layout::VarArray) if a.is_dynamic() => Shape::DynVarArr,
            (_, Layout::VarArray) => Shape::ElemVarArr,
        };
        Ok(shape)
    }
}

/// The six elementary/dynamic shape classes, plus the tuple class that is
/// orthogonal to them. Each class has its own slot interpretation in the
/// offset resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    SingleElem,
    SingleDyn,
    ElemFixedArr(usize),
    ElemVarArr,
    DynFixedArr(usize),
    DynVarArr,
    Tuple,
}

/// Addresses one parameter and, for arrays, one element within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    /// Index into the schema's top-level parameters.
    pub param: usize,
    /// Element index; ignored for scalar parameters.
    pub index: usize,
}

impl Selector {
    pub const fn new(param: usize, index: usize) -> Self {
        Self { param, index }
    }

    /// Selector for a scalar (non-array) parameter.
    pub const fn scalar(param: usize) -> Self {
        Self { param, index: 0 }
    }
}
