use thiserror::Error;

/// Decoding failures.
///
/// The wire format leaves nothing to recover: a malformed schema, an
/// out-of-range selector, or a short buffer ends the call. Callers that only
/// care about success can collapse any of these to the C-style zero return
/// with `unwrap_or(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AbiError {
    /// A read ending at byte `.0` would overrun an input of `.1` bytes.
    #[error("read ending at byte {0} overruns input of {1} bytes")]
    OutOfBounds(usize, usize),
    /// Offset arithmetic wrapped around `usize`.
    #[error("offset arithmetic overflowed")]
    OffsetOverflow,
    /// An offset or length word had nonzero bytes above the low four.
    #[error("offset or length word exceeds the 32-bit window")]
    DirtyWord,
    /// The schema does not describe a decodable set of parameters.
    #[error("schema failed validation")]
    InvalidSchema,
    /// Type index `.0` does not address one of the `.1` top-level parameters.
    #[error("type index {0} out of range for {1} parameters")]
    ParamOutOfRange(usize, usize),
    /// Array index `.0` is past the array length `.1`.
    #[error("array index {0} out of range for length {1}")]
    IndexOutOfRange(usize, usize),
    /// The output buffer holds `.1` bytes but `.0` are needed.
    #[error("output capacity {1} below required {0} bytes")]
    OutputTooSmall(usize, usize),
    /// The selected parameter is not a variable-size array.
    #[error("parameter is not a variable-size array")]
    NotAnArray,
    /// The selected parameter is not a dynamic (`bytes`/`string`) type.
    #[error("parameter is not a dynamic type")]
    NotDynamic,
    /// The outer selector of a tuple operation addresses a non-tuple.
    #[error("parameter is not a tuple")]
    NotATuple,
    /// Tuples have no direct value of their own; members are reached through
    /// the tuple operations.
    #[error("tuple parameters are addressed through the tuple operations")]
    TupleParam,
}
