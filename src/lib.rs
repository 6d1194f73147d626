#![no_std]

//! Random-access decoder for Ethereum contract-call ABI payloads.
//!
//! Given a schema (the typed parameter list of a function signature) and an
//! ABI-encoded argument blob, this crate extracts one selected value at a
//! time: a parameter, an array element, or a tuple member. Nothing else in
//! the payload is touched, no tree is materialized, and the core allocates
//! nothing; results are copied into caller-supplied buffers.
//!
//! The argument region is expected without its 4-byte method selector; use
//! [`skip_selector`] to strip one off a raw call payload.
//!
//! ```
//! use rabi_rs::{decode_param, Atom, Param, Selector};
//!
//! // baz(uint32,bool) called with (69, true)
//! let schema = [Param::scalar(Atom::Uint(32)), Param::scalar(Atom::Bool)];
//! let mut data = [0u8; 64];
//! data[31] = 69;
//! data[63] = 1;
//!
//! let mut out = [0u8; 4];
//! assert_eq!(decode_param(&mut out, &schema, Selector::scalar(0), &data), Ok(4));
//! assert_eq!(u32::from_be_bytes(out), 69);
//! ```

#[cfg(test)]
extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod decoder;
pub mod error;
pub mod schema;
pub mod types;

mod offset;
mod word;

pub use decoder::{
    array_length, decode_param, decode_tuple_param, param_size, read_selector, skip_selector,
    tuple_array_length,
};
pub use error::AbiError;
pub use schema::{tuple_children, validate_schema};
pub use types::{Atom, Layout, Param, Selector, Shape, MAX_TUPLE_ARITY};
