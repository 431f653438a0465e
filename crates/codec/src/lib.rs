//! `fimenu-codec` — URL-safe state tokens.
//!
//! A token carries an arbitrary JSON value (in practice a product catalog or a
//! list of selected product ids) inside a query parameter. Encoding is
//! compact (well-known keys are aliased) and decoding is tolerant: any
//! malformed input yields `None`, never a panic.
//!
//! The crate is pure: no state, no IO.

pub mod error;
pub mod keys;
pub mod token;

pub use error::CodecError;
pub use keys::{expand_keys, shorten_keys};
pub use token::{decode, decode_value, encode, encode_value, try_decode_value, MAX_TOKEN_LEN};
