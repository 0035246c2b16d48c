#![warn(missing_docs)]

//! Chain-agnostic capability objects (CACAO).
//!
//! A CACAO is a signed, time-bounded proof that its issuer controlled a
//! blockchain account, optionally scoped to a list of resources. This
//! crate carries the construction side of that boundary: the
//! [`SiweMessage`] payload that gets signed, its canonical plaintext
//! rendering, and the [`Cacao`] container produced from a signed
//! message.
//!
//! Parsing the plaintext back into a message, verifying signatures, and
//! the capability wire encoding all belong to consumers of this crate.

mod cacao;
pub use cacao::*;

mod siwe;
pub use siwe::*;
