#![warn(missing_docs)]

//! Chain-agnostic identifier types.
//!
//! [CAIP-2] chain identifiers (`eip155:1`) and [CAIP-10] account
//! identifiers (`eip155:1:0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb`)
//! as validated, string-backed value types. Both round-trip losslessly
//! through their canonical string form via [`std::str::FromStr`],
//! [`std::fmt::Display`], and serde.
//!
//! [CAIP-2]: https://chainagnostic.org/CAIPs/caip-2
//! [CAIP-10]: https://chainagnostic.org/CAIPs/caip-10

mod account;
pub use account::*;

mod chain;
pub use chain::*;

mod error;
pub use error::*;
