#![warn(missing_docs)]

//! Ethereum account authentication for capability-based systems.
//!
//! This crate turns control of an Ethereum account into a portable,
//! verifiable capability object: it builds a canonical [Sign-In with
//! Ethereum][EIP-4361] message, hands it to an external wallet provider
//! for signing, and wraps the signed message into a [`Cacao`].
//!
//! # Overview
//!
//! 1. Resolve the account's chain context with [`get_account_id`],
//!    which asks the provider for the active chain.
//! 2. Bind an [`AuthMethod`] once per application context - with
//!    [`native::get_auth_method`] (host applications supply the domain
//!    themselves) or [`web::get_auth_method`] (browsers derive it from
//!    the current page).
//! 3. Call [`AuthMethod::issue`] once per capability. Each call builds
//!    a fresh message with its own nonce and timestamps, performs
//!    exactly one `personal_sign` round-trip, and returns the wrapped
//!    capability.
//!
//! ```no_run
//! # async fn example(provider: impl pkh_ethereum::WalletProvider) -> Result<(), pkh_ethereum::AuthMethodError> {
//! use pkh_ethereum::{AuthOptions, get_account_id, native};
//!
//! let account = get_account_id(&provider, "0xAb16a96D359eC26a11e2C2b3d8f8B8942d5Bfcdb").await?;
//! let auth_method = native::get_auth_method(provider, &account, "MyApp");
//!
//! let capability = auth_method
//!     .issue(AuthOptions {
//!         uri: "https://app.example/session".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # let _ = capability;
//! # Ok(())
//! # }
//! ```
//!
//! Signature verification, key custody, and capability persistence are
//! deliberately left to the surrounding system; a failed or rejected
//! signing request surfaces as an error with no partial capability.
//!
//! [EIP-4361]: https://eips.ethereum.org/EIPS/eip-4361

mod account;
pub use account::*;

mod auth;
pub use auth::*;

mod error;
pub use error::*;

mod message;
pub use message::*;

mod nonce;
pub use nonce::*;

mod sync;
pub use sync::*;

mod transport;
pub use transport::*;

pub mod native;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod web;

pub use cacao::{Cacao, SiweMessage};
pub use caip::{AccountId, CaipError, ChainId};

/// Version tag of the signed message format. Fixed; never taken from
/// caller options.
pub const VERSION: &str = "1";

/// CAIP-2 namespace for Ethereum chains.
pub const CHAIN_NAMESPACE: &str = "eip155";
