//! Browser-context authentication.
//!
//! Only exists on `wasm32-unknown-unknown`: the domain of every issued
//! capability is the host authority of the page the code runs in, read
//! once at binding time.

use crate::{AuthMethod, AuthMethodError, EnvironmentError, WalletProvider};
use caip::AccountId;

/// Bind an authentication method for `account` in the current page's
/// context.
///
/// The message domain is `window.location.hostname`. Fails with
/// [`EnvironmentError`] outside a window scope - for example in a
/// worker, where no page identity is available.
pub fn get_auth_method<P>(provider: P, account: &AccountId) -> Result<AuthMethod<P>, AuthMethodError>
where
    P: WalletProvider,
{
    let window = web_sys::window().ok_or(EnvironmentError)?;
    let domain = window.location().hostname().map_err(|_| EnvironmentError)?;
    Ok(AuthMethod::new(provider, account, domain))
}
