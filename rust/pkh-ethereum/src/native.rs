//! Application-context authentication.
//!
//! For hosts that are not browsers - daemons, CLIs, tests - where no
//! page identity exists and the application names itself.

use crate::{AuthMethod, WalletProvider};
use caip::AccountId;

/// Bind an authentication method for `account` in a host-application
/// context.
///
/// `app_name` becomes the domain of every message this method signs;
/// per-call options cannot override it. No environment precondition is
/// checked.
pub fn get_auth_method<P>(provider: P, account: &AccountId, app_name: &str) -> AuthMethod<P>
where
    P: WalletProvider,
{
    AuthMethod::new(provider, account, app_name)
}
