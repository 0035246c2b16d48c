//! Account identity against the provider's chain context.

use crate::{AuthMethodError, MalformedResponseError, WalletProvider, invoke};
use caip::{AccountId, ChainId};

/// Return a copy of `account` with its address folded to lowercase.
///
/// Checksummed and plain spellings name the same account, so every
/// account entering the issuance flow is pinned to the lowercase form;
/// the chain fields pass through untouched. Idempotent.
#[must_use]
pub fn normalize_account_id(account: &AccountId) -> AccountId {
    account.with_lowercase_address()
}

/// Ask the provider for its active chain id, as a decimal integer.
async fn request_chain_id<P>(provider: &P) -> Result<u64, AuthMethodError>
where
    P: WalletProvider + ?Sized,
{
    let value = invoke(provider, "eth_chainId", vec![]).await?;
    let hex = value.as_str().ok_or_else(|| {
        MalformedResponseError(format!("expected a chain id string, got: {value}"))
    })?;
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    let chain_id = u64::from_str_radix(digits, 16).map_err(|_| {
        MalformedResponseError(format!("chain id is not a hex integer: {hex:?}"))
    })?;
    Ok(chain_id)
}

/// Resolve the fully-qualified account identifier for `address`.
///
/// Performs one provider round-trip to discover the active chain and
/// composes `eip155:<chain>:<address>` with the address lowercased.
/// Transport failures propagate as-is; an unparseable chain id fails as
/// a [`MalformedResponseError`].
pub async fn get_account_id<P>(provider: &P, address: &str) -> Result<AccountId, AuthMethodError>
where
    P: WalletProvider + ?Sized,
{
    let reference = request_chain_id(provider).await?;
    let chain_id = ChainId::new(crate::CHAIN_NAMESPACE, reference.to_string())?;
    Ok(AccountId::new(chain_id, address.to_lowercase())?)
}
