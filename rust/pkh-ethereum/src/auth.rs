//! Bound authentication methods.

use crate::{
    AuthMethodError, AuthOptions, MalformedResponseError, NonceGenerator, SystemNonce,
    WalletProvider, build_message, invoke, normalize_account_id,
};
use cacao::Cacao;
use caip::AccountId;
use serde_json::Value;
use std::fmt;

/// A reusable authentication method bound to a provider, an account,
/// and a domain.
///
/// Binding happens once per session or application context; every
/// [`issue`](AuthMethod::issue) call afterwards produces one fresh
/// capability. The captured bindings are read-only, so a single method
/// can serve concurrent issuance calls - whether the provider accepts
/// concurrent signing requests is the provider's own affair, and no
/// timeout is imposed on it here.
pub struct AuthMethod<P> {
    provider: P,
    account: AccountId,
    domain: String,
    nonce_source: Box<dyn NonceGenerator>,
}

impl<P> AuthMethod<P>
where
    P: WalletProvider,
{
    pub(crate) fn new(provider: P, account: &AccountId, domain: impl Into<String>) -> Self {
        Self {
            provider,
            account: account.clone(),
            domain: domain.into(),
            nonce_source: Box::new(SystemNonce),
        }
    }

    /// Replace the nonce source.
    ///
    /// Deterministic sources belong in tests only; nonces are the
    /// replay protection of issued capabilities and must stay
    /// unpredictable in production.
    #[must_use]
    pub fn with_nonce_source(mut self, nonce_source: impl NonceGenerator + 'static) -> Self {
        self.nonce_source = Box::new(nonce_source);
        self
    }

    /// The domain every issued capability is bound to.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The account this method issues capabilities for.
    #[must_use]
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Issue one capability.
    ///
    /// The bound domain overwrites whatever `options.domain` carries -
    /// callers cannot re-point a method after binding. The canonical
    /// message string and the claimed address are then sent to the
    /// provider as the two `personal_sign` parameters, in that fixed
    /// order. Any provider failure aborts the call as-is; no partial
    /// capability is ever returned and nothing is retried.
    pub async fn issue(&self, options: AuthOptions) -> Result<Cacao, AuthMethodError> {
        let account = normalize_account_id(&self.account);
        let mut message =
            build_message(&options, &self.domain, &account, self.nonce_source.as_ref());

        let signature = invoke(
            &self.provider,
            "personal_sign",
            vec![
                Value::String(message.signable_string()),
                Value::String(account.address().to_string()),
            ],
        )
        .await?;
        let signature = signature.as_str().ok_or_else(|| {
            MalformedResponseError(format!("expected a signature string, got: {signature}"))
        })?;

        message.signature = Some(signature.to_string());
        Ok(Cacao::from_siwe_message(message))
    }
}

impl<P> fmt::Debug for AuthMethod<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthMethod")
            .field("account", &self.account)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
