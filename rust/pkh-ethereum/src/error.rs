//! Failure taxonomy for account resolution and capability issuance.
//!
//! Nothing here is caught or retried internally: every failure
//! propagates to the immediate caller of the failing operation, and a
//! failed issuance never yields a partial capability.

/// A browser context was required but is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("web authentication requires a browser environment")]
pub struct EnvironmentError;

/// Failures of the wallet provider channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider exposes no usable invocation surface.
    #[error("unsupported provider; provider must expose a request or send entry point")]
    Unsupported,

    /// The provider call itself failed. Covers rejection by the user,
    /// a disconnected provider, and error envelopes from legacy
    /// dispatchers.
    #[error("provider call {method:?} failed: {message}")]
    Call {
        /// The RPC method that was being invoked.
        method: String,
        /// Description of the failure, as reported by the provider.
        message: String,
    },
}

impl ProviderError {
    /// Failure of a single provider call.
    pub fn call(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Call {
            method: method.into(),
            message: message.into(),
        }
    }
}

/// A provider response that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed provider response: {0}")]
pub struct MalformedResponseError(pub String);

/// Any failure surfaced while resolving an account or issuing a
/// capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthMethodError {
    /// A browser-only entry point was used outside a window scope.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// The provider channel failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider answered with something unusable.
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),

    /// A supplied or composed identifier was structurally invalid.
    #[error(transparent)]
    Identifier(#[from] caip::CaipError),
}
