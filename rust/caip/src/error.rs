/// Error when parsing or constructing a chain or account identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaipError {
    /// The chain namespace is not 3-8 characters of `[-a-z0-9]`.
    #[error("invalid chain namespace: {0:?}")]
    InvalidNamespace(String),

    /// The chain reference is not 1-32 characters of `[-_a-zA-Z0-9]`.
    #[error("invalid chain reference: {0:?}")]
    InvalidReference(String),

    /// The account address is not 1-128 characters of `[-.%a-zA-Z0-9]`.
    #[error("invalid account address: {0:?}")]
    InvalidAddress(String),

    /// The string is not of the form `namespace:reference`.
    #[error("expected namespace:reference, got: {0}")]
    MalformedChainId(String),

    /// The string is not of the form `namespace:reference:address`.
    #[error("expected namespace:reference:address, got: {0}")]
    MalformedAccountId(String),
}
