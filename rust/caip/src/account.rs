use crate::{CaipError, ChainId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A [CAIP-10] account identifier string: a chain identifier plus the
/// address of an account on that chain.
///
/// Address case is preserved as given. Ecosystems that compare
/// addresses case-insensitively can fold with
/// [`with_lowercase_address`](AccountId::with_lowercase_address).
///
/// [CAIP-10]: https://chainagnostic.org/CAIPs/caip-10
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccountId {
    chain_id: ChainId,
    address: String,
}

impl AccountId {
    /// Construct an account identifier, validating the address segment.
    pub fn new(chain_id: ChainId, address: impl Into<String>) -> Result<Self, CaipError> {
        let address = address.into();
        if !is_address(&address) {
            return Err(CaipError::InvalidAddress(address));
        }
        Ok(Self { chain_id, address })
    }

    /// The chain this account lives on.
    #[must_use]
    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    /// The address segment, in its original case.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The same account with the address folded to ASCII lowercase.
    ///
    /// Folding cannot leave the address charset, so no validation is
    /// repeated.
    #[must_use]
    pub fn with_lowercase_address(&self) -> Self {
        Self {
            chain_id: self.chain_id.clone(),
            address: self.address.to_ascii_lowercase(),
        }
    }
}

fn is_address(s: &str) -> bool {
    (1..=128).contains(&s.len())
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'%'))
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.address)
    }
}

impl FromStr for AccountId {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.splitn(3, ':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(namespace), Some(reference), Some(address)) => {
                Self::new(ChainId::new(namespace, reference)?, address)
            }
            _ => Err(CaipError::MalformedAccountId(s.to_string())),
        }
    }
}

impl TryFrom<String> for AccountId {
    type Error = CaipError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
