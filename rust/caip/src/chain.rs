use crate::CaipError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A [CAIP-2] chain identifier string like `eip155:1`.
///
/// The namespace names a chain family (`eip155` for Ethereum-style
/// chains) and the reference selects a chain within it (`1` for
/// mainnet).
///
/// [CAIP-2]: https://chainagnostic.org/CAIPs/caip-2
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChainId {
    namespace: String,
    reference: String,
}

impl ChainId {
    /// Construct a chain identifier, validating both segments.
    pub fn new(
        namespace: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<Self, CaipError> {
        let namespace = namespace.into();
        let reference = reference.into();
        if !is_namespace(&namespace) {
            return Err(CaipError::InvalidNamespace(namespace));
        }
        if !is_reference(&reference) {
            return Err(CaipError::InvalidReference(reference));
        }
        Ok(Self {
            namespace,
            reference,
        })
    }

    /// The chain family segment, e.g. `eip155`.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The chain selector segment, e.g. `1` for Ethereum mainnet.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

fn is_namespace(s: &str) -> bool {
    (3..=8).contains(&s.len())
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn is_reference(s: &str) -> bool {
    (1..=32).contains(&s.len())
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

impl FromStr for ChainId {
    type Err = CaipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, reference) = s
            .split_once(':')
            .ok_or_else(|| CaipError::MalformedChainId(s.to_string()))?;
        if reference.contains(':') {
            return Err(CaipError::MalformedChainId(s.to_string()));
        }
        Self::new(namespace, reference)
    }
}

impl TryFrom<String> for ChainId {
    type Error = CaipError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for ChainId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    #[test]
    fn it_round_trips_through_canonical_string() -> TestResult {
        let chain_id: ChainId = "eip155:137".parse()?;
        assert_eq!(chain_id.namespace(), "eip155");
        assert_eq!(chain_id.reference(), "137");
        assert_eq!(chain_id.to_string(), "eip155:137");
        Ok(())
    }

    #[test]
    fn it_rejects_malformed_strings() {
        assert!("eip155".parse::<ChainId>().is_err());
        assert!("eip155:1:extra".parse::<ChainId>().is_err());
        assert!("EIP155:1".parse::<ChainId>().is_err());
        assert!("ei:1".parse::<ChainId>().is_err());
        assert!("eip155:".parse::<ChainId>().is_err());
    }

    #[test]
    fn it_serializes_as_a_string() -> TestResult {
        let chain_id: ChainId = "eip155:1".parse()?;
        assert_eq!(serde_json::to_value(&chain_id)?, "eip155:1");
        let parsed: ChainId = serde_json::from_value("eip155:1".into())?;
        assert_eq!(parsed, chain_id);
        Ok(())
    }
}
