use crate::SiweMessage;
use serde::{Deserialize, Serialize};

/// Header tag for capabilities derived from SIWE messages.
pub const HEADER_EIP4361: &str = "eip4361";

/// Signature tag for `personal_sign` (EIP-191) signatures.
pub const SIGNATURE_EIP191: &str = "eip191";

/// A chain-agnostic capability object: a signed, time-bounded proof of
/// account control, optionally scoped to a resource list.
///
/// The serialized layout uses the container's canonical short keys:
/// `h` (header), `p` (payload), `s` (signature).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cacao {
    /// Names the message format the payload was derived from.
    #[serde(rename = "h")]
    pub header: CacaoHeader,

    /// The capability claims.
    #[serde(rename = "p")]
    pub payload: CacaoPayload,

    /// Proof signature; absent until the message has been signed.
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub signature: Option<CacaoSignature>,
}

/// Container header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacaoHeader {
    /// Message format tag, [`HEADER_EIP4361`] for SIWE-derived
    /// capabilities.
    #[serde(rename = "t")]
    pub kind: String,
}

/// Claims carried by a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacaoPayload {
    /// Authority the capability was requested by.
    pub domain: String,

    /// Account the capability was issued by, as a `did:pkh:` URI.
    pub iss: String,

    /// Resource identifier the capability is addressed to.
    pub aud: String,

    /// Version of the source message format.
    pub version: String,

    /// Replay-protection token from the source message.
    pub nonce: String,

    /// Issued-at instant, ISO-8601.
    pub iat: String,

    /// Not-valid-before instant, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<String>,

    /// Expiration instant, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<String>,

    /// Human-readable purpose text the user signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,

    /// System-specific request identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Resource URIs the capability is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

/// Proof signature attached to a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacaoSignature {
    /// Signature scheme tag, [`SIGNATURE_EIP191`] for `personal_sign`
    /// output.
    #[serde(rename = "t")]
    pub kind: String,

    /// The raw signature string as returned by the signer.
    #[serde(rename = "s")]
    pub signature: String,
}

impl Cacao {
    /// Convert a SIWE message into a capability object.
    ///
    /// This is the only way a capability is produced: ownership of the
    /// message (signed or not) transfers in, the capability transfers
    /// out. A signature on the message becomes an EIP-191 signature
    /// container; optional claims map only when present.
    #[must_use]
    pub fn from_siwe_message(message: SiweMessage) -> Self {
        Self {
            header: CacaoHeader {
                kind: HEADER_EIP4361.to_string(),
            },
            payload: CacaoPayload {
                domain: message.domain,
                iss: format!(
                    "did:pkh:eip155:{}:{}",
                    message.chain_id, message.address
                ),
                aud: message.uri,
                version: message.version,
                nonce: message.nonce,
                iat: message.issued_at,
                nbf: message.not_before,
                exp: message.expiration_time,
                statement: message.statement,
                request_id: message.request_id,
                resources: message.resources,
            },
            signature: message.signature.map(|signature| CacaoSignature {
                kind: SIGNATURE_EIP191.to_string(),
                signature,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    fn signed_message() -> SiweMessage {
        SiweMessage {
            domain: "service.example".to_string(),
            address: "0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb".to_string(),
            statement: Some("Give this application access to some of your data".to_string()),
            uri: "https://service.example/login".to_string(),
            version: "1".to_string(),
            nonce: "K7aBqn3Wxy".to_string(),
            issued_at: "2021-09-30T16:25:24.000Z".to_string(),
            expiration_time: Some("2021-10-07T16:25:24.000Z".to_string()),
            not_before: None,
            request_id: None,
            chain_id: "1".to_string(),
            resources: Some(vec!["ceramic://*".to_string()]),
            signature: Some("0xdeadbeef".to_string()),
        }
    }

    #[test]
    fn it_maps_the_issuer_to_a_pkh_did() {
        let cacao = Cacao::from_siwe_message(signed_message());
        assert_eq!(
            cacao.payload.iss,
            "did:pkh:eip155:1:0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb"
        );
        assert_eq!(cacao.payload.aud, "https://service.example/login");
        assert_eq!(cacao.payload.iat, "2021-09-30T16:25:24.000Z");
        assert_eq!(cacao.payload.exp.as_deref(), Some("2021-10-07T16:25:24.000Z"));
        assert_eq!(cacao.payload.resources.as_deref(), Some(&["ceramic://*".to_string()][..]));
        assert_eq!(cacao.header.kind, HEADER_EIP4361);
    }

    #[test]
    fn it_carries_the_signature_as_eip191() {
        let cacao = Cacao::from_siwe_message(signed_message());
        let signature = cacao.signature.expect("signed message must carry proof");
        assert_eq!(signature.kind, SIGNATURE_EIP191);
        assert_eq!(signature.signature, "0xdeadbeef");
    }

    #[test]
    fn it_leaves_the_proof_absent_for_unsigned_messages() {
        let mut message = signed_message();
        message.signature = None;
        message.expiration_time = None;
        message.statement = None;
        message.resources = None;

        let cacao = Cacao::from_siwe_message(message);
        assert!(cacao.signature.is_none());
        assert!(cacao.payload.exp.is_none());
        assert!(cacao.payload.statement.is_none());
        assert!(cacao.payload.resources.is_none());
    }

    #[test]
    fn it_serializes_with_the_container_keys() -> TestResult {
        let value = serde_json::to_value(Cacao::from_siwe_message(signed_message()))?;
        let object = value.as_object().unwrap();
        assert!(object.contains_key("h"));
        assert!(object.contains_key("p"));
        assert!(object.contains_key("s"));
        assert_eq!(value["h"]["t"], "eip4361");
        assert_eq!(value["s"]["t"], "eip191");
        assert!(!value["p"].as_object().unwrap().contains_key("requestId"));
        Ok(())
    }
}
