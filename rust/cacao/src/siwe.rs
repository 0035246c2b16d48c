use serde::{Deserialize, Serialize};

/// A [Sign-In with Ethereum][EIP-4361] message.
///
/// Fields are carried in their wire form: timestamps are ISO-8601
/// strings and the chain id is the bare CAIP-2 reference (`"1"` for
/// mainnet). A message is built once, rendered with
/// [`signable_string`](SiweMessage::signable_string), signed exactly
/// once, and then converted into a [`Cacao`](crate::Cacao).
///
/// [EIP-4361]: https://eips.ethereum.org/EIPS/eip-4361
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiweMessage {
    /// Authority requesting the signature.
    pub domain: String,

    /// Address of the account performing the signing.
    pub address: String,

    /// Human-readable assertion the user signs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,

    /// Resource identifier describing the request context.
    pub uri: String,

    /// Version of the message format.
    pub version: String,

    /// Replay-protection token.
    pub nonce: String,

    /// Instant the message was issued, ISO-8601.
    pub issued_at: String,

    /// Instant the message stops being valid, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,

    /// Instant the message becomes valid, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,

    /// System-specific request identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// CAIP-2 reference of the chain the account lives on.
    pub chain_id: String,

    /// Resource URIs the resulting capability is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,

    /// Signature over [`signable_string`](SiweMessage::signable_string),
    /// once obtained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl SiweMessage {
    /// Render the canonical plaintext that gets signed.
    ///
    /// The layout is fixed by EIP-4361 and reproduced byte-for-byte by
    /// every verifier, so the formatting here is part of the signature
    /// contract. When the statement is absent the preamble keeps its
    /// separator line, leaving two blank lines before the field block.
    #[must_use]
    pub fn signable_string(&self) -> String {
        let mut message = format!(
            "{} wants you to sign in with your Ethereum account:\n{}\n\n",
            self.domain, self.address
        );
        if let Some(statement) = &self.statement {
            message.push_str(statement);
            message.push('\n');
        }

        let mut fields = vec![
            format!("URI: {}", self.uri),
            format!("Version: {}", self.version),
            format!("Chain ID: {}", self.chain_id),
            format!("Nonce: {}", self.nonce),
            format!("Issued At: {}", self.issued_at),
        ];
        if let Some(expiration_time) = &self.expiration_time {
            fields.push(format!("Expiration Time: {expiration_time}"));
        }
        if let Some(not_before) = &self.not_before {
            fields.push(format!("Not Before: {not_before}"));
        }
        if let Some(request_id) = &self.request_id {
            fields.push(format!("Request ID: {request_id}"));
        }
        if let Some(resources) = &self.resources {
            let mut listing = String::from("Resources:");
            for resource in resources {
                listing.push_str("\n- ");
                listing.push_str(resource);
            }
            fields.push(listing);
        }

        message.push('\n');
        message.push_str(&fields.join("\n"));
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> SiweMessage {
        SiweMessage {
            domain: "service.example".to_string(),
            address: "0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb".to_string(),
            statement: Some("I accept the ServiceOrg Terms of Service".to_string()),
            uri: "https://service.example/login".to_string(),
            version: "1".to_string(),
            nonce: "32891757".to_string(),
            issued_at: "2021-09-30T16:25:24.000Z".to_string(),
            expiration_time: None,
            not_before: None,
            request_id: None,
            chain_id: "1".to_string(),
            resources: None,
            signature: None,
        }
    }

    #[test]
    fn it_renders_the_canonical_plaintext() {
        let expected = "service.example wants you to sign in with your Ethereum account:\n\
            0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb\n\
            \n\
            I accept the ServiceOrg Terms of Service\n\
            \n\
            URI: https://service.example/login\n\
            Version: 1\n\
            Chain ID: 1\n\
            Nonce: 32891757\n\
            Issued At: 2021-09-30T16:25:24.000Z";
        assert_eq!(message().signable_string(), expected);
    }

    #[test]
    fn it_keeps_the_separator_line_without_a_statement() {
        let mut message = message();
        message.statement = None;
        let expected = "service.example wants you to sign in with your Ethereum account:\n\
            0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb\n\
            \n\
            \n\
            URI: https://service.example/login\n\
            Version: 1\n\
            Chain ID: 1\n\
            Nonce: 32891757\n\
            Issued At: 2021-09-30T16:25:24.000Z";
        assert_eq!(message.signable_string(), expected);
    }

    #[test]
    fn it_appends_optional_fields_in_order() {
        let mut message = message();
        message.expiration_time = Some("2021-10-07T16:25:24.000Z".to_string());
        message.not_before = Some("2021-09-30T16:25:24.000Z".to_string());
        message.request_id = Some("a1b2c3".to_string());
        message.resources = Some(vec![
            "ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq".to_string(),
            "https://service.example/docs".to_string(),
        ]);

        let rendered = message.signable_string();
        let tail = "Issued At: 2021-09-30T16:25:24.000Z\n\
            Expiration Time: 2021-10-07T16:25:24.000Z\n\
            Not Before: 2021-09-30T16:25:24.000Z\n\
            Request ID: a1b2c3\n\
            Resources:\n\
            - ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq\n\
            - https://service.example/docs";
        assert!(rendered.ends_with(tail), "unexpected tail in:\n{rendered}");
    }

    #[test]
    fn it_omits_absent_fields_from_json() {
        let value = serde_json::to_value(message()).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("issuedAt"));
        assert!(object.contains_key("chainId"));
        assert!(!object.contains_key("expirationTime"));
        assert!(!object.contains_key("signature"));
    }
}
