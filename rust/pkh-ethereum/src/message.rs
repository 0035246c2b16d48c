//! Canonical message construction.

use crate::{NONCE_LENGTH, NonceGenerator};
use cacao::SiweMessage;
use caip::AccountId;
use chrono::{Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Purpose text used when the caller supplies no statement.
pub const DEFAULT_STATEMENT: &str =
    "Give this application access to some of your data on Ceramic";

/// Per-call issuance options.
///
/// Only `uri`, `statement`, `nonce`, `expiration_time`, and `resources`
/// influence the built message. The remaining fields exist so option
/// sets produced elsewhere can be passed through unchanged - a bound
/// [`AuthMethod`](crate::AuthMethod) overwrites `domain` on every call,
/// and the builder pins `version`, `address`, `chain_id`, and
/// `issued_at` itself regardless of what the caller put here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthOptions {
    /// Authority requesting the capability. Overwritten with the bound
    /// domain on every issuance.
    pub domain: Option<String>,

    /// Ignored; the address always comes from the bound account.
    pub address: Option<String>,

    /// Human-readable purpose text; defaults to [`DEFAULT_STATEMENT`].
    pub statement: Option<String>,

    /// Resource identifier describing the request context. Becomes the
    /// audience of the issued capability.
    pub uri: String,

    /// Ignored; the message format version is fixed.
    pub version: Option<String>,

    /// Replay-protection token; freshly generated when absent.
    pub nonce: Option<String>,

    /// Ignored; issuance always stamps the current instant.
    pub issued_at: Option<String>,

    /// Expiry instant; defaults to one week after issuance.
    pub expiration_time: Option<String>,

    /// Accepted for compatibility; not stamped by this issuer.
    pub not_before: Option<String>,

    /// Accepted for compatibility; not stamped by this issuer.
    pub request_id: Option<String>,

    /// Ignored; the chain reference comes from the bound account.
    pub chain_id: Option<String>,

    /// Resource URIs the capability should be scoped to.
    pub resources: Option<Vec<String>>,
}

/// Construct the canonical signable message for one issuance.
///
/// Defaults are applied here, once per call: a fresh nonce when the
/// caller supplied none, `issued_at` pinned to the current instant, and
/// an expiry one week after that same instant. `domain` comes from the
/// binding, `address` and `chain_id` from the account; the caller's
/// options for those fields are never consulted. Domain and uri
/// well-formedness is not checked at this stage.
pub fn build_message(
    options: &AuthOptions,
    domain: &str,
    account: &AccountId,
    nonce_source: &dyn NonceGenerator,
) -> SiweMessage {
    let now = Utc::now();
    let one_week_later = now + Duration::days(7);

    SiweMessage {
        domain: domain.to_string(),
        address: account.address().to_string(),
        statement: Some(
            options
                .statement
                .clone()
                .unwrap_or_else(|| DEFAULT_STATEMENT.to_string()),
        ),
        uri: options.uri.clone(),
        version: crate::VERSION.to_string(),
        nonce: options
            .nonce
            .clone()
            .unwrap_or_else(|| nonce_source.alphanumeric(NONCE_LENGTH)),
        issued_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        expiration_time: Some(options.expiration_time.clone().unwrap_or_else(|| {
            one_week_later.to_rfc3339_opts(SecondsFormat::Millis, true)
        })),
        not_before: None,
        request_id: None,
        chain_id: account.chain_id().reference().to_string(),
        resources: options.resources.clone(),
        signature: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SystemNonce;
    use chrono::DateTime;
    use testresult::TestResult;

    /// Always returns the same token.
    struct FixedNonce(&'static str);

    impl NonceGenerator for FixedNonce {
        fn alphanumeric(&self, _length: usize) -> String {
            self.0.to_string()
        }
    }

    fn account() -> AccountId {
        "eip155:137:0xab16a96d359ec26a11e2c2b3d8f8b8942d5bfcdb"
            .parse()
            .unwrap()
    }

    fn options() -> AuthOptions {
        AuthOptions {
            uri: "https://app.example/session".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn it_defaults_nonce_to_ten_fresh_characters() {
        let first = build_message(&options(), "app.example", &account(), &SystemNonce);
        let second = build_message(&options(), "app.example", &account(), &SystemNonce);
        assert_eq!(first.nonce.len(), NONCE_LENGTH);
        assert_eq!(second.nonce.len(), NONCE_LENGTH);
        assert_ne!(first.nonce, second.nonce);
    }

    #[test]
    fn it_respects_a_caller_supplied_nonce() {
        let mut options = options();
        options.nonce = Some("K7aBqn3Wxy".to_string());
        let message = build_message(&options, "app.example", &account(), &SystemNonce);
        assert_eq!(message.nonce, "K7aBqn3Wxy");
    }

    #[test]
    fn it_expires_exactly_one_week_after_issuance() -> TestResult {
        let message = build_message(&options(), "app.example", &account(), &SystemNonce);
        let issued_at = DateTime::parse_from_rfc3339(&message.issued_at)?;
        let expiration =
            DateTime::parse_from_rfc3339(message.expiration_time.as_deref().unwrap())?;
        assert_eq!(expiration - issued_at, Duration::days(7));
        Ok(())
    }

    #[test]
    fn it_round_trips_its_timestamps_through_iso8601() -> TestResult {
        let message = build_message(&options(), "app.example", &account(), &SystemNonce);
        let issued_at = DateTime::parse_from_rfc3339(&message.issued_at)?;
        assert_eq!(
            issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            message.issued_at
        );
        Ok(())
    }

    #[test]
    fn it_ignores_a_spoofed_issued_at() -> TestResult {
        let spoofed = "2000-01-01T00:00:00.000Z";
        let mut options = options();
        options.issued_at = Some(spoofed.to_string());

        let before = Utc::now() - Duration::seconds(1);
        let message = build_message(&options, "app.example", &account(), &SystemNonce);
        let issued_at = DateTime::parse_from_rfc3339(&message.issued_at)?;

        assert_ne!(message.issued_at, spoofed);
        assert!(issued_at >= before);
        Ok(())
    }

    #[test]
    fn it_pins_the_version_and_account_fields() {
        let mut options = options();
        options.version = Some("99".to_string());
        options.address = Some("0xattacker".to_string());
        options.chain_id = Some("666".to_string());

        let message = build_message(&options, "app.example", &account(), &SystemNonce);
        assert_eq!(message.version, crate::VERSION);
        assert_eq!(message.address, account().address());
        assert_eq!(message.chain_id, "137");
    }

    #[test]
    fn it_defaults_the_statement_and_keeps_resources_verbatim() {
        let mut with_resources = options();
        with_resources.resources = Some(vec!["ceramic://*".to_string()]);
        let message = build_message(&with_resources, "app.example", &account(), &SystemNonce);
        assert_eq!(message.statement.as_deref(), Some(DEFAULT_STATEMENT));
        assert_eq!(message.resources.as_deref(), Some(&["ceramic://*".to_string()][..]));

        let message = build_message(&options(), "app.example", &account(), &SystemNonce);
        assert!(message.resources.is_none());
    }

    #[test]
    fn it_builds_deterministically_with_an_injected_nonce_source() {
        let mut options = options();
        options.expiration_time = Some("2030-01-01T00:00:00.000Z".to_string());
        options.statement = Some("Sign in".to_string());

        let first = build_message(&options, "app.example", &account(), &FixedNonce("AAAAAAAAAA"));
        let second = build_message(&options, "app.example", &account(), &FixedNonce("AAAAAAAAAA"));
        assert_eq!(first.nonce, "AAAAAAAAAA");
        // Everything except the issuance instant is reproducible.
        assert_eq!(first.nonce, second.nonce);
        assert_eq!(first.expiration_time, second.expiration_time);
        assert_eq!(first.statement, second.statement);
    }
}
