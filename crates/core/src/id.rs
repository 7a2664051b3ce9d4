//! Content-derived identifiers used across the domain.
//!
//! Identifiers are never generated randomly: each one is the SHA-256 of a fixed
//! prefix followed by the canonical serialization of the record it names, so the
//! same content always yields the same identifier.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `prefix` followed by `payload`.
pub fn content_digest(prefix: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

/// Identifier of a transfer request (public reference and deduplication key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferCode(String);

/// Identifier of an account deposit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepositSignature(String);

macro_rules! impl_digest_newtype {
    ($t:ty, $prefix:literal) => {
        impl $t {
            /// Prefix hashed in front of the canonical record.
            pub const PREFIX: &'static str = $prefix;

            /// Derive the identifier from a record's canonical serialization.
            pub fn derive(canonical: &str) -> Self {
                Self(content_digest(Self::PREFIX, canonical))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_digest_newtype!(TransferCode, "Transfer:");
impl_digest_newtype!(DepositSignature, "Deposit:");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn digest_is_stable_for_same_content() {
        let a = TransferCode::derive(r#"{"from_iban":"ES9121000418450200051332"}"#);
        let b = TransferCode::derive(r#"{"from_iban":"ES9121000418450200051332"}"#);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn prefix_separates_identifier_kinds() {
        let payload = "{}";
        let code = TransferCode::derive(payload);
        let signature = DepositSignature::derive(payload);
        assert_ne!(code.as_str(), signature.as_str());
    }

    #[test]
    fn prefix_is_hashed_before_payload() {
        assert_eq!(
            TransferCode::derive("").as_str(),
            content_digest("Transfer", ":")
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn derive_is_deterministic_lowercase_hex(payload in ".*") {
            let code = TransferCode::derive(&payload);
            prop_assert_eq!(&code, &TransferCode::derive(&payload));
            prop_assert_eq!(code.as_str().len(), 64);
            prop_assert!(code.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }
}
