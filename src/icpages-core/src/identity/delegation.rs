use ic_agent::identity::{Delegation, SignedDelegation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DelegationError {
    #[error("failed to parse the delegation chain: {0}")]
    Parse(String),
}

/// One delegation link as the identity provider exports it: hex-encoded
/// public key, expiration as a hex string of nanoseconds since the epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDelegation {
    pub expiration: String,
    pub pubkey: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedJsonDelegation {
    pub delegation: JsonDelegation,
    pub signature: String,
}

/// The delegation chain issued to a session key by a completed authorization
/// flow, in the provider's JSON export format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDelegationChain {
    pub delegations: Vec<SignedJsonDelegation>,
    pub public_key: String,
}

fn parse_expiration(expiration: &str) -> Result<u64, DelegationError> {
    u64::from_str_radix(expiration, 16)
        .map_err(|err| DelegationError::Parse(format!("malformed expiration: {err}")))
}

fn parse_hex(field: &str, value: &str) -> Result<Vec<u8>, DelegationError> {
    hex::decode(value).map_err(|err| DelegationError::Parse(format!("malformed {field}: {err}")))
}

impl JsonDelegationChain {
    /// Nanoseconds since the epoch at which the chain stops being usable,
    /// i.e. the earliest expiration of any link.
    pub fn expiration_ns(&self) -> Result<u64, DelegationError> {
        self.delegations
            .iter()
            .map(|signed| parse_expiration(&signed.delegation.expiration))
            .try_fold(None::<u64>, |earliest, expiration| {
                let expiration = expiration?;
                Ok(Some(earliest.map_or(expiration, |e| e.min(expiration))))
            })?
            .ok_or_else(|| DelegationError::Parse("the delegation chain is empty".to_string()))
    }

    pub fn is_expired(&self, now: SystemTime) -> Result<bool, DelegationError> {
        let now_ns = now
            .duration_since(UNIX_EPOCH)
            .map_err(|err| DelegationError::Parse(err.to_string()))?
            .as_nanos();
        Ok(u128::from(self.expiration_ns()?) < now_ns)
    }

    /// The user's public key the chain delegates from.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, DelegationError> {
        parse_hex("public key", &self.public_key)
    }

    pub fn to_delegations(&self) -> Result<Vec<SignedDelegation>, DelegationError> {
        self.delegations
            .iter()
            .map(|signed| {
                Ok(SignedDelegation {
                    delegation: Delegation {
                        expiration: parse_expiration(&signed.delegation.expiration)?,
                        pubkey: parse_hex("delegation pubkey", &signed.delegation.pubkey)?,
                        targets: None,
                    },
                    signature: parse_hex("signature", &signed.signature)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    fn chain(expiration: &str) -> JsonDelegationChain {
        JsonDelegationChain {
            delegations: vec![SignedJsonDelegation {
                delegation: JsonDelegation {
                    expiration: expiration.to_string(),
                    pubkey: "deadbeef".to_string(),
                },
                signature: "00ff".to_string(),
            }],
            public_key: "c0ffee".to_string(),
        }
    }

    #[test]
    fn parses_the_provider_export_format() {
        let json = r#"{
            "delegations": [
                {
                    "delegation": { "expiration": "17e42bb5d4b2bd00", "pubkey": "deadbeef" },
                    "signature": "00ff"
                }
            ],
            "publicKey": "c0ffee"
        }"#;
        let chain: JsonDelegationChain = serde_json::from_str(json).unwrap();
        assert_eq!(chain.expiration_ns().unwrap(), 0x17e42bb5d4b2bd00);
        assert_eq!(chain.public_key_bytes().unwrap(), vec![0xc0, 0xff, 0xee]);
        let delegations = chain.to_delegations().unwrap();
        assert_eq!(delegations.len(), 1);
        assert_eq!(
            delegations[0].delegation.pubkey,
            vec![0xde, 0xad, 0xbe, 0xef]
        );
        assert_eq!(delegations[0].signature, vec![0x00, 0xff]);
        assert_eq!(delegations[0].delegation.targets, None);
    }

    #[test]
    fn earliest_link_bounds_the_chain() {
        let mut chain = chain("ff");
        chain.delegations.push(SignedJsonDelegation {
            delegation: JsonDelegation {
                expiration: "0f".to_string(),
                pubkey: "aa".to_string(),
            },
            signature: "bb".to_string(),
        });
        assert_eq!(chain.expiration_ns().unwrap(), 0x0f);
    }

    #[test]
    fn expiry_is_compared_in_nanoseconds() {
        let chain = chain("3b9aca00"); // one second past the epoch
        let before = UNIX_EPOCH + Duration::from_millis(500);
        let after = UNIX_EPOCH + Duration::from_secs(2);
        assert!(!chain.is_expired(before).unwrap());
        assert!(chain.is_expired(after).unwrap());
    }

    #[test]
    fn malformed_expiration_is_an_error() {
        let chain = chain("not-hex");
        assert!(chain.expiration_ns().is_err());
    }

    #[test]
    fn empty_chain_is_an_error() {
        let chain = JsonDelegationChain {
            delegations: vec![],
            public_key: "c0ffee".to_string(),
        };
        assert!(chain.expiration_ns().is_err());
    }
}
