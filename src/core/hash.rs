//! SHA-256 fingerprints used for change detection.

use crate::domain::model::{Backend, Endpoint};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// One input to [`endpoint_hash`] that may legitimately be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashComponent<'a> {
    Present(&'a str),
    Absent,
}

impl<'a> From<Option<&'a str>> for HashComponent<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(hash) => HashComponent::Present(hash),
            None => HashComponent::Absent,
        }
    }
}

impl<'a> HashComponent<'a> {
    fn as_str(self) -> &'a str {
        match self {
            HashComponent::Present(hash) => hash,
            HashComponent::Absent => "",
        }
    }
}

fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

// Keys are sorted before encoding, so declaration order never affects the hash.
fn canonical_json<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let sorted: BTreeMap<&str, &str> = entries.into_iter().collect();
    let map: Map<String, Value> = sorted
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map).to_string()
}

/// Fingerprint of the environment variables a backend declares.
pub fn environment_variables_hash(backend: &Backend) -> String {
    sha256_hex(&canonical_json(
        backend
            .environment_variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    ))
}

/// Fingerprint of the secret versions an endpoint pins. Unpinned secrets hash as `""`.
pub fn secrets_hash(endpoint: &Endpoint) -> String {
    sha256_hex(&canonical_json(
        endpoint
            .secret_environment_variables
            .iter()
            .map(|s| (s.secret.as_str(), s.version.as_deref().unwrap_or(""))),
    ))
}

/// Combines the three component fingerprints. Absent or empty components are skipped.
pub fn endpoint_hash(source: HashComponent<'_>, env_hash: &str, secrets_hash: &str) -> String {
    let combined: String = [source.as_str(), env_hash, secrets_hash]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    sha256_hex(&combined)
}
