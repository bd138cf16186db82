//! Secret resolution for managed (AML) runs.
//!
//! The assembler receives the store as an explicit capability rather than
//! looking up ambient run context, so tests and local runs can substitute
//! their own (or none).

use std::collections::BTreeMap;
use thiserror::Error;

mod keyvault;

pub use keyvault::KeyVaultStore;

/// Naming convention for per-endpoint AOAI keys in the workspace vault.
pub const AOAI_KEY_SUFFIX: &str = "-aoai-key";

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret store is not configured: {0}")]
    Unconfigured(String),

    #[error("failed to acquire managed-identity token: {0}")]
    Token(String),

    #[error("secret not found in vault: {0}")]
    NotFound(String),

    #[error("secret store request failed for {name}")]
    Http {
        name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed secret store response for {name}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A store that can resolve named secrets. Implemented by [`KeyVaultStore`]
/// for managed runs; tests use in-memory fakes.
pub trait SecretStore {
    fn get_secret(&self, name: &str) -> Result<String, SecretError>;
}

/// Resolve the `<endpoint-name>-aoai-key` secret for each endpoint name.
///
/// With no store (local/debug runs) the map is empty; manual overrides for
/// local debugging go through a fake store here. A missing secret aborts the
/// whole run.
pub fn endpoint_key_map(
    endpoint_names: &[&str],
    store: Option<&dyn SecretStore>,
) -> Result<BTreeMap<String, String>, SecretError> {
    let mut key_map = BTreeMap::new();
    let Some(store) = store else {
        return Ok(key_map);
    };

    for name in endpoint_names {
        let secret = store.get_secret(&format!("{name}{AOAI_KEY_SUFFIX}"))?;
        key_map.insert((*name).to_string(), secret);
    }

    Ok(key_map)
}
