//! Azure Key Vault client for managed runs.
//!
//! Authenticates with the managed identity of the compute via the Azure
//! instance-metadata endpoint, then reads secrets over the vault REST API.
//! Timeouts are whatever the HTTP client defaults to.

use serde::Deserialize;

use super::{SecretError, SecretStore};

/// Injected into the job environment by the orchestrator; points at the
/// workspace default key vault, e.g. `https://my-vault.vault.azure.net`.
pub const KEYVAULT_URL_ENV: &str = "AZUREML_KEYVAULT_URL";

const IMDS_TOKEN_URL: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2018-02-01";
const VAULT_RESOURCE: &str = "https://vault.azure.net";
const VAULT_API_VERSION: &str = "7.4";

pub struct KeyVaultStore {
    vault_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SecretBundle {
    value: String,
}

fn parse_token(body: &str) -> Result<String, SecretError> {
    let token: TokenResponse =
        serde_json::from_str(body).map_err(|e| SecretError::Token(e.to_string()))?;
    Ok(token.access_token)
}

fn parse_secret_bundle(name: &str, body: &str) -> Result<String, SecretError> {
    let bundle: SecretBundle = serde_json::from_str(body)
        .map_err(|source| SecretError::Decode { name: name.to_string(), source })?;
    Ok(bundle.value)
}

impl KeyVaultStore {
    /// Build a store pointing at the vault named by `AZUREML_KEYVAULT_URL`.
    pub fn from_env() -> Result<Self, SecretError> {
        let vault_url = std::env::var(KEYVAULT_URL_ENV)
            .map_err(|_| SecretError::Unconfigured(format!("{KEYVAULT_URL_ENV} is not set")))?;
        Ok(Self::new(vault_url))
    }

    pub fn new(vault_url: impl Into<String>) -> Self {
        let vault_url = vault_url.into().trim_end_matches('/').to_string();
        Self { vault_url, client: reqwest::blocking::Client::new() }
    }

    fn access_token(&self) -> Result<String, SecretError> {
        let body = self
            .client
            .get(IMDS_TOKEN_URL)
            .query(&[("api-version", IMDS_API_VERSION), ("resource", VAULT_RESOURCE)])
            .header("Metadata", "true")
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| SecretError::Token(e.to_string()))?;

        parse_token(&body)
    }
}

impl SecretStore for KeyVaultStore {
    fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        let token = self.access_token()?;
        let url = format!("{}/secrets/{name}", self.vault_url);

        let http_err = |source| SecretError::Http { name: name.to_string(), source };

        let response = self
            .client
            .get(&url)
            .query(&[("api-version", VAULT_API_VERSION)])
            .bearer_auth(token)
            .send()
            .map_err(http_err)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SecretError::NotFound(name.to_string()));
        }

        let body = response.error_for_status().map_err(http_err)?.text().map_err(http_err)?;
        parse_secret_bundle(name, &body)
    }
}
