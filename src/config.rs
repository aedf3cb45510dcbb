//! Client configuration.
//!
//! This module defines the TOML-deserializable configuration shared by all
//! services: credentials, the acting customer, the sandbox flag, and the
//! wire mode. A [`ClientConfig`] value is passed into each service at
//! construction; nothing is held in process-wide state, so several clients
//! with different tenants can coexist in one process.

use serde::Deserialize;

use crate::{
    entity::Customer,
    error::{CifError, Result},
};

/// Wire protocol to use for all operations.
///
/// The mode is selected by configuration, not negotiated at runtime, and
/// there is no automatic failover between channels: an operation uses
/// exactly the channel the mode names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The REST API (JSON bodies, `apikey` header).
    #[default]
    Rest,
    /// The current SOAP API (plaintext password in the security header).
    Soap,
    /// The old SOAP API. Uses the legacy endpoints and emits the password
    /// as a SHA-1 digest in the security header.
    Legacy,
}

/// API credentials, normalized to a single internal representation.
///
/// The REST API authenticates with an API key, which is simply the password
/// half of a username token; the SOAP APIs carry a WS-Security username
/// token. Both forms are accepted:
///
/// ```
/// use postnl_cif::Credentials;
///
/// // REST: a plain API key
/// let rest = Credentials::from("my-api-key");
/// assert_eq!(rest.password, "my-api-key");
/// assert!(rest.username.is_none());
///
/// // Legacy SOAP: full username token with hashed-password behavior
/// let legacy = Credentials::username_token(Some("devc"), "secret", true);
/// assert!(legacy.legacy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Username for the legacy SOAP API. The current APIs do not use one.
    #[serde(default)]
    pub username: Option<String>,
    /// API key (REST) or plaintext password (SOAP).
    pub password: String,
    /// When set, SOAP serialization emits the password as its SHA-1 digest.
    #[serde(default)]
    pub legacy: bool,
}

impl Credentials {
    /// Credentials from a plain REST API key.
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self { username: None, password: key.into(), legacy: false }
    }

    /// Credentials from an explicit username token.
    #[must_use]
    pub fn username_token(
        username: Option<&str>,
        password: impl Into<String>,
        legacy: bool,
    ) -> Self {
        Self { username: username.map(str::to_owned), password: password.into(), legacy }
    }
}

impl From<&str> for Credentials {
    fn from(key: &str) -> Self {
        Self::api_key(key)
    }
}

impl From<String> for Credentials {
    fn from(key: String) -> Self {
        Self::api_key(key)
    }
}

/// Configuration shared by every service of one client.
///
/// Deserializable from TOML:
///
/// ```
/// use postnl_cif::ClientConfig;
///
/// let toml = r#"
///     sandbox = true
///     mode = "rest"
///
///     [credentials]
///     password = "my-api-key"
///
///     [customer]
///     CustomerCode = "DEVC"
///     CustomerNumber = "11223344"
///     CollectionLocation = "123456"
/// "#;
///
/// let config = ClientConfig::from_toml_str(toml).unwrap();
/// assert!(config.sandbox);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// The acting customer; sent along with every request envelope.
    pub customer: Customer,
    /// Target the sandbox endpoints instead of the live ones.
    #[serde(default)]
    pub sandbox: bool,
    /// Wire protocol for all operations.
    #[serde(default)]
    pub mode: Mode,
}

impl ClientConfig {
    /// Creates a configuration from its parts.
    #[must_use]
    pub fn new(
        customer: Customer,
        credentials: impl Into<Credentials>,
        sandbox: bool,
        mode: Mode,
    ) -> Self {
        Self { credentials: credentials.into(), customer, sandbox, mode }
    }

    /// Parses and validates a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::InvalidConfiguration`] if the document does not
    /// parse or if [`validate`](Self::validate) rejects it.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| CifError::InvalidConfiguration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::InvalidConfiguration`] if the password is empty,
    /// or if legacy mode is requested without a username (the old API
    /// requires one).
    pub fn validate(&self) -> Result<()> {
        if self.credentials.password.is_empty() {
            return Err(CifError::InvalidConfiguration(
                "credentials password must not be empty".to_owned(),
            ));
        }

        if self.uses_legacy() && self.credentials.username.is_none() {
            return Err(CifError::InvalidConfiguration(
                "the legacy SOAP API requires a username".to_owned(),
            ));
        }

        Ok(())
    }

    /// Whether SOAP serialization must apply the legacy password digest.
    #[must_use]
    pub fn uses_legacy(&self) -> bool {
        self.mode == Mode::Legacy || self.credentials.legacy
    }
}
