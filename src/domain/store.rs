use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MODE_STORE_SETTING: &str = "Paypal.Mode";
pub const API_USERNAME_STORE_SETTING: &str = "Paypal.APIUsername";
pub const API_PASSWORD_STORE_SETTING: &str = "Paypal.APIPassword";
pub const API_SIGNATURE_STORE_SETTING: &str = "Paypal.APISignature";

pub const MODE_CONFIG_KEY: &str = "mode";
pub const USERNAME_CONFIG_KEY: &str = "account1.apiUsername";
pub const PASSWORD_CONFIG_KEY: &str = "account1.apiPassword";
pub const SIGNATURE_CONFIG_KEY: &str = "account1.apiSignature";

/// Store setting name paired with the key the processor SDK configuration uses.
const CONFIG_MAPPING: [(&str, &str); 4] = [
    (MODE_STORE_SETTING, MODE_CONFIG_KEY),
    (API_USERNAME_STORE_SETTING, USERNAME_CONFIG_KEY),
    (API_PASSWORD_STORE_SETTING, PASSWORD_CONFIG_KEY),
    (API_SIGNATURE_STORE_SETTING, SIGNATURE_CONFIG_KEY),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSetting {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl StoreSetting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Public base URL of the storefront. May be empty for stores that are
    /// not published yet.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub settings: Vec<StoreSetting>,
}

impl Store {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            url: url.into(),
            settings: Vec::new(),
        }
    }

    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.push(StoreSetting::new(name, value));
        self
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    /// Reads a named setting. Absent settings and empty values both fail with
    /// `ConfigMissing`.
    pub fn setting(&self, name: &str) -> Result<&str> {
        self.settings
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.value.as_deref())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| GatewayError::ConfigMissing(name.to_string()))
    }
}

/// Which processor environment a store's credentials belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Live,
}

impl Environment {
    /// Anything other than `live` is treated as sandbox.
    pub fn from_mode(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("live") {
            Self::Live
        } else {
            Self::Sandbox
        }
    }

    /// Hosted page the buyer is sent to in order to authorize the payment.
    pub fn checkout_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://www.sandbox.paypal.com/cgi-bin/webscr",
            Self::Live => "https://www.paypal.com/cgi-bin/webscr",
        }
    }
}

/// Per-call processor configuration derived from store settings.
///
/// Built fresh for every operation and never persisted. `Debug` redacts the
/// credentials.
#[derive(Clone, PartialEq)]
pub struct GatewayConfig {
    values: BTreeMap<String, String>,
}

impl GatewayConfig {
    pub fn from_store(store: &Store) -> Result<Self> {
        let mut values = BTreeMap::new();
        for (setting, key) in CONFIG_MAPPING {
            values.insert(key.to_string(), store.setting(setting)?.to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn mode(&self) -> &str {
        self.get(MODE_CONFIG_KEY).unwrap_or_default()
    }

    pub fn environment(&self) -> Environment {
        Environment::from_mode(self.mode())
    }

    pub fn username(&self) -> &str {
        self.get(USERNAME_CONFIG_KEY).unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.get(PASSWORD_CONFIG_KEY).unwrap_or_default()
    }

    pub fn signature(&self) -> &str {
        self.get(SIGNATURE_CONFIG_KEY).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("mode", &self.mode())
            .field("username", &self.username())
            .field("password", &"***")
            .field("signature", &"***")
            .finish()
    }
}
