//! Service configuration.
//!
//! A `ServiceConfig` can be deserialized from any serde format or read from
//! `<PREFIX>_*` environment variables. It feeds both `DiscoveryClient`
//! (endpoint, version, default headers) and `UreqTransport` (credentials,
//! timeout).

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transport::Authenticator;

pub const DEFAULT_URL: &str = "https://gateway.watsonplatform.net/discovery/api";
pub const DEFAULT_ENV_PREFIX: &str = "DISCOVERY";

/// Credential settings, tagged by `auth_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "auth_type", rename_all = "lowercase")]
pub enum AuthConfig {
    #[default]
    NoAuth,
    Basic { username: String, password: String },
    ApiKey { apikey: String },
    Bearer { bearer_token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// API version date sent as `?version=` on every call.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            version: None,
            auth: AuthConfig::default(),
            default_headers: BTreeMap::new(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn new(url: &str, version: &str) -> Self {
        Self {
            url: url.to_string(),
            version: Some(version.to_string()),
            ..Default::default()
        }
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Read `<PREFIX>_URL`, `<PREFIX>_VERSION`, `<PREFIX>_AUTH_TYPE` and the
    /// matching credential variables from the process environment.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading through `lookup`.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{prefix}_{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &str| {
            var(name).ok_or_else(|| Error::validation(format!("{prefix}_{name} is not set")))
        };

        let auth_type = match var("AUTH_TYPE") {
            Some(value) => value.to_ascii_lowercase(),
            // Infer from whichever credential is present.
            None if var("APIKEY").is_some() => "apikey".to_string(),
            None if var("BEARER_TOKEN").is_some() => "bearer".to_string(),
            None if var("USERNAME").is_some() => "basic".to_string(),
            None => "noauth".to_string(),
        };
        let auth = match auth_type.as_str() {
            "noauth" => AuthConfig::NoAuth,
            "basic" => AuthConfig::Basic {
                username: require("USERNAME")?,
                password: require("PASSWORD")?,
            },
            "apikey" | "iam" => AuthConfig::ApiKey { apikey: require("APIKEY")? },
            "bearer" | "bearertoken" => AuthConfig::Bearer { bearer_token: require("BEARER_TOKEN")? },
            other => {
                return Err(Error::validation(format!("unknown {prefix}_AUTH_TYPE '{other}'")));
            }
        };

        let timeout_secs = match var("TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
                Error::validation(format!("{prefix}_TIMEOUT_SECS '{raw}' is not a number: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            url: var("URL").unwrap_or_else(default_url),
            version: var("VERSION"),
            auth,
            default_headers: BTreeMap::new(),
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn authenticator(&self) -> Result<Authenticator> {
        let non_empty = |field: &str, value: &str| {
            if value.is_empty() {
                Err(Error::validation(format!("{field} must not be empty")))
            } else {
                Ok(value.to_string())
            }
        };
        Ok(match &self.auth {
            AuthConfig::NoAuth => Authenticator::NoAuth,
            AuthConfig::Basic { username, password } => Authenticator::Basic {
                username: non_empty("username", username)?,
                password: non_empty("password", password)?,
            },
            AuthConfig::ApiKey { apikey } => Authenticator::ApiKey(non_empty("apikey", apikey)?),
            AuthConfig::Bearer { bearer_token } => {
                Authenticator::Bearer(non_empty("bearer_token", bearer_token)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = ServiceConfig::from_lookup(
            "DISCOVERY",
            lookup(&[
                ("DISCOVERY_URL", "http://localhost:3000"),
                ("DISCOVERY_VERSION", "2019-04-30"),
                ("DISCOVERY_APIKEY", "k"),
                ("DISCOVERY_TIMEOUT_SECS", "15"),
            ]),
        )
        .unwrap();
        assert_eq!(config.url, "http://localhost:3000");
        assert_eq!(config.version.as_deref(), Some("2019-04-30"));
        assert_eq!(config.auth, AuthConfig::ApiKey { apikey: "k".into() });
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServiceConfig::from_lookup("DISCOVERY", lookup(&[])).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.version, None);
        assert_eq!(config.auth, AuthConfig::NoAuth);
    }

    #[test]
    fn basic_auth_requires_password() {
        let err = ServiceConfig::from_lookup(
            "DISCOVERY",
            lookup(&[("DISCOVERY_AUTH_TYPE", "basic"), ("DISCOVERY_USERNAME", "u")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("DISCOVERY_PASSWORD"));
    }

    #[test]
    fn unknown_auth_type_is_rejected() {
        let err = ServiceConfig::from_lookup("D", lookup(&[("D_AUTH_TYPE", "kerberos")])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn deserializes_from_json() {
        let config: ServiceConfig = serde_json::from_str(
            r#"{
                "version": "2019-04-30",
                "auth": {"auth_type": "bearer", "bearer_token": "t"},
                "default_headers": {"X-Watson-Learning-Opt-Out": "true"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.authenticator().unwrap(), Authenticator::Bearer("t".into()));
        assert_eq!(config.default_headers.len(), 1);
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let config = ServiceConfig::new("http://x", "v").with_auth(AuthConfig::ApiKey { apikey: String::new() });
        assert!(matches!(config.authenticator(), Err(Error::Validation(_))));
    }
}
