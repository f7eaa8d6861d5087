//! Provider configuration.
//!
//! The host passes the provider block as JSON. Unset fields fall back to the
//! environment:
//!
//! | field       | environment variable |
//! |-------------|----------------------|
//! | `api_token` | `VERCEL_TOKEN`       |
//! | `team_id`   | `VERCEL_TEAM_ID`     |
//! | `api_url`   | `VERCEL_API_URL`     |

use serde::Deserialize;
use serde_json::Value;

use crate::client::{HttpClient, DEFAULT_API_URL};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "VERCEL_TOKEN";
/// Environment variable holding the team id.
pub const TEAM_ID_ENV: &str = "VERCEL_TEAM_ID";
/// Environment variable overriding the API endpoint.
pub const API_URL_ENV: &str = "VERCEL_API_URL";

/// Provider configuration block.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("team_id", &self.team_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl ProviderConfig {
    /// The schema of the provider configuration block.
    pub fn schema() -> Schema {
        Schema::v0()
            .with_description("Vercel API access")
            .with_attribute(
                "api_token",
                Attribute::optional_string()
                    .sensitive()
                    .with_description("API token; defaults to $VERCEL_TOKEN"),
            )
            .with_attribute(
                "team_id",
                Attribute::optional_string()
                    .with_description("Team scope for all calls; defaults to $VERCEL_TEAM_ID"),
            )
            .with_attribute(
                "api_url",
                Attribute::optional_string()
                    .with_description("API endpoint; defaults to https://api.vercel.com"),
            )
    }

    /// Decode the configuration block. A null block is an empty configuration.
    pub fn from_value(value: &Value) -> Result<Self, ProviderError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Fill unset fields from the process environment.
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback(|name| std::env::var(name).ok())
    }

    /// Fill unset (or empty) fields from `lookup`.
    pub fn with_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fill(&mut self.api_token, || lookup(TOKEN_ENV));
        fill(&mut self.team_id, || lookup(TEAM_ID_ENV));
        fill(&mut self.api_url, || lookup(API_URL_ENV));
        self
    }

    /// The API token; required.
    pub fn token(&self) -> Result<&str, ProviderError> {
        self.api_token.as_deref().ok_or_else(|| {
            ProviderError::Configuration(format!(
                "missing API token: set `api_token` or ${}",
                TOKEN_ENV
            ))
        })
    }

    /// The API endpoint.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Build the HTTP client described by this configuration.
    pub fn build_client(&self) -> Result<HttpClient, ProviderError> {
        let client = HttpClient::new(self.api_url(), self.token()?)?;
        Ok(match &self.team_id {
            Some(team_id) => client.with_team_id(team_id),
            None => client,
        })
    }
}

fn fill(field: &mut Option<String>, fallback: impl FnOnce() -> Option<String>) {
    if field.as_deref().map_or(true, str::is_empty) {
        *field = fallback().filter(|v| !v.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_value() {
        let config = ProviderConfig::from_value(&json!({
            "api_token": "tok",
            "team_id": "team_1"
        }))
        .unwrap();
        assert_eq!(config.api_token.as_deref(), Some("tok"));
        assert_eq!(config.team_id.as_deref(), Some("team_1"));
        assert_eq!(config.api_url(), DEFAULT_API_URL);

        let config = ProviderConfig::from_value(&Value::Null).unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_from_value_type_mismatch() {
        let err = ProviderConfig::from_value(&json!({"api_token": 42})).unwrap_err();
        assert!(matches!(err, ProviderError::Serialization(_)));
    }

    #[test]
    fn test_fallback_fills_missing_and_empty() {
        let config = ProviderConfig {
            api_token: Some(String::new()),
            team_id: None,
            api_url: Some("http://localhost:9999".to_string()),
        }
        .with_fallback(env(&[
            (TOKEN_ENV, "env-token"),
            (TEAM_ID_ENV, "team_env"),
            (API_URL_ENV, "http://ignored"),
        ]));

        assert_eq!(config.token().unwrap(), "env-token");
        assert_eq!(config.team_id.as_deref(), Some("team_env"));
        assert_eq!(config.api_url(), "http://localhost:9999");
    }

    #[test]
    fn test_explicit_values_win() {
        let config = ProviderConfig {
            api_token: Some("explicit".to_string()),
            ..Default::default()
        }
        .with_fallback(env(&[(TOKEN_ENV, "env-token")]));
        assert_eq!(config.token().unwrap(), "explicit");
    }

    #[test]
    fn test_missing_token() {
        let config = ProviderConfig::default().with_fallback(env(&[]));
        let err = config.token().unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
        assert!(err.to_string().contains(TOKEN_ENV));
        assert!(config.build_client().is_err());
    }

    #[test]
    fn test_build_client() {
        let config = ProviderConfig {
            api_token: Some("tok".to_string()),
            api_url: Some("http://localhost:9999/".to_string()),
            team_id: Some("team_1".to_string()),
        };
        let client = config.build_client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig {
            api_token: Some("super-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_schema_marks_token_sensitive() {
        let schema = ProviderConfig::schema();
        assert!(schema.attribute("api_token").unwrap().flags.sensitive);
        assert!(schema.attribute("team_id").is_some());
    }
}
