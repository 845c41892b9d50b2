//! Configuration system (layered: defaults < TOML file < environment).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::auth::request::{DEFAULT_AUTH_ENDPOINT, DEFAULT_REDIRECT_URI};
use crate::auth::{AuthRequest, FileTokenStore};
use crate::error::{GraphError, Result};

pub const DEFAULT_CLIENT_ID: &str = "368780939859975";
pub const DEFAULT_SCOPE: &str = "publish_stream";
pub const DEFAULT_PUBLISH_URL: &str = "https://graph.facebook.com/me/feed";

/// Environment variables and the setting each one overrides.
const ENV_CLIENT_ID: &str = "GRAPHPUB_CLIENT_ID";
const ENV_SCOPE: &str = "GRAPHPUB_SCOPE";
const ENV_TOKEN_FILE: &str = "GRAPHPUB_TOKEN_FILE";
const ENV_AUTH_URL: &str = "GRAPHPUB_AUTH_URL";
const ENV_REDIRECT_URI: &str = "GRAPHPUB_REDIRECT_URI";
const ENV_PUBLISH_URL: &str = "GRAPHPUB_PUBLISH_URL";

/// Application identity, endpoints and token location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub client_id: String,
    pub scope: Vec<String>,
    pub token_file: PathBuf,
    pub auth_endpoint: String,
    pub redirect_uri: String,
    pub publish_url: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scope: vec![DEFAULT_SCOPE.to_string()],
            token_file: FileTokenStore::default_path(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            publish_url: DEFAULT_PUBLISH_URL.to_string(),
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    client_id: Option<String>,
    scope: Option<Vec<String>>,
    token_file: Option<PathBuf>,
    auth_endpoint: Option<String>,
    redirect_uri: Option<String>,
    publish_url: Option<String>,
}

impl GraphConfig {
    /// Defaults with environment overrides (`.env` is loaded if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Defaults, then the TOML file at `path`, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Defaults overridden by the keys present in a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GraphError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
            .map_err(|e| GraphError::Configuration(format!("{}: {e}", path.display())))
    }

    fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(raw)?;
        let mut config = Self::default();
        if let Some(client_id) = file.client_id {
            config.client_id = client_id;
        }
        if let Some(scope) = file.scope {
            config.scope = scope;
        }
        if let Some(token_file) = file.token_file {
            config.token_file = token_file;
        }
        if let Some(auth_endpoint) = file.auth_endpoint {
            config.auth_endpoint = auth_endpoint;
        }
        if let Some(redirect_uri) = file.redirect_uri {
            config.redirect_uri = redirect_uri;
        }
        if let Some(publish_url) = file.publish_url {
            config.publish_url = publish_url;
        }
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(client_id) = get(ENV_CLIENT_ID) {
            self.client_id = client_id;
        }
        if let Some(scope) = get(ENV_SCOPE) {
            self.scope = scope.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(token_file) = get(ENV_TOKEN_FILE) {
            self.token_file = PathBuf::from(token_file);
        }
        if let Some(url) = get(ENV_AUTH_URL) {
            self.auth_endpoint = url;
        }
        if let Some(uri) = get(ENV_REDIRECT_URI) {
            self.redirect_uri = uri;
        }
        if let Some(url) = get(ENV_PUBLISH_URL) {
            self.publish_url = url;
        }
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Authorization parameters, validated so a bad endpoint fails before
    /// any browser surface is opened.
    pub fn auth_request(&self) -> Result<AuthRequest> {
        let request = AuthRequest::new(self.client_id.clone(), self.scope.iter().cloned())
            .with_auth_endpoint(self.auth_endpoint.clone())
            .with_redirect_uri(self.redirect_uri.clone());
        request
            .authorize_url()
            .map_err(|e| GraphError::Configuration(e.to_string()))?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_facebook() {
        let config = GraphConfig::default();
        assert_eq!(config.client_id, "368780939859975");
        assert_eq!(config.scope, vec!["publish_stream".to_string()]);
        assert_eq!(config.publish_url, "https://graph.facebook.com/me/feed");
        assert!(config.token_file.ends_with(".fbtoken"));
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = GraphConfig::default();
        config.apply_env(lookup(&[
            ("GRAPHPUB_CLIENT_ID", "42"),
            ("GRAPHPUB_SCOPE", "publish_actions, user_posts"),
            ("GRAPHPUB_TOKEN_FILE", "/tmp/tok"),
            ("GRAPHPUB_PUBLISH_URL", "http://127.0.0.1:9/me/feed"),
        ]));
        assert_eq!(config.client_id, "42");
        assert_eq!(config.scope, vec!["publish_actions", "user_posts"]);
        assert_eq!(config.token_file, PathBuf::from("/tmp/tok"));
        assert_eq!(config.publish_url, "http://127.0.0.1:9/me/feed");
        assert_eq!(config.auth_endpoint, DEFAULT_AUTH_ENDPOINT);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = GraphConfig::default();
        config.apply_env(lookup(&[("GRAPHPUB_CLIENT_ID", "  ")]));
        assert_eq!(config.client_id, DEFAULT_CLIENT_ID);
    }

    #[test]
    fn toml_file_overrides_present_keys_only() {
        let config = GraphConfig::from_toml_str(
            r#"
client_id = "777"
scope = ["a", "b"]
redirect_uri = "https://example.com/done"
"#,
        )
        .unwrap();
        assert_eq!(config.client_id, "777");
        assert_eq!(config.scope, vec!["a", "b"]);
        assert_eq!(config.redirect_uri, "https://example.com/done");
        assert_eq!(config.auth_endpoint, DEFAULT_AUTH_ENDPOINT);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(GraphConfig::from_toml_str("clientid = \"x\"").is_err());
    }

    #[test]
    fn from_file_reports_missing_file_as_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = GraphConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, GraphError::Configuration(_)));
    }

    #[test]
    fn from_file_reads_token_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graphpub.toml");
        std::fs::write(&path, "token_file = \"/var/tmp/fb\"\n").unwrap();
        let config = GraphConfig::from_file(&path).unwrap();
        assert_eq!(config.token_file, PathBuf::from("/var/tmp/fb"));
    }

    #[test]
    fn auth_request_carries_config_values() {
        let config = GraphConfig {
            client_id: "99".to_string(),
            scope: vec!["x".to_string()],
            ..GraphConfig::default()
        };
        let request = config.auth_request().unwrap();
        assert_eq!(request.client_id(), "99");
        assert_eq!(request.scope(), ["x"]);
        assert_eq!(request.redirect_uri(), DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn auth_request_rejects_bad_endpoint() {
        let config = GraphConfig {
            auth_endpoint: "nope".to_string(),
            ..GraphConfig::default()
        };
        assert!(matches!(
            config.auth_request(),
            Err(GraphError::Configuration(_))
        ));
    }
}
